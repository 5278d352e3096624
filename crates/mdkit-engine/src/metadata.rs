//! # Metadata Splitter
//!
//! Separates a leading YAML block from the document body:
//!
//! ```text
//! ---
//! title: Notes
//! tags: [rust, markdown]
//! ---
//! # Body starts here
//! ```
//!
//! The block is recognized only when the very first line is `---`. It ends at
//! the next line that is `---` or `...`.

use serde_yaml::Value;
use thiserror::Error;

use crate::models::{Document, Metadata, meta_value::metadata_from_mapping};

const DELIMITER: &str = "---";
const END_ALT: &str = "...";
const BOM: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("metadata block opened with `---` is never closed")]
    Unterminated,
    #[error("metadata block is not valid YAML: {0}")]
    InvalidYaml(#[source] serde_yaml::Error),
    #[error("metadata block must be a key/value mapping, found {found}")]
    NotAMapping { found: &'static str },
    #[error("failed to render metadata as YAML: {0}")]
    Render(#[source] serde_yaml::Error),
}

/// Splits `raw` into metadata and body.
///
/// Input without a leading block is returned whole as the body.
///
/// # Errors
/// Returns [`MetadataError`] when a block is opened but never closed, or when
/// its content is not a YAML mapping.
pub fn split(raw: &str) -> Result<Document, MetadataError> {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);

    let Some((first, rest)) = next_line(text) else {
        return Ok(Document::body_only(raw));
    };
    if first.trim_end() != DELIMITER {
        return Ok(Document::body_only(raw));
    }

    let mut block_len = 0usize;
    let mut remaining = rest;
    while let Some((line, after)) = next_line(remaining) {
        if matches!(line.trim_end(), DELIMITER | END_ALT) {
            let metadata = parse_block(&rest[..block_len])?;
            return Ok(Document::new(metadata, after));
        }
        block_len += remaining.len() - after.len();
        remaining = after;
    }

    Err(MetadataError::Unterminated)
}

/// Like [`split`], but never fails: a malformed block is treated as body.
pub fn split_lenient(raw: &str) -> Document {
    split(raw).unwrap_or_else(|err| {
        log::warn!("treating input as body without metadata: {err}");
        Document::body_only(raw)
    })
}

/// Renders `doc` as Markdown with its metadata as a leading YAML block.
pub fn render(doc: &Document) -> Result<String, MetadataError> {
    if !doc.has_metadata() {
        return Ok(doc.body.clone());
    }
    let yaml = serde_yaml::to_string(&doc.metadata).map_err(MetadataError::Render)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", doc.body))
}

/// Returns the next line (without `\n`) and the text after it.
fn next_line(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    Some(match s.find('\n') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    })
}

fn parse_block(block: &str) -> Result<Metadata, MetadataError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }
    match serde_yaml::from_str::<Value>(block).map_err(MetadataError::InvalidYaml)? {
        Value::Mapping(m) => Ok(metadata_from_mapping(m)),
        Value::Null => Ok(Metadata::new()),
        other => Err(MetadataError::NotAMapping {
            found: yaml_kind(&other),
        }),
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetaValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn splits_block_and_body() {
        let doc = split("---\ntitle: Notes\ntags: [a, b]\n---\n# Hi\n").unwrap();
        assert_eq!(doc.body, "# Hi\n");
        assert_eq!(doc.metadata["title"], MetaValue::from("Notes"));
        assert_eq!(doc.metadata["tags"], MetaValue::from(vec!["a", "b"]));
    }

    #[test]
    fn keys_keep_insertion_order() {
        let doc = split("---\nzeta: 1\nalpha: 2\nmid: 3\n---\n").unwrap();
        assert_eq!(
            doc.metadata.keys().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
        assert_eq!(doc.body, "");
    }

    #[rstest]
    #[case::no_block("# Title\n")]
    #[case::empty("")]
    #[case::delimiter_not_first("text\n---\na: 1\n---\n")]
    #[case::indented_delimiter(" ---\na: 1\n---\n")]
    fn input_without_block_is_all_body(#[case] raw: &str) {
        let doc = split(raw).unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn dots_close_the_block() {
        let doc = split("---\na: 1\n...\nbody").unwrap();
        assert_eq!(doc.body, "body");
        assert_eq!(doc.metadata.len(), 1);
    }

    #[test]
    fn crlf_and_bom_are_tolerated() {
        let doc = split("\u{feff}---\r\na: x\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(doc.metadata["a"], MetaValue::from("x"));
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn empty_block_is_empty_metadata() {
        let doc = split("---\n---\nbody\n").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "body\n");
    }

    #[test]
    fn unterminated_block_is_an_error() {
        assert!(matches!(
            split("---\ntitle: x\nno end\n"),
            Err(MetadataError::Unterminated)
        ));
    }

    #[test]
    fn non_mapping_block_is_an_error() {
        assert!(matches!(
            split("---\n- a\n- b\n---\n"),
            Err(MetadataError::NotAMapping { found: "a sequence" })
        ));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            split("---\na: [unclosed\n---\n"),
            Err(MetadataError::InvalidYaml(_))
        ));
    }

    #[test]
    fn lenient_falls_back_to_whole_input() {
        let raw = "---\ntitle: x\nno end\n";
        let doc = split_lenient(raw);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn render_round_trips_through_split() {
        let doc = split("---\ntitle: Notes\ntags:\n- a\n- b\n---\nbody\n").unwrap();
        let rendered = doc.to_markdown().unwrap();
        assert!(rendered.starts_with("---\n"));
        assert_eq!(split(&rendered).unwrap(), doc);
    }

    #[test]
    fn render_without_metadata_is_body() {
        let doc = Document::body_only("just text\n");
        assert_eq!(doc.to_markdown().unwrap(), "just text\n");
    }
}
