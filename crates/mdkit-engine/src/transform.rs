//! # Transformer
//!
//! Text-level rewrites of a document body. Metadata is split off first and
//! handed back untouched.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{metadata::split_lenient, models::Metadata};

/// `[text](target)`, with group 1 capturing a leading `!` so images can be skipped.
/// The text may hold whole images, so a badge `[![alt](src)](target)` keeps
/// its image.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[((?:!\[[^\]]*\]\([^)]*\)|[^\]])*)\]\([^)]*\)")
        .expect("link pattern is valid")
});

/// `![alt](target)`
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[[^\]]*\]\([^)]*\)")
        .expect("image pattern is valid")
});

const QUOTE_PREFIX: &str = "> ";

/// A named rewrite of the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Uppercase,
    Lowercase,
    /// First character upper, the rest lower.
    Capitalize,
    /// First character of every whitespace-delimited word upper.
    TitleCase,
    /// Drops lines that start with `#`.
    RemoveHeadings,
    /// Replaces `[text](target)` with `text`. Images are left alone.
    RemoveLinks,
    /// Deletes `![alt](target)`.
    RemoveImages,
    /// Prefixes non-blank lines with `> `.
    AddPrefix,
    /// Prefixes heading lines with `1. `, `2. `, ...
    NumberHeadings,
    Identity,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported operation `{0}`")]
pub struct UnsupportedOperation(pub String);

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 10] = [
        Operation::Uppercase,
        Operation::Lowercase,
        Operation::Capitalize,
        Operation::TitleCase,
        Operation::RemoveHeadings,
        Operation::RemoveLinks,
        Operation::RemoveImages,
        Operation::AddPrefix,
        Operation::NumberHeadings,
        Operation::Identity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Uppercase => "uppercase",
            Operation::Lowercase => "lowercase",
            Operation::Capitalize => "capitalize",
            Operation::TitleCase => "title_case",
            Operation::RemoveHeadings => "remove_headings",
            Operation::RemoveLinks => "remove_links",
            Operation::RemoveImages => "remove_images",
            Operation::AddPrefix => "add_prefix",
            Operation::NumberHeadings => "number_headings",
            Operation::Identity => "identity",
        }
    }

    /// Resolves `name`, treating anything unrecognized as [`Operation::Identity`].
    pub fn from_name_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnsupportedOperation| {
            log::debug!("{err}; falling back to identity");
            Operation::Identity
        })
    }

    /// Applies the operation to `body`.
    pub fn apply(self, body: &str) -> String {
        match self {
            Operation::Uppercase => body.to_uppercase(),
            Operation::Lowercase => body.to_lowercase(),
            Operation::Capitalize => capitalize(body),
            Operation::TitleCase => title_case(body),
            Operation::RemoveHeadings => map_lines(body, |line| {
                (!is_heading_line(line)).then(|| line.to_string())
            }),
            Operation::RemoveLinks => LINK_RE
                .replace_all(body, |caps: &Captures<'_>| {
                    if &caps[1] == "!" {
                        caps[0].to_string()
                    } else {
                        caps[2].to_string()
                    }
                })
                .into_owned(),
            Operation::RemoveImages => IMAGE_RE.replace_all(body, "").into_owned(),
            Operation::AddPrefix => map_lines(body, |line| {
                Some(if line.trim().is_empty() {
                    line.to_string()
                } else {
                    format!("{QUOTE_PREFIX}{line}")
                })
            }),
            Operation::NumberHeadings => {
                let mut n = 0usize;
                map_lines(body, |line| {
                    Some(if is_heading_line(line) {
                        n += 1;
                        format!("{n}. {line}")
                    } else {
                        line.to_string()
                    })
                })
            }
            Operation::Identity => body.to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = UnsupportedOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnsupportedOperation(s.to_string()))
    }
}

/// Result of [`transform`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedContent {
    /// Body before the transform, metadata stripped.
    pub original_content: String,
    pub transformed_content: String,
    /// The source document's metadata, unchanged.
    pub metadata: Metadata,
}

/// Splits `raw` and applies `operation` to its body.
pub fn transform(raw: &str, operation: Operation) -> TransformedContent {
    let doc = split_lenient(raw);
    log::debug!("applying {operation} to {} bytes", doc.body.len());
    let transformed_content = operation.apply(&doc.body);
    TransformedContent {
        original_content: doc.body,
        transformed_content,
        metadata: doc.metadata,
    }
}

fn is_heading_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Rewrites `body` line by line on `\n`; `None` drops the line.
fn map_lines(body: &str, mut f: impl FnMut(&str) -> Option<String>) -> String {
    body.split('\n')
        .filter_map(|line| f(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(body: &str) -> String {
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.push_str(&chars.as_str().to_lowercase());
    out
}

fn title_case(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut at_word_start = true;
    for c in body.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::uppercase(Operation::Uppercase, "Hello World", "HELLO WORLD")]
    #[case::lowercase(Operation::Lowercase, "Hello World", "hello world")]
    #[case::capitalize(Operation::Capitalize, "hELLO wORLD", "Hello world")]
    #[case::capitalize_empty(Operation::Capitalize, "", "")]
    #[case::title_case(Operation::TitleCase, "the quick\tbrown  fox", "The Quick\tBrown  Fox")]
    #[case::title_case_keeps_rest(Operation::TitleCase, "mIxed caSe", "MIxed CaSe")]
    #[case::remove_links(Operation::RemoveLinks, "[t](http://x)", "t")]
    #[case::remove_links_keeps_images(
        Operation::RemoveLinks,
        "![a](i.png) and [b](/b)",
        "![a](i.png) and b"
    )]
    #[case::remove_links_unwraps_badge(
        Operation::RemoveLinks,
        "[![b](b.svg)](/ci) done",
        "![b](b.svg) done"
    )]
    #[case::remove_images(Operation::RemoveImages, "x ![a](i.png) y", "x  y")]
    #[case::identity(Operation::Identity, "# Same\n", "# Same\n")]
    fn apply_operation(#[case] op: Operation, #[case] body: &str, #[case] expected: &str) {
        assert_eq!(op.apply(body), expected);
    }

    #[test]
    fn remove_headings_keeps_blank_lines() {
        assert_eq!(
            Operation::RemoveHeadings.apply("# A\ntext\n\n  ## B\nmore\n"),
            "text\n\nmore\n"
        );
    }

    #[test]
    fn add_prefix_skips_blank_lines() {
        assert_eq!(Operation::AddPrefix.apply("a\n\nb\n"), "> a\n\n> b\n");
    }

    #[test]
    fn number_headings_counts_only_headings() {
        assert_eq!(
            Operation::NumberHeadings.apply("# A\n\n## B\n"),
            "1. # A\n\n2. ## B\n"
        );
    }

    #[test]
    fn names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert_eq!(
            "bogus".parse::<Operation>(),
            Err(UnsupportedOperation("bogus".into()))
        );
    }

    #[test]
    fn lenient_parse_falls_back_to_identity() {
        assert_eq!(Operation::from_name_lenient("bogus"), Operation::Identity);
        assert_eq!(
            Operation::from_name_lenient("title_case"),
            Operation::TitleCase
        );
    }

    #[test]
    fn transform_keeps_metadata() {
        let result = transform("---\ntitle: x\n---\nbody\n", Operation::Uppercase);
        assert_eq!(result.original_content, "body\n");
        assert_eq!(result.transformed_content, "BODY\n");
        assert_eq!(result.metadata.keys().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn operation_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Operation::NumberHeadings).unwrap(),
            "\"number_headings\""
        );
    }
}
