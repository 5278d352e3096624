//! # Merger
//!
//! Joins document bodies in input order and combines their metadata.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    metadata::split_lenient,
    models::{MetaValue, Metadata},
};

const BODY_SEPARATOR: &str = "\n\n";

/// How colliding metadata keys are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Later documents overwrite earlier keys.
    #[default]
    Append,
    /// Like `Append`, but list values are concatenated.
    CombineMetadata,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported merge strategy `{0}` (expected `append` or `combine_metadata`)")]
pub struct UnsupportedStrategy(pub String);

impl MergeStrategy {
    pub const ALL: [MergeStrategy; 2] = [MergeStrategy::Append, MergeStrategy::CombineMetadata];

    pub fn as_str(self) -> &'static str {
        match self {
            MergeStrategy::Append => "append",
            MergeStrategy::CombineMetadata => "combine_metadata",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = UnsupportedStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MergeStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnsupportedStrategy(s.to_string()))
    }
}

/// A raw document with the identifier it is reported under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: String,
    pub raw: String,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw: raw.into(),
        }
    }
}

/// Result of [`merge`]. `source_files` has one entry per input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedDocument {
    pub content: String,
    pub combined_metadata: Metadata,
    pub source_files: Vec<String>,
}

/// Merges raw documents identified by position (`document_1`, `document_2`, ...).
pub fn merge<S: AsRef<str>>(documents: &[S], strategy: MergeStrategy) -> MergedDocument {
    let sources: Vec<SourceDocument> = documents
        .iter()
        .enumerate()
        .map(|(i, raw)| SourceDocument::new(format!("document_{}", i + 1), raw.as_ref()))
        .collect();
    merge_sources(&sources, strategy)
}

/// Merges named documents in order.
///
/// A single document's body is returned unchanged. With several, each body
/// loses its trailing newlines and the bodies are joined with one blank
/// line; a trailing newline on the last body is kept.
pub fn merge_sources(sources: &[SourceDocument], strategy: MergeStrategy) -> MergedDocument {
    let mut bodies = Vec::with_capacity(sources.len());
    let mut combined_metadata = Metadata::new();

    for source in sources {
        let doc = split_lenient(&source.raw);
        log::debug!(
            "merging {} ({} metadata keys, {strategy})",
            source.id,
            doc.metadata.len()
        );
        combine_into(&mut combined_metadata, doc.metadata, strategy);
        bodies.push(doc.body);
    }

    let content = match bodies.as_slice() {
        [single] => single.clone(),
        _ => join_bodies(&bodies),
    };

    MergedDocument {
        content,
        combined_metadata,
        source_files: sources.iter().map(|s| s.id.clone()).collect(),
    }
}

/// Folds `incoming` into `acc`. Overwritten keys keep their first position.
fn combine_into(acc: &mut Metadata, incoming: Metadata, strategy: MergeStrategy) {
    for (key, value) in incoming {
        if let (MergeStrategy::CombineMetadata, MetaValue::List(items)) = (strategy, &value)
            && let Some(MetaValue::List(existing)) = acc.get_mut(&key)
        {
            existing.extend(items.iter().cloned());
            continue;
        }
        acc.insert(key, value);
    }
}

fn join_bodies(bodies: &[String]) -> String {
    let mut content = bodies
        .iter()
        .map(|b| b.trim_end_matches(['\n', '\r']))
        .collect::<Vec<_>>()
        .join(BODY_SEPARATOR);
    if bodies.last().is_some_and(|b| b.ends_with('\n')) {
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_documents() {
        let merged = merge::<&str>(&[], MergeStrategy::Append);
        assert_eq!(merged, MergedDocument::default());
    }

    #[test]
    fn one_document_is_unchanged() {
        let merged = merge(&["---\na: 1\n---\nbody\n\n\n"], MergeStrategy::Append);
        assert_eq!(merged.content, "body\n\n\n");
        assert_eq!(merged.combined_metadata["a"], MetaValue::from("1"));
        assert_eq!(merged.source_files, vec!["document_1"]);
    }

    #[test]
    fn bodies_joined_with_blank_line() {
        let merged = merge(&["# A\n", "# B\n\n", "# C\n"], MergeStrategy::Append);
        assert_eq!(merged.content, "# A\n\n# B\n\n# C\n");
        assert_eq!(
            merged.source_files,
            vec!["document_1", "document_2", "document_3"]
        );
    }

    #[test]
    fn append_overwrites_in_place() {
        let merged = merge(
            &[
                "---\ntitle: one\ntags: [a]\n---\n",
                "---\nauthor: x\ntitle: two\n---\n",
            ],
            MergeStrategy::Append,
        );
        assert_eq!(
            merged.combined_metadata.keys().collect::<Vec<_>>(),
            vec!["title", "tags", "author"]
        );
        assert_eq!(merged.combined_metadata["title"], MetaValue::from("two"));
    }

    #[test]
    fn append_replaces_lists() {
        let merged = merge(
            &["---\ntags: [a, b]\n---\n", "---\ntags: [c]\n---\n"],
            MergeStrategy::Append,
        );
        assert_eq!(merged.combined_metadata["tags"], MetaValue::from(vec!["c"]));
    }

    #[test]
    fn combine_concatenates_lists() {
        let merged = merge(
            &["---\ntags: [a, b]\n---\n", "---\ntags: [c, a]\n---\n"],
            MergeStrategy::CombineMetadata,
        );
        assert_eq!(
            merged.combined_metadata["tags"],
            MetaValue::from(vec!["a", "b", "c", "a"])
        );
    }

    #[test]
    fn combine_overwrites_scalars_and_mixed_kinds() {
        let merged = merge(
            &[
                "---\ntitle: one\ntags: [a]\n---\n",
                "---\ntitle: two\ntags: b\n---\n",
            ],
            MergeStrategy::CombineMetadata,
        );
        assert_eq!(merged.combined_metadata["title"], MetaValue::from("two"));
        assert_eq!(merged.combined_metadata["tags"], MetaValue::from("b"));
    }

    #[test]
    fn named_sources_keep_their_ids() {
        let merged = merge_sources(
            &[
                SourceDocument::new("notes/a.md", "a"),
                SourceDocument::new("notes/b.md", "b"),
            ],
            MergeStrategy::Append,
        );
        assert_eq!(merged.content, "a\n\nb");
        assert_eq!(merged.source_files, vec!["notes/a.md", "notes/b.md"]);
    }

    #[test]
    fn strategy_names() {
        assert_eq!(
            "combine_metadata".parse::<MergeStrategy>(),
            Ok(MergeStrategy::CombineMetadata)
        );
        assert_eq!(
            "union".parse::<MergeStrategy>(),
            Err(UnsupportedStrategy("union".into()))
        );
        assert_eq!(MergeStrategy::default(), MergeStrategy::Append);
    }
}
