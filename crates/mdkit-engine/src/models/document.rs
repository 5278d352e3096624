use serde::{Deserialize, Serialize};

use super::meta_value::Metadata;
use crate::metadata::{MetadataError, render};

/// A raw document split into its metadata block and body.
///
/// `metadata` is empty when the input has no leading block; `body` never
/// contains the block's delimiters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
}

impl Document {
    pub fn new(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    /// A document with no metadata whose body is the whole input.
    pub fn body_only(body: impl Into<String>) -> Self {
        Self::new(Metadata::new(), body)
    }

    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }

    /// Renders the document back to Markdown with a leading YAML block.
    ///
    /// Documents without metadata render as their body alone.
    pub fn to_markdown(&self) -> Result<String, MetadataError> {
        render(self)
    }
}
