pub mod analyze;
pub mod extract;
pub mod merge;
pub mod metadata;
pub mod models;
pub mod parsing;
pub mod service;
pub mod transform;
pub mod walk;

// Re-export key types for easier usage
pub use analyze::{DocumentAnalysis, analyze, analyze_tokens};
pub use extract::{ExtractedElements, ParsedDocument, extract, parse};
pub use merge::{
    MergeStrategy, MergedDocument, SourceDocument, UnsupportedStrategy, merge, merge_sources,
};
pub use metadata::{MetadataError, split, split_lenient};
pub use models::{Document, MetaValue, Metadata};
pub use parsing::{BlockTag, InlineContent, InlineToken, Token, tokenize};
pub use service::{DocumentService, Engine, Request, Response, ServiceError};
pub use transform::{Operation, TransformedContent, UnsupportedOperation, transform};
