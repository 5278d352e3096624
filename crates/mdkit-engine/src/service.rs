//! # Service Boundary
//!
//! Serializable request/response values for callers that drive the engine
//! over a transport (the CLI's `serve` loop reads them as JSON lines).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    analyze::{DocumentAnalysis, analyze},
    extract::{ParsedDocument, parse},
    merge::{MergeStrategy, MergedDocument, SourceDocument, UnsupportedStrategy, merge_sources},
    metadata::{MetadataError, split, split_lenient},
    parsing::{Token, tokenize},
    transform::{Operation, TransformedContent, UnsupportedOperation, transform},
};

/// Identifier reported for the single input of non-merge requests.
const CONTENT_ID: &str = "content";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Parse {
        content: String,
    },
    Analyze {
        content: String,
    },
    Tokens {
        content: String,
    },
    Transform {
        content: String,
        operation: String,
        /// Reject unknown operation names instead of applying identity.
        #[serde(default)]
        strict: bool,
    },
    Merge {
        documents: Vec<String>,
        #[serde(default)]
        strategy: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum Response {
    Parsed(ParsedDocument),
    Analysis(DocumentAnalysis),
    Tokens(Vec<Token>),
    Transformed(TransformedContent),
    Merged(MergedDocument),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    UnsupportedOperation(#[from] UnsupportedOperation),
    #[error(transparent)]
    UnsupportedStrategy(#[from] UnsupportedStrategy),
    #[error("{id}: {source}")]
    Metadata {
        id: String,
        #[source]
        source: MetadataError,
    },
}

/// Anything that can answer document requests.
pub trait DocumentService {
    fn handle(&self, request: Request) -> Result<Response, ServiceError>;
}

/// The in-process engine.
///
/// With `strict_metadata` set, every input's metadata block is validated
/// before the request runs and a malformed block fails the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    pub strict_metadata: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            strict_metadata: true,
        }
    }

    /// Validates the metadata block of `raw`, reporting errors under `id`.
    pub fn validate(&self, id: &str, raw: &str) -> Result<(), ServiceError> {
        if !self.strict_metadata {
            return Ok(());
        }
        split(raw).map(drop).map_err(|source| ServiceError::Metadata {
            id: id.to_string(),
            source,
        })
    }
}

impl DocumentService for Engine {
    fn handle(&self, request: Request) -> Result<Response, ServiceError> {
        match request {
            Request::Parse { content } => {
                self.validate(CONTENT_ID, &content)?;
                Ok(Response::Parsed(parse(&content)))
            }
            Request::Analyze { content } => {
                self.validate(CONTENT_ID, &content)?;
                Ok(Response::Analysis(analyze(&content)))
            }
            Request::Tokens { content } => {
                self.validate(CONTENT_ID, &content)?;
                let doc = split_lenient(&content);
                Ok(Response::Tokens(tokenize(&doc.body)))
            }
            Request::Transform {
                content,
                operation,
                strict,
            } => {
                let operation = if strict {
                    operation.parse::<Operation>()?
                } else {
                    Operation::from_name_lenient(&operation)
                };
                self.validate(CONTENT_ID, &content)?;
                Ok(Response::Transformed(transform(&content, operation)))
            }
            Request::Merge {
                documents,
                strategy,
            } => {
                let strategy = match strategy {
                    Some(name) => name.parse::<MergeStrategy>()?,
                    None => MergeStrategy::default(),
                };
                let sources: Vec<SourceDocument> = documents
                    .into_iter()
                    .enumerate()
                    .map(|(i, raw)| SourceDocument::new(format!("document_{}", i + 1), raw))
                    .collect();
                for source in &sources {
                    self.validate(&source.id, &source.raw)?;
                }
                Ok(Response::Merged(merge_sources(&sources, strategy)))
            }
        }
    }
}
