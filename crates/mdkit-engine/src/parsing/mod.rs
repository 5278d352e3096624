//! # Structural Tokenizer
//!
//! Turns a document body into an ordered stream of [`Token`]s.
//!
//! Block structure is found first (`blocks`), then the content of each
//! inline-eligible block is handed to the cursor-based inline parser
//! (`inline`). Both layers are pure functions of their input.

pub mod blocks;
pub mod inline;
pub mod lines;
pub mod span;
pub mod token;

use blocks::BlockBuilder;
use lines::split_lines;

pub use token::{BlockTag, InlineContent, InlineToken, Token};

/// Tokenizes a document body.
///
/// Never fails: unrecognized syntax becomes paragraph text.
pub fn tokenize(body: &str) -> Vec<Token> {
    let lines = split_lines(body);
    let tokens = BlockBuilder::new().build(&lines);
    log::trace!("{} lines -> {} tokens", lines.len(), tokens.len());
    tokens
}
