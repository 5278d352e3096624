//! # Block Parsing
//!
//! Two-phase block parsing over a line cursor.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (indentation, blank status, which block it opens)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` walks the classified
//!    lines and emits open/close `Token`s. Containers (blockquotes, list items)
//!    collect their lines with prefixes stripped and re-enter the builder.
//!
//! ## Modules
//!
//! - **`kinds`**: Block-specific types with owned delimiters (BlockQuote, CodeFence, ListItem, ...)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`open`**: `try_open` dispatch for detecting block openers
//! - **`builder`**: `BlockBuilder` for block construction
//!
//! ## Key Invariants
//!
//! - Nesting depth is unbounded (lists in blockquotes in lists, etc.)
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - Every `Open` token is matched by a `Close` of the same tag

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
