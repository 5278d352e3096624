//! # Inline Parsing
//!
//! Cursor-based inline parsing with explicit raw zones.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing and runs over the joined
//! content of inline-eligible blocks (paragraphs, headings, table cells).
//!
//! The parser uses a cursor-based approach with "raw zones":
//! - Code spans suppress all other inline parsing inside them
//! - Links and images are parsed only outside raw zones
//! - Link labels are parsed recursively, so images nest inside links
//!
//! ## Modules
//!
//! - **`kinds`**: Inline-specific types with owned delimiters (CodeSpan, Link, Autolink)
//! - **`cursor`**: `Cursor` for character-by-character parsing with position tracking
//! - **`parser`**: `parse_inline()` main entry point with `try_parse_*` helpers

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::{parse_inline, plain_text};
