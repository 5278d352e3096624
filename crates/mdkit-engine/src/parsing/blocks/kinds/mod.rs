//! # Block Kinds
//!
//! Block-specific types that own their syntax delimiters. The classifier and
//! builder call into these; they never hardcode `#`, `>` or fence markers.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_item;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use heading::{AtxHeading, SetextUnderline};
pub use list_item::{ListDelimiter, ListItem, ListMarker};
pub use paragraph::Paragraph;
pub use table::Table;
pub use thematic_break::ThematicBreak;
