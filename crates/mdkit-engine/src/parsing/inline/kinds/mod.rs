//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK = b'\`'` - raw zone that suppresses other parsing
//! - **`Link`**: `[label](dest "title")` and the `![` image opener
//! - **`Autolink`**: `<scheme:...>` and `<user@host>`
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in parser code.

pub mod code_span;
pub mod link;

pub use code_span::CodeSpan;
pub use link::{Autolink, Link};
