pub mod document;
pub mod meta_value;

pub use document::Document;
pub use meta_value::{MetaValue, Metadata};
