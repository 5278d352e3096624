use crate::parsing::lines::{indentation, is_blank};

use super::open::{BlockOpen, try_open};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// The line text, without its terminator.
    pub text: &'a str,
    /// Columns of leading whitespace (tabs expanded).
    pub indent: usize,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// The block this line would open, if any.
    pub open: Option<BlockOpen<'a>>,
}

impl LineClass<'_> {
    /// Four or more columns of indentation on a non-blank line.
    pub fn is_indented_code(&self) -> bool {
        !self.is_blank && self.indent >= 4
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let (indent, _) = indentation(line);
        let is_blank = is_blank(line);
        LineClass {
            text: line,
            indent,
            is_blank,
            open: if is_blank { None } else { try_open(line) },
        }
    }
}
