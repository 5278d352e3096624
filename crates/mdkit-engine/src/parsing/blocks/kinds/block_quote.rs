use crate::parsing::lines::indentation;

/// Blockquote block type with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered in
/// classifier code.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips one level of blockquote prefix, returning the remainder.
    ///
    /// Up to three spaces of indentation may precede the `>`; one space after
    /// it is part of the marker. Returns `None` for lines that are not quoted.
    pub fn strip_prefix(line: &str) -> Option<&str> {
        let (cols, idx) = indentation(line);
        if cols > 3 {
            return None;
        }
        let rest = line[idx..].strip_prefix(Self::PREFIX)?;
        Some(rest.strip_prefix([' ', '\t']).unwrap_or(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_prefix("hello"), None);
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_prefix("> hello"), Some("hello"));
    }

    #[test]
    fn strip_without_space() {
        assert_eq!(BlockQuote::strip_prefix(">hello"), Some("hello"));
    }

    #[test]
    fn strip_keeps_inner_quote() {
        assert_eq!(BlockQuote::strip_prefix("> > hello"), Some("> hello"));
    }

    #[test]
    fn indented_four_is_not_a_quote() {
        assert_eq!(BlockQuote::strip_prefix("    > code"), None);
    }
}
