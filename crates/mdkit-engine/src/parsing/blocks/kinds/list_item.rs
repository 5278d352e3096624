use crate::parsing::lines::{indentation, is_blank};

/// The delimiter that identifies which list an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDelimiter {
    /// `-`, `*` or `+`.
    Bullet(u8),
    /// `1.` or `1)`; carries the punctuation byte.
    Ordered(u8),
}

/// A list item marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub delimiter: ListDelimiter,
    /// Number of an ordered item (unused for bullets).
    pub number: u64,
    /// Column where the item's content starts; continuation lines must be
    /// indented at least this far.
    pub content_column: usize,
    /// Byte offset of the content on the marker line.
    pub content_offset: usize,
    /// True when nothing follows the marker on its line.
    pub empty: bool,
}

impl ListMarker {
    pub fn is_ordered(&self) -> bool {
        matches!(self.delimiter, ListDelimiter::Ordered(_))
    }

    /// Items continue the same list only when their delimiters match.
    pub fn same_list(&self, other: &ListMarker) -> bool {
        self.delimiter == other.delimiter
    }

    /// Whether this item may interrupt a running paragraph.
    pub fn can_interrupt_paragraph(&self) -> bool {
        !self.empty && (!self.is_ordered() || self.number == 1)
    }
}

pub struct ListItem;

impl ListItem {
    pub const BULLETS: [u8; 3] = [b'-', b'*', b'+'];
    pub const ORDERED_DELIMITERS: [u8; 2] = [b'.', b')'];
    /// Ordered markers are limited to nine digits.
    const MAX_DIGITS: usize = 9;

    pub fn marker(line: &str) -> Option<ListMarker> {
        let (indent, idx) = indentation(line);
        if indent > 3 {
            return None;
        }
        let rest = &line[idx..];
        let bytes = rest.as_bytes();

        let (delimiter, number, marker_len) = match bytes.first() {
            Some(&b) if Self::BULLETS.contains(&b) => (ListDelimiter::Bullet(b), 0, 1),
            Some(b) if b.is_ascii_digit() => {
                let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
                if digits > Self::MAX_DIGITS {
                    return None;
                }
                let delim = *bytes.get(digits)?;
                if !Self::ORDERED_DELIMITERS.contains(&delim) {
                    return None;
                }
                let number = rest[..digits].parse().ok()?;
                (ListDelimiter::Ordered(delim), number, digits + 1)
            }
            _ => return None,
        };

        let after = &rest[marker_len..];
        if is_blank(after) {
            return Some(ListMarker {
                delimiter,
                number,
                content_column: indent + marker_len + 1,
                content_offset: line.len(),
                empty: true,
            });
        }
        if !after.starts_with([' ', '\t']) {
            return None;
        }
        let (spaces, space_bytes) = indentation(after);
        // Five or more spaces means indented code inside the item; the
        // marker then owns exactly one space.
        let (pad_cols, pad_bytes) = if spaces > 4 { (1, 1) } else { (spaces, space_bytes) };
        Some(ListMarker {
            delimiter,
            number,
            content_column: indent + marker_len + pad_cols,
            content_offset: idx + marker_len + pad_bytes,
            empty: false,
        })
    }
}
