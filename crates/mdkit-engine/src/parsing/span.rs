/// A byte range `[start, end)` into the text being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Slices `s` with this span, returning `""` when out of bounds.
    pub fn slice(self, s: &str) -> &str {
        s.get(self.start..self.end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_in_bounds() {
        let sp = Span { start: 6, end: 11 };
        assert_eq!(sp.slice("hello world"), "world");
    }

    #[test]
    fn slice_out_of_bounds_is_empty() {
        let sp = Span { start: 3, end: 40 };
        assert_eq!(sp.slice("short"), "");
    }
}
