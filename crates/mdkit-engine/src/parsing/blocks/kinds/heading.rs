use crate::parsing::lines::indentation;

/// ATX (`#`-prefixed) heading syntax.
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    /// Parses an ATX heading line into `(level, content)`.
    ///
    /// Content is trimmed and has any closing `#` sequence removed.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let (indent, idx) = indentation(line);
        if indent > 3 {
            return None;
        }
        let rest = &line[idx..];
        let level = rest.bytes().take_while(|&b| b == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let after = &rest[level..];
        if !(after.is_empty() || after.starts_with([' ', '\t'])) {
            return None;
        }
        let level = u8::try_from(level).ok()?;
        Some((level, Self::strip_closing(after.trim())))
    }

    fn strip_closing(content: &str) -> &str {
        let without = content.trim_end_matches(Self::MARKER as char);
        if without.is_empty() {
            return without;
        }
        if without.ends_with([' ', '\t']) {
            without.trim_end()
        } else {
            content
        }
    }
}

/// Setext underline (`===` / `---`) below a paragraph line.
pub struct SetextUnderline;

impl SetextUnderline {
    pub fn level(line: &str) -> Option<u8> {
        let (indent, idx) = indentation(line);
        if indent > 3 {
            return None;
        }
        let t = line[idx..].trim_end();
        if t.is_empty() {
            return None;
        }
        if t.bytes().all(|b| b == b'=') {
            Some(1)
        } else if t.bytes().all(|b| b == b'-') {
            Some(2)
        } else {
            None
        }
    }
}
