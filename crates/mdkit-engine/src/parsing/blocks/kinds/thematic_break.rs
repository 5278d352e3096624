use crate::parsing::lines::indentation;

pub struct ThematicBreak;

impl ThematicBreak {
    pub const CHARS: [u8; 3] = [b'-', b'*', b'_'];

    /// Three or more of the same break character, optionally spaced.
    pub fn matches(line: &str) -> bool {
        let (indent, idx) = indentation(line);
        if indent > 3 {
            return false;
        }
        let rest = line[idx..].as_bytes();
        let Some(&first) = rest.first() else {
            return false;
        };
        if !Self::CHARS.contains(&first) {
            return false;
        }
        let mut count = 0usize;
        for &b in rest {
            if b == first {
                count += 1;
            } else if b != b' ' && b != b'\t' {
                return false;
            }
        }
        count >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_breaks() {
        assert!(ThematicBreak::matches("---"));
        assert!(ThematicBreak::matches("* * *"));
        assert!(ThematicBreak::matches("___ "));
    }

    #[test]
    fn rejects_non_breaks() {
        assert!(!ThematicBreak::matches("--"));
        assert!(!ThematicBreak::matches("-*-"));
        assert!(!ThematicBreak::matches("- item"));
        assert!(!ThematicBreak::matches(""));
    }
}
