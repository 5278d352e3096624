use crate::parsing::lines::indentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn byte(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// Signature of a line that opens (or could close) a fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    /// Length of the fence run (3 or more).
    pub len: usize,
    /// Columns of indentation before the fence; stripped from content lines.
    pub indent: usize,
    /// Info string after the fence, trimmed.
    pub info: String,
}

impl FenceSig {
    /// Language tag: the first word of the info string.
    pub fn lang(&self) -> Option<String> {
        self.info.split_whitespace().next().map(str::to_string)
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    pub fn sig(line: &str) -> Option<FenceSig> {
        let (indent, idx) = indentation(line);
        if indent > 3 {
            return None;
        }
        let t = line[idx..].trim_end_matches(['\r', '\n']);
        let kind = if t.starts_with(Self::BACKTICKS) {
            FenceKind::Backticks
        } else if t.starts_with(Self::TILDES) {
            FenceKind::Tildes
        } else {
            return None;
        };
        let len = t.bytes().take_while(|&b| b == kind.byte()).count();
        let info = t[len..].trim();
        // A backtick fence's info string may not contain backticks.
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceSig {
            kind,
            len,
            indent,
            info: info.to_string(),
        })
    }

    /// Whether `line` closes a fence opened with `open`.
    ///
    /// The closer uses the same character, is at least as long, and carries
    /// no info string.
    pub fn closes(open: &FenceSig, line: &str) -> bool {
        matches!(
            Self::sig(line),
            Some(close) if close.kind == open.kind && close.len >= open.len && close.info.is_empty()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        let sig = CodeFence::sig("```rust").unwrap();
        assert_eq!(sig.kind, FenceKind::Backticks);
        assert_eq!(sig.len, 3);
        assert_eq!(sig.lang().as_deref(), Some("rust"));
    }

    #[test]
    fn detect_tilde_fence() {
        let sig = CodeFence::sig("~~~~").unwrap();
        assert_eq!(sig.kind, FenceKind::Tildes);
        assert_eq!(sig.len, 4);
        assert_eq!(sig.lang(), None);
    }

    #[test]
    fn lang_is_first_word_of_info() {
        let sig = CodeFence::sig("``` python title=x").unwrap();
        assert_eq!(sig.lang().as_deref(), Some("python"));
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::sig("hello"), None);
        assert_eq!(CodeFence::sig("``"), None);
        assert_eq!(CodeFence::sig("    ```"), None);
    }

    #[test]
    fn backtick_info_with_backtick_is_not_a_fence() {
        assert_eq!(CodeFence::sig("``` a`b"), None);
    }

    #[test]
    fn closes_matching_fence() {
        let open = CodeFence::sig("```").unwrap();
        assert!(CodeFence::closes(&open, "```"));
        assert!(CodeFence::closes(&open, "`````"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let open = CodeFence::sig("````").unwrap();
        assert!(!CodeFence::closes(&open, "```"));
        assert!(!CodeFence::closes(&open, "~~~~"));
        assert!(!CodeFence::closes(&open, "```` rust"));
    }
}
