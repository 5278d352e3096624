/// Tab stops are every four columns.
const TAB_WIDTH: usize = 4;

/// Splits text into lines without their `\n` / `\r\n` terminators.
///
/// A trailing newline does not produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Returns `(columns, bytes)` of leading whitespace, expanding tabs.
pub fn indentation(line: &str) -> (usize, usize) {
    let mut cols = 0usize;
    let mut bytes = 0usize;
    for b in line.bytes() {
        match b {
            b' ' => cols += 1,
            b'\t' => cols += TAB_WIDTH - (cols % TAB_WIDTH),
            _ => break,
        }
        bytes += 1;
    }
    (cols, bytes)
}

/// Removes up to `n` columns of leading whitespace.
///
/// A tab that straddles the boundary is consumed whole.
pub fn strip_columns(line: &str, n: usize) -> &str {
    let mut cols = 0usize;
    let mut idx = 0usize;
    for b in line.bytes() {
        if cols >= n {
            break;
        }
        match b {
            b' ' => cols += 1,
            b'\t' => cols += TAB_WIDTH - (cols % TAB_WIDTH),
            _ => break,
        }
        idx += 1;
    }
    &line[idx..]
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A cursor over a slice of lines, threaded explicitly through the block parser.
pub struct LineCursor<'l, 'a> {
    lines: &'l [&'a str],
    i: usize,
}

impl<'l, 'a> LineCursor<'l, 'a> {
    pub fn new(lines: &'l [&'a str]) -> Self {
        Self { lines, i: 0 }
    }

    /// Peeks at the current line without advancing.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.i).copied()
    }

    /// Peeks `n` lines ahead of the current one.
    pub fn peek_nth(&self, n: usize) -> Option<&'a str> {
        self.lines.get(self.i + n).copied()
    }

    pub fn bump(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.i += 1;
        Some(line)
    }

    /// Number of blank lines starting at the current position.
    pub fn blank_run(&self) -> usize {
        self.lines[self.i.min(self.lines.len())..]
            .iter()
            .take_while(|l| is_blank(l))
            .count()
    }
}
