/// Pipe table syntax.
///
/// A table is a header row containing `|`, followed by a delimiter row such
/// as `| --- | :-: |` with the same number of cells.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    pub fn looks_like_row(line: &str) -> bool {
        line.contains(Self::PIPE)
    }

    /// Splits a row into trimmed cell texts.
    ///
    /// Leading and trailing pipes are optional; `\|` is a literal pipe.
    pub fn split_row(line: &str) -> Vec<String> {
        let mut t = line.trim();
        if let Some(rest) = t.strip_prefix(Self::PIPE) {
            t = rest;
        }
        if t.ends_with(Self::PIPE) && !t.ends_with("\\|") {
            t = &t[..t.len() - 1];
        }

        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut chars = t.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&Self::PIPE) => {
                    cell.push(Self::PIPE);
                    chars.next();
                }
                Self::PIPE => cells.push(std::mem::take(&mut cell).trim().to_string()),
                _ => cell.push(c),
            }
        }
        cells.push(cell.trim().to_string());
        cells
    }

    /// Returns the column count if `line` is a delimiter row.
    pub fn delimiter_columns(line: &str) -> Option<usize> {
        if !line.contains(Self::PIPE) && !line.contains('-') {
            return None;
        }
        let cells = Self::split_row(line);
        let valid = cells.iter().all(|c| {
            let inner = c.strip_prefix(':').unwrap_or(c);
            let inner = inner.strip_suffix(':').unwrap_or(inner);
            !inner.is_empty() && inner.bytes().all(|b| b == b'-')
        });
        valid.then_some(cells.len())
    }

    /// Whether `header` followed by `delimiter` starts a table.
    pub fn starts(header: &str, delimiter: Option<&str>) -> bool {
        let Some(delimiter) = delimiter else {
            return false;
        };
        Self::looks_like_row(header)
            && Self::delimiter_columns(delimiter) == Some(Self::split_row(header).len())
    }
}
