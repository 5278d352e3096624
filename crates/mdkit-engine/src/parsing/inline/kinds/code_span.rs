/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones" - no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Normalizes raw span content: line endings become spaces and one
    /// surrounding space is stripped when present on both sides.
    pub fn normalize(raw: &str) -> String {
        let s = raw.replace('\n', " ");
        let stripped = s
            .strip_prefix(' ')
            .and_then(|t| t.strip_suffix(' '))
            .filter(|_| !s.trim().is_empty());
        stripped.map_or(s.clone(), str::to_string)
    }
}
