/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the default leaf block
/// when no other block opener matches. Inline parsing is applied
/// to paragraph content.
pub struct Paragraph;

impl Paragraph {
    /// Joins paragraph lines into inline source: leading indentation is
    /// dropped per line and trailing whitespace of the whole is trimmed.
    pub fn inline_text(lines: &[&str]) -> String {
        lines
            .iter()
            .map(|l| l.trim_start())
            .collect::<Vec<_>>()
            .join("\n")
            .trim_end()
            .to_string()
    }
}
