use super::kinds::{
    AtxHeading, BlockQuote, CodeFence, FenceSig, ListItem, ListMarker, ThematicBreak,
};

/// A block opener detected on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen<'a> {
    FencedCode(FenceSig),
    Heading { level: u8, content: &'a str },
    ThematicBreak,
    BlockQuote,
    ListItem(ListMarker),
}

impl BlockOpen<'_> {
    pub fn can_interrupt_paragraph(&self) -> bool {
        match self {
            BlockOpen::ListItem(marker) => marker.can_interrupt_paragraph(),
            _ => true,
        }
    }
}

/// Detects which block, if any, `line` opens.
///
/// Precedence: fence beats heading beats thematic break beats blockquote
/// beats list item, so `* * *` is a break rather than a bullet.
pub fn try_open(line: &str) -> Option<BlockOpen<'_>> {
    if let Some(sig) = CodeFence::sig(line) {
        return Some(BlockOpen::FencedCode(sig));
    }
    if let Some((level, content)) = AtxHeading::parse(line) {
        return Some(BlockOpen::Heading { level, content });
    }
    if ThematicBreak::matches(line) {
        return Some(BlockOpen::ThematicBreak);
    }
    if BlockQuote::strip_prefix(line).is_some() {
        return Some(BlockOpen::BlockQuote);
    }
    ListItem::marker(line).map(BlockOpen::ListItem)
}
