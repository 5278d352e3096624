use serde::{Deserialize, Serialize};

/// A block-level container or leaf that opens and closes in the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockTag {
    /// ATX or setext heading, level 1..=6.
    Heading(u8),
    Paragraph,
    BulletList,
    /// Ordered list with the number of its first item.
    OrderedList(u64),
    ListItem,
    Blockquote,
    /// Fenced (```` ``` ```` / `~~~`) or indented code block.
    CodeBlock {
        /// First word of the fence info string, if any.
        lang: Option<String>,
        fenced: bool,
    },
    Table,
    TableRow {
        header: bool,
    },
    TableCell,
}

impl BlockTag {
    /// Label used in the analysis skeleton for a top-level block.
    pub fn structure_label(&self) -> &'static str {
        match self {
            BlockTag::Heading(_) => "heading",
            BlockTag::Paragraph => "paragraph",
            BlockTag::BulletList | BlockTag::OrderedList(_) => "list",
            BlockTag::ListItem => "list_item",
            BlockTag::Blockquote => "blockquote",
            BlockTag::CodeBlock { .. } => "code_block",
            BlockTag::Table => "table",
            BlockTag::TableRow { .. } => "table_row",
            BlockTag::TableCell => "table_cell",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, BlockTag::BulletList | BlockTag::OrderedList(_))
    }
}

/// Inline content of a heading, paragraph or table cell.
///
/// `text` is the raw inline source with container markers already removed;
/// `children` is its parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineContent {
    pub text: String,
    pub children: Vec<InlineToken>,
}

/// An inline event nested inside an [`InlineContent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineToken {
    Text(String),
    /// Code span content. Raw zone: nothing inside is parsed.
    Code(String),
    LinkOpen {
        href: String,
        title: Option<String>,
    },
    LinkClose,
    Image {
        src: String,
        alt: String,
        title: Option<String>,
    },
    SoftBreak,
}

/// One typed event of the structural token stream.
///
/// Open/close pairs always balance. Inline content and raw code sit between
/// the open and close of the block that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Open(BlockTag),
    Close(BlockTag),
    Inline(InlineContent),
    /// Raw code block body, unprocessed.
    Code(String),
    /// Thematic break (`---`, `***`, `___`).
    Rule,
}

impl Token {
    pub fn inline(text: impl Into<String>, children: Vec<InlineToken>) -> Self {
        Token::Inline(InlineContent {
            text: text.into(),
            children,
        })
    }
}
