//! # Element Extractor
//!
//! Collects per-kind element lists from a token stream in one forward pass.
//! Containers reserve their slot before their children are visited, so an
//! outer quote or list item always precedes the ones nested inside it.

use serde::{Deserialize, Serialize};

use crate::{
    metadata::split_lenient,
    models::Metadata,
    parsing::{BlockTag, InlineContent, InlineToken, Token, tokenize},
};

/// Elements found in a document body, each list in document order.
///
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedElements {
    pub headings: Vec<String>,
    /// Link targets (`href`).
    pub links: Vec<String>,
    /// Image sources (`src`).
    pub images: Vec<String>,
    pub code_blocks: Vec<String>,
    /// Text of every list item, nested items included.
    pub lists: Vec<String>,
    /// Text of every blockquote, nested quotes included.
    pub blockquotes: Vec<String>,
}

/// Result of [`parse`]: metadata, body and the extracted elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub metadata: Metadata,
    pub content: String,
    #[serde(flatten)]
    pub elements: ExtractedElements,
}

/// Splits, tokenizes and extracts a raw document.
pub fn parse(raw: &str) -> ParsedDocument {
    let doc = split_lenient(raw);
    let elements = extract(&tokenize(&doc.body));
    ParsedDocument {
        metadata: doc.metadata,
        content: doc.body,
        elements,
    }
}

/// Extracts elements from a token stream. Total: any stream is accepted.
///
/// Open blocks live on an explicit stack, so nesting depth costs heap rather
/// than call frames. Stray `Close` tokens are ignored and blocks still open
/// at the end of the stream are finished as if closed there.
pub fn extract(tokens: &[Token]) -> ExtractedElements {
    let mut out = ExtractedElements::default();
    let mut stack = vec![Frame::new(Slot::Other)];

    for token in tokens {
        match token {
            Token::Open(tag) => stack.push(Frame::new(Slot::reserve(tag, &mut out))),
            Token::Close(_) => {
                if stack.len() > 1
                    && let Some(frame) = stack.pop()
                {
                    frame.finish(&mut out, &mut stack);
                }
            }
            Token::Inline(content) => {
                collect_targets(content, &mut out);
                if let Some(top) = stack.last_mut() {
                    top.texts.push(content.text.clone());
                }
            }
            Token::Code(body) => out.code_blocks.push(body.clone()),
            Token::Rule => {}
        }
    }

    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            frame.finish(&mut out, &mut stack);
        }
    }
    out
}

/// Where a block's entry goes once its text is known.
enum Slot {
    Heading(usize),
    ListItem(usize),
    Blockquote(usize),
    Other,
}

impl Slot {
    /// Reserves the entry when the block opens, so outer entries precede
    /// the nested ones filled in before them.
    fn reserve(tag: &BlockTag, out: &mut ExtractedElements) -> Self {
        match tag {
            BlockTag::Heading(_) => Slot::Heading(reserve(&mut out.headings)),
            BlockTag::ListItem => Slot::ListItem(reserve(&mut out.lists)),
            BlockTag::Blockquote => Slot::Blockquote(reserve(&mut out.blockquotes)),
            _ => Slot::Other,
        }
    }
}

/// An open block and the inline text seen inside it so far.
struct Frame {
    slot: Slot,
    texts: Vec<String>,
}

impl Frame {
    fn new(slot: Slot) -> Self {
        Self {
            slot,
            texts: vec![],
        }
    }

    /// Fills the reserved entry and hands the text up to the enclosing block.
    fn finish(self, out: &mut ExtractedElements, stack: &mut [Frame]) {
        match self.slot {
            Slot::Heading(i) => out.headings[i] = self.texts.first().cloned().unwrap_or_default(),
            Slot::ListItem(i) => out.lists[i] = self.texts.first().cloned().unwrap_or_default(),
            Slot::Blockquote(i) => out.blockquotes[i] = self.texts.join("\n"),
            Slot::Other => {}
        }
        if let Some(parent) = stack.last_mut() {
            parent.texts.extend(self.texts);
        }
    }
}

fn reserve(list: &mut Vec<String>) -> usize {
    list.push(String::new());
    list.len() - 1
}

fn collect_targets(content: &InlineContent, out: &mut ExtractedElements) {
    for child in &content.children {
        match child {
            InlineToken::LinkOpen { href, .. } => out.links.push(href.clone()),
            InlineToken::Image { src, .. } => out.images.push(src.clone()),
            _ => {}
        }
    }
}
