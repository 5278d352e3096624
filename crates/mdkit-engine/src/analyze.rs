//! # Structure Analyzer
//!
//! Aggregate counts and a top-level skeleton of a document.
//!
//! `content_structure` lists top-level blocks only, while `heading_count`,
//! `link_count` and `image_count` include occurrences nested inside
//! containers. A heading inside a blockquote therefore adds to
//! `heading_count` but shows up in `content_structure` as `blockquote`.
//! Callers depend on both numbers, so the two views are kept separate.

use serde::{Deserialize, Serialize};

use crate::{
    metadata::split_lenient,
    models::Document,
    parsing::{BlockTag, InlineToken, Token, tokenize},
    walk::TokenCursor,
};

const THEMATIC_BREAK: &str = "thematic_break";

/// Counts and skeleton of one document.
///
/// `content_structure` holds one label per top-level block: `heading`,
/// `paragraph`, `list`, `code_block`, `table`, `blockquote`, plus
/// `thematic_break` for a top-level rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub word_count: usize,
    pub heading_count: usize,
    pub link_count: usize,
    pub image_count: usize,
    pub code_block_count: usize,
    pub list_count: usize,
    pub table_count: usize,
    pub metadata_keys: Vec<String>,
    pub content_structure: Vec<String>,
}

/// Splits, tokenizes and analyzes a raw document. Total.
pub fn analyze(raw: &str) -> DocumentAnalysis {
    let doc = split_lenient(raw);
    let tokens = tokenize(&doc.body);
    analyze_tokens(&doc, &tokens)
}

/// Analyzes a document whose body has already been tokenized.
pub fn analyze_tokens(doc: &Document, tokens: &[Token]) -> DocumentAnalysis {
    let mut analysis = DocumentAnalysis {
        word_count: doc.body.split_whitespace().count(),
        metadata_keys: doc.metadata.keys().cloned().collect(),
        ..Default::default()
    };

    let mut cur = TokenCursor::new(tokens);
    while let Some(token) = cur.bump() {
        match token {
            Token::Open(tag) => {
                analysis.content_structure.push(tag.structure_label().to_string());
                match tag {
                    BlockTag::CodeBlock { .. } => analysis.code_block_count += 1,
                    BlockTag::Table => analysis.table_count += 1,
                    t if t.is_list() => analysis.list_count += 1,
                    _ => {}
                }
                count_nested(std::slice::from_ref(token), &mut analysis);
                count_nested(cur.block_body(), &mut analysis);
            }
            Token::Rule => analysis.content_structure.push(THEMATIC_BREAK.to_string()),
            // Stray content outside any block carries no structure
            Token::Close(_) | Token::Inline(_) | Token::Code(_) => {}
        }
    }

    analysis
}

/// Tallies headings, links and images at any depth.
fn count_nested(tokens: &[Token], analysis: &mut DocumentAnalysis) {
    for token in tokens {
        match token {
            Token::Open(BlockTag::Heading(_)) => analysis.heading_count += 1,
            Token::Inline(content) => {
                for child in &content.children {
                    match child {
                        InlineToken::LinkOpen { .. } => analysis.link_count += 1,
                        InlineToken::Image { .. } => analysis.image_count += 1,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(analyze(""), DocumentAnalysis::default());
    }

    #[test]
    fn counts_and_structure() {
        let a = analyze(
            "---\ntitle: T\ntags: [x]\n---\n# Title\n\nSome [link](/a) here.\n\n- a\n- b\n\n```\ncode\n```\n\n| h |\n|---|\n| c |\n\n> quote\n\n---\n",
        );
        assert_eq!(
            a.content_structure,
            vec![
                "heading",
                "paragraph",
                "list",
                "code_block",
                "table",
                "blockquote",
                "thematic_break",
            ]
        );
        assert_eq!(a.heading_count, 1);
        assert_eq!(a.link_count, 1);
        assert_eq!(a.list_count, 1);
        assert_eq!(a.code_block_count, 1);
        assert_eq!(a.table_count, 1);
        assert_eq!(a.metadata_keys, vec!["title", "tags"]);
    }

    #[test]
    fn word_count_uses_body_only() {
        let a = analyze("---\ntitle: many words in metadata\n---\none two\nthree\n");
        assert_eq!(a.word_count, 3);
    }

    #[test]
    fn nested_blocks_count_only_where_documented() {
        let a = analyze("> # Quoted heading\n> - item with ![i](i.png)\n>   ```\n>   x\n>   ```\n");
        assert_eq!(a.content_structure, vec!["blockquote"]);
        // All-depth counts
        assert_eq!(a.heading_count, 1);
        assert_eq!(a.image_count, 1);
        // Top-level-only counts
        assert_eq!(a.list_count, 0);
        assert_eq!(a.code_block_count, 0);
    }

    #[test]
    fn analyze_tokens_matches_analyze() {
        let raw = "# A\n\ntext [l](/l)\n";
        let doc = split_lenient(raw);
        let tokens = tokenize(&doc.body);
        assert_eq!(analyze_tokens(&doc, &tokens), analyze(raw));
    }
}
