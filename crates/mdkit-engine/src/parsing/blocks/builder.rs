use crate::parsing::{
    inline::parse_inline,
    lines::{LineCursor, indentation, is_blank, strip_columns},
    token::{BlockTag, Token},
};

use super::{
    classify::MarkdownLineClassifier,
    kinds::{BlockQuote, CodeFence, FenceSig, ListMarker, Paragraph, SetextUnderline, Table},
    open::BlockOpen,
};

/// Containers nested deeper than this are read as paragraph text.
pub const MAX_NESTING: usize = 64;

/// Builds the structural token stream from classified lines.
///
/// Container blocks (blockquotes, list items) collect their lines with the
/// container prefix stripped and recurse into [`BlockBuilder::blocks`], so
/// every open token is closed before the caller continues. Recursion stops
/// at [`MAX_NESTING`] containers.
pub struct BlockBuilder {
    classifier: MarkdownLineClassifier,
    out: Vec<Token>,
    depth: usize,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            classifier: MarkdownLineClassifier,
            out: vec![],
            depth: 0,
        }
    }

    /// Parses `lines` as a document and returns the token stream.
    pub fn build(mut self, lines: &[&str]) -> Vec<Token> {
        self.blocks(lines);
        self.out
    }

    fn blocks(&mut self, lines: &[&str]) {
        let mut cur = LineCursor::new(lines);

        while let Some(line) = cur.peek() {
            let c = self.classifier.classify(line);
            if c.is_blank {
                cur.bump();
                continue;
            }
            if c.is_indented_code() {
                self.indented_code(&mut cur);
                continue;
            }

            match c.open {
                Some(BlockOpen::FencedCode(sig)) => self.fenced_code(&mut cur, &sig),
                Some(BlockOpen::Heading { level, content }) => {
                    cur.bump();
                    self.heading(level, content);
                }
                Some(BlockOpen::ThematicBreak) => {
                    cur.bump();
                    self.out.push(Token::Rule);
                }
                Some(BlockOpen::BlockQuote) if self.depth < MAX_NESTING => {
                    self.blockquote(&mut cur)
                }
                Some(BlockOpen::ListItem(marker)) if self.depth < MAX_NESTING => {
                    self.list(&mut cur, marker)
                }
                None if Table::starts(line, cur.peek_nth(1)) => self.table(&mut cur),
                _ => self.paragraph(&mut cur),
            }
        }
    }

    fn leaf(&mut self, tag: BlockTag, text: &str) {
        self.out.push(Token::Open(tag.clone()));
        self.out.push(Token::inline(text, parse_inline(text)));
        self.out.push(Token::Close(tag));
    }

    fn heading(&mut self, level: u8, content: &str) {
        self.leaf(BlockTag::Heading(level), content);
    }

    fn code_block(&mut self, lang: Option<String>, fenced: bool, body: String) {
        let tag = BlockTag::CodeBlock { lang, fenced };
        self.out.push(Token::Open(tag.clone()));
        self.out.push(Token::Code(body));
        self.out.push(Token::Close(tag));
    }

    fn fenced_code(&mut self, cur: &mut LineCursor<'_, '_>, sig: &FenceSig) {
        cur.bump(); // opening fence

        let mut body = String::new();
        while let Some(line) = cur.bump() {
            if CodeFence::closes(sig, line) {
                break;
            }
            body.push_str(strip_columns(line, sig.indent));
            body.push('\n');
        }
        // Unterminated fence: runs to end of input and is emitted anyway
        self.code_block(sig.lang(), true, body);
    }

    fn indented_code(&mut self, cur: &mut LineCursor<'_, '_>) {
        let mut lines: Vec<&str> = vec![];

        while let Some(line) = cur.peek() {
            if is_blank(line) {
                let run = cur.blank_run();
                match cur.peek_nth(run) {
                    Some(next) if indentation(next).0 >= 4 => {
                        for _ in 0..run {
                            lines.push("");
                            cur.bump();
                        }
                    }
                    _ => break,
                }
                continue;
            }
            if indentation(line).0 < 4 {
                break;
            }
            lines.push(strip_columns(line, 4));
            cur.bump();
        }

        let mut body = lines.join("\n");
        body.push('\n');
        self.code_block(None, false, body);
    }

    fn paragraph(&mut self, cur: &mut LineCursor<'_, '_>) {
        let mut lines: Vec<&str> = vec![];

        while let Some(line) = cur.peek() {
            let c = self.classifier.classify(line);
            if c.is_blank {
                break;
            }
            if !lines.is_empty() {
                if let Some(level) = SetextUnderline::level(line) {
                    cur.bump();
                    self.heading(level, &Paragraph::inline_text(&lines));
                    return;
                }
                if c.open
                    .as_ref()
                    .is_some_and(BlockOpen::can_interrupt_paragraph)
                    || Table::starts(line, cur.peek_nth(1))
                {
                    break;
                }
            }
            lines.push(line);
            cur.bump();
        }

        self.leaf(BlockTag::Paragraph, &Paragraph::inline_text(&lines));
    }

    /// Runs `blocks` over a container's lines one nesting level down.
    fn nested(&mut self, lines: &[&str]) {
        self.depth += 1;
        self.blocks(lines);
        self.depth -= 1;
    }

    fn blockquote(&mut self, cur: &mut LineCursor<'_, '_>) {
        let mut inner: Vec<&str> = vec![];
        let mut tail = LazyTail::default();

        while let Some(line) = cur.peek() {
            if let Some(rest) = BlockQuote::strip_prefix(line) {
                tail.push(&self.classifier, rest);
                inner.push(rest);
                cur.bump();
                continue;
            }
            // Lazy continuation of a quoted paragraph
            let c = self.classifier.classify(line);
            if tail.accepts_lazy(&self.classifier)
                && !c.is_blank
                && c.open.is_none()
                && !c.is_indented_code()
            {
                tail.push(&self.classifier, line);
                inner.push(line);
                cur.bump();
                continue;
            }
            break;
        }

        self.out.push(Token::Open(BlockTag::Blockquote));
        self.nested(&inner);
        self.out.push(Token::Close(BlockTag::Blockquote));
    }

    fn list(&mut self, cur: &mut LineCursor<'_, '_>, first: ListMarker) {
        let tag = if first.is_ordered() {
            BlockTag::OrderedList(first.number)
        } else {
            BlockTag::BulletList
        };
        self.out.push(Token::Open(tag.clone()));

        let mut marker = first;
        while let Some(line) = cur.bump() {
            let item = self.list_item_lines(cur, line, &marker);

            self.out.push(Token::Open(BlockTag::ListItem));
            self.nested(&item);
            self.out.push(Token::Close(BlockTag::ListItem));

            let run = cur.blank_run();
            let next = cur
                .peek_nth(run)
                .map(|l| self.classifier.classify(l))
                .and_then(|c| match c.open {
                    Some(BlockOpen::ListItem(m)) if m.same_list(&marker) => Some(m),
                    _ => None,
                });
            let Some(next) = next else {
                break;
            };
            for _ in 0..run {
                cur.bump();
            }
            marker = next;
        }

        self.out.push(Token::Close(tag));
    }

    /// Collects the lines belonging to one list item, de-indented to the
    /// item's content column.
    fn list_item_lines<'a>(
        &self,
        cur: &mut LineCursor<'_, 'a>,
        first_line: &'a str,
        marker: &ListMarker,
    ) -> Vec<&'a str> {
        let mut item: Vec<&'a str> = vec![];
        let mut tail = LazyTail::default();
        if !marker.empty {
            let first = &first_line[marker.content_offset..];
            tail.push(&self.classifier, first);
            item.push(first);
        }

        while let Some(next) = cur.peek() {
            if is_blank(next) {
                let run = cur.blank_run();
                match cur.peek_nth(run) {
                    Some(after)
                        if !item.is_empty() && indentation(after).0 >= marker.content_column =>
                    {
                        for _ in 0..run {
                            tail.push(&self.classifier, "");
                            item.push("");
                            cur.bump();
                        }
                    }
                    _ => break,
                }
                continue;
            }

            if indentation(next).0 >= marker.content_column {
                let line = strip_columns(next, marker.content_column);
                tail.push(&self.classifier, line);
                item.push(line);
                cur.bump();
                continue;
            }

            // Lazy continuation of the item's paragraph
            let c = self.classifier.classify(next);
            if tail.accepts_lazy(&self.classifier) && c.open.is_none() {
                tail.push(&self.classifier, next);
                item.push(next);
                cur.bump();
                continue;
            }
            break;
        }

        item
    }

    fn table(&mut self, cur: &mut LineCursor<'_, '_>) {
        let Some(header) = cur.bump() else {
            return;
        };
        cur.bump(); // delimiter row

        let header = Table::split_row(header);
        let columns = header.len();

        self.out.push(Token::Open(BlockTag::Table));
        self.table_row(&header, true, columns);

        while let Some(line) = cur.peek() {
            let c = self.classifier.classify(line);
            if c.is_blank || c.open.is_some() || !Table::looks_like_row(line) {
                break;
            }
            cur.bump();
            self.table_row(&Table::split_row(line), false, columns);
        }

        self.out.push(Token::Close(BlockTag::Table));
    }

    /// Emits one row, padding or truncating to the header's column count.
    fn table_row(&mut self, cells: &[String], header: bool, columns: usize) {
        let tag = BlockTag::TableRow { header };
        self.out.push(Token::Open(tag.clone()));
        for i in 0..columns {
            let text = cells.get(i).map_or("", String::as_str);
            self.leaf(BlockTag::TableCell, text);
        }
        self.out.push(Token::Close(tag));
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks whether the lines gathered for a container so far end inside an
/// open paragraph. Only then may an unprefixed line continue it lazily.
#[derive(Default)]
struct LazyTail<'a> {
    fence: Option<FenceSig>,
    paragraph: bool,
    /// Last line when it opened a nested container; whether that container
    /// ends in text is decided on demand.
    container: Option<&'a str>,
}

impl<'a> LazyTail<'a> {
    fn push(&mut self, classifier: &MarkdownLineClassifier, line: &'a str) {
        if let Some(sig) = &self.fence {
            if CodeFence::closes(sig, line) {
                self.fence = None;
            }
            return;
        }

        let c = classifier.classify(line);
        if c.is_blank {
            self.paragraph = false;
            self.container = None;
            return;
        }
        // Indented lines continue an open paragraph and are code otherwise
        if c.is_indented_code() {
            return;
        }
        if self.paragraph && self.container.is_none() && SetextUnderline::level(line).is_some() {
            self.paragraph = false;
            return;
        }

        self.container = None;
        self.paragraph = match c.open {
            None => true,
            Some(open) if self.paragraph && !open.can_interrupt_paragraph() => true,
            Some(BlockOpen::FencedCode(sig)) => {
                self.fence = Some(sig);
                false
            }
            Some(BlockOpen::Heading { .. } | BlockOpen::ThematicBreak) => false,
            Some(BlockOpen::BlockQuote | BlockOpen::ListItem(_)) => {
                self.container = Some(line);
                true
            }
        };
    }

    fn accepts_lazy(&self, classifier: &MarkdownLineClassifier) -> bool {
        self.fence.is_none()
            && self.paragraph
            && self
                .container
                .is_none_or(|line| ends_in_text(classifier, line))
    }
}

/// Whether `line`, after stripping the container markers it opens with,
/// leaves paragraph text.
fn ends_in_text(classifier: &MarkdownLineClassifier, line: &str) -> bool {
    let mut rest = line;
    for _ in 0..MAX_NESTING {
        let c = classifier.classify(rest);
        if c.is_blank || c.is_indented_code() {
            return false;
        }
        rest = match c.open {
            None => return true,
            Some(BlockOpen::BlockQuote) => match BlockQuote::strip_prefix(rest) {
                Some(inner) => inner,
                None => return false,
            },
            Some(BlockOpen::ListItem(marker)) if !marker.empty => &rest[marker.content_offset..],
            Some(_) => return false,
        };
    }
    // Deeper markers are read as text
    true
}
