use std::collections::HashMap;

use crate::parsing::{span::Span, token::InlineToken};

use super::{
    cursor::Cursor,
    kinds::{Autolink, CodeSpan, Link},
};

/// Parses inline content into a sequence of [`InlineToken`]s.
///
/// # Raw Zone Precedence
/// Code spans are checked first and suppress all other parsing inside them:
/// `` `[x](y)` `` is a code span, not a link. Link labels are parsed
/// recursively, so an image inside a link label surfaces as a child between
/// the link's open and close tokens.
///
/// Labels nest at most [`MAX_LABEL_NESTING`] deep; brackets below that are
/// literal text.
///
/// # Returns
/// Tokens covering the entire input. Unclosed constructs degrade to text;
/// line endings become [`InlineToken::SoftBreak`].
pub fn parse_inline(s: &str) -> Vec<InlineToken> {
    parse_nested(s, 0)
}

/// Link and image labels parsed inside one another stop here.
pub const MAX_LABEL_NESTING: usize = 32;

fn parse_nested(s: &str, depth: usize) -> Vec<InlineToken> {
    let mut cur = Cursor::new(s);
    let mut labels = LabelScan::new(depth);
    let mut out = vec![];
    let mut text = String::new();

    // Helper to flush accumulated text as a Text token
    fn flush_text(out: &mut Vec<InlineToken>, text: &mut String) {
        if !text.is_empty() {
            out.push(InlineToken::Text(std::mem::take(text)));
        }
    }

    while let Some(b) = cur.peek() {
        let parsed = match b {
            CodeSpan::TICK => try_parse_code_span(&mut cur),
            b'!' if labels.open() && cur.starts_with(Link::IMAGE_OPEN) => {
                try_parse_image(&mut cur, &mut labels)
            }
            Link::LABEL_OPEN if labels.open() => try_parse_link(&mut cur, &mut labels),
            Autolink::OPEN => try_parse_autolink(&mut cur),
            _ => None,
        };
        if let Some(tokens) = parsed {
            flush_text(&mut out, &mut text);
            out.extend(tokens);
            continue;
        }

        match b {
            Link::ESCAPE if cur.peek_next().is_some_and(|n| n.is_ascii_punctuation()) => {
                cur.bump();
                if let Some(c) = cur.bump_char() {
                    text.push(c);
                }
            }
            b'\n' => {
                flush_text(&mut out, &mut text);
                out.push(InlineToken::SoftBreak);
                cur.bump();
            }
            CodeSpan::TICK => {
                // An unmatched backtick run is literal as a whole
                let n = cur.run_of(CodeSpan::TICK);
                text.push_str(&"`".repeat(n));
                cur.bump_n(n);
            }
            _ => {
                if let Some(c) = cur.bump_char() {
                    text.push(c);
                }
            }
        }
    }

    flush_text(&mut out, &mut text);
    out
}

/// Flattens inline tokens to their visible text (used for image alt text).
pub fn plain_text(tokens: &[InlineToken]) -> String {
    let mut s = String::new();
    for t in tokens {
        match t {
            InlineToken::Text(text) | InlineToken::Code(text) => s.push_str(text),
            InlineToken::Image { alt, .. } => s.push_str(alt),
            InlineToken::SoftBreak => s.push(' '),
            InlineToken::LinkOpen { .. } | InlineToken::LinkClose => {}
        }
    }
    s
}

/// Attempts to parse a code span starting at the current position.
///
/// The closing backtick run must have the same length as the opening one.
/// On failure, cursor position is restored.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    let n = cur.run_of(CodeSpan::TICK);
    if n == 0 {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(n);
    let inner_start = cur.pos();

    while !cur.eof() {
        if cur.peek() == Some(CodeSpan::TICK) {
            let m = cur.run_of(CodeSpan::TICK);
            if m == n {
                let inner = Span {
                    start: inner_start,
                    end: cur.pos(),
                };
                cur.bump_n(n);
                return Some(vec![InlineToken::Code(CodeSpan::normalize(
                    inner.slice(cur.s),
                ))]);
            }
            cur.bump_n(m);
        } else {
            cur.bump_char();
        }
    }

    // Not closed, restore cursor
    *cur = saved;
    None
}

/// Label bookkeeping for one [`parse_nested`] call.
///
/// A scan from one `[` also matches every bracket it passes over, so each
/// result is remembered by the position of its `[`. Later attempts at those
/// positions answer from the cache and a run of unclosed brackets is
/// scanned once instead of once per bracket.
struct LabelScan {
    depth: usize,
    closes: HashMap<usize, Option<Span>>,
}

impl LabelScan {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            closes: HashMap::new(),
        }
    }

    /// Whether links and images may still open at this depth.
    fn open(&self) -> bool {
        self.depth < MAX_LABEL_NESTING
    }
}

/// Scans a bracketed label starting at `[`, returning the span inside it.
///
/// Nested brackets must balance; escapes and code spans are skipped.
fn scan_label(cur: &mut Cursor<'_>, labels: &mut LabelScan) -> Option<Span> {
    if cur.peek() != Some(Link::LABEL_OPEN) {
        return None;
    }
    let open = cur.pos();
    if let Some(known) = labels.closes.get(&open) {
        let span = (*known)?;
        cur.bump_n(span.end + 1 - open);
        return Some(span);
    }
    cur.bump();
    let start = cur.pos();
    // Positions of the `[`s still waiting for their `]`
    let mut pending = vec![open];

    while let Some(b) = cur.peek() {
        match b {
            Link::ESCAPE => {
                cur.bump();
                cur.bump_char();
            }
            CodeSpan::TICK => {
                if try_parse_code_span(cur).is_none() {
                    let n = cur.run_of(CodeSpan::TICK);
                    cur.bump_n(n);
                }
            }
            Link::LABEL_OPEN => {
                pending.push(cur.pos());
                cur.bump();
            }
            Link::LABEL_CLOSE => {
                let end = cur.pos();
                cur.bump();
                if let Some(inner) = pending.pop() {
                    labels.closes.insert(
                        inner,
                        Some(Span {
                            start: inner + 1,
                            end,
                        }),
                    );
                }
                if pending.is_empty() {
                    return Some(Span { start, end });
                }
            }
            _ => {
                cur.bump_char();
            }
        }
    }

    for unclosed in pending {
        labels.closes.insert(unclosed, None);
    }
    None
}

/// Pushes the character after a backslash escape, or the backslash itself.
fn take_escaped(cur: &mut Cursor<'_>, out: &mut String) {
    if cur.peek_next().is_some_and(|n| n.is_ascii_punctuation()) {
        cur.bump();
    }
    if let Some(c) = cur.bump_char() {
        out.push(c);
    }
}

/// Parses `(destination "title")` starting at `(`.
fn parse_destination_and_title(cur: &mut Cursor<'_>) -> Option<(String, Option<String>)> {
    if cur.peek() != Some(Link::DEST_OPEN) {
        return None;
    }
    cur.bump();
    cur.skip_whitespace();

    let mut href = String::new();
    if cur.peek() == Some(Autolink::OPEN) {
        cur.bump();
        loop {
            match cur.peek()? {
                b'\n' | Autolink::OPEN => return None,
                Autolink::CLOSE => {
                    cur.bump();
                    break;
                }
                Link::ESCAPE => take_escaped(cur, &mut href),
                _ => href.push(cur.bump_char()?),
            }
        }
    } else {
        let mut depth = 0usize;
        while let Some(b) = cur.peek() {
            match b {
                b if b.is_ascii_whitespace() || b.is_ascii_control() => break,
                Link::ESCAPE => take_escaped(cur, &mut href),
                Link::DEST_OPEN => {
                    depth += 1;
                    href.push('(');
                    cur.bump();
                }
                Link::DEST_CLOSE if depth == 0 => break,
                Link::DEST_CLOSE => {
                    depth -= 1;
                    href.push(')');
                    cur.bump();
                }
                _ => href.push(cur.bump_char()?),
            }
        }
        if depth != 0 {
            return None;
        }
    }

    cur.skip_whitespace();
    let title = match cur.peek() {
        Some(q @ (b'"' | b'\'' | b'(')) => {
            let close = if q == b'(' { b')' } else { q };
            cur.bump();
            let mut t = String::new();
            loop {
                match cur.peek()? {
                    b if b == close => {
                        cur.bump();
                        break;
                    }
                    Link::ESCAPE => take_escaped(cur, &mut t),
                    _ => t.push(cur.bump_char()?),
                }
            }
            Some(t)
        }
        _ => None,
    };
    cur.skip_whitespace();

    if cur.peek() != Some(Link::DEST_CLOSE) {
        return None;
    }
    cur.bump();
    Some((href, title))
}

/// Attempts to parse `[label](href "title")`.
///
/// The label is parsed recursively; its tokens sit between the link's open
/// and close. On failure, cursor position is restored.
fn try_parse_link(cur: &mut Cursor<'_>, labels: &mut LabelScan) -> Option<Vec<InlineToken>> {
    let saved = cur.clone();
    let parsed = scan_label(cur, labels).and_then(|label| {
        let (href, title) = parse_destination_and_title(cur)?;
        Some((label, href, title))
    });
    let Some((label, href, title)) = parsed else {
        *cur = saved;
        return None;
    };

    let mut tokens = vec![InlineToken::LinkOpen { href, title }];
    tokens.extend(parse_nested(label.slice(cur.s), labels.depth + 1));
    tokens.push(InlineToken::LinkClose);
    Some(tokens)
}

/// Attempts to parse `![alt](src "title")`.
fn try_parse_image(cur: &mut Cursor<'_>, labels: &mut LabelScan) -> Option<Vec<InlineToken>> {
    let saved = cur.clone();
    cur.bump(); // !
    let parsed = scan_label(cur, labels).and_then(|label| {
        let (src, title) = parse_destination_and_title(cur)?;
        Some((label, src, title))
    });
    let Some((label, src, title)) = parsed else {
        *cur = saved;
        return None;
    };

    let alt = plain_text(&parse_nested(label.slice(cur.s), labels.depth + 1));
    Some(vec![InlineToken::Image { src, alt, title }])
}

/// Attempts to parse an autolink `<scheme:...>` or `<user@host>`.
fn try_parse_autolink(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    let saved = cur.clone();
    cur.bump(); // <
    let start = cur.pos();

    while let Some(b) = cur.peek() {
        match b {
            Autolink::CLOSE => {
                let inner = Span {
                    start,
                    end: cur.pos(),
                }
                .slice(cur.s);
                if let Some(href) = Autolink::href(inner) {
                    cur.bump();
                    return Some(vec![
                        InlineToken::LinkOpen { href, title: None },
                        InlineToken::Text(inner.to_string()),
                        InlineToken::LinkClose,
                    ]);
                }
                break;
            }
            b'\n' | Autolink::OPEN => break,
            _ => {
                cur.bump_char();
            }
        }
    }

    *cur = saved;
    None
}
