use crate::parsing::Token;

/// A forward cursor over a token stream.
///
/// Consumers never index the stream directly; they bump tokens in order and
/// let the cursor find where a block ends.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    i: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, i: 0 }
    }

    pub fn bump(&mut self) -> Option<&'t Token> {
        let t = self.tokens.get(self.i)?;
        self.i += 1;
        Some(t)
    }

    /// Consumes the rest of the block whose `Open` was just bumped and
    /// returns the tokens between it and its matching `Close`.
    ///
    /// An unbalanced stream yields everything up to the end.
    pub fn block_body(&mut self) -> &'t [Token] {
        let start = self.i;
        let mut depth = 0usize;
        while let Some(t) = self.bump() {
            match t {
                Token::Open(_) => depth += 1,
                Token::Close(_) if depth == 0 => return &self.tokens[start..self.i - 1],
                Token::Close(_) => depth -= 1,
                _ => {}
            }
        }
        &self.tokens[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tokenize;

    #[test]
    fn block_body_skips_nested_blocks() {
        let tokens = tokenize("> - a\n> - b\n\nafter\n");
        let mut cur = TokenCursor::new(&tokens);
        assert!(matches!(cur.bump(), Some(Token::Open(_))));
        let body = cur.block_body();
        assert!(matches!(body.first(), Some(Token::Open(_))));
        assert!(matches!(body.last(), Some(Token::Close(_))));
        // Next top-level block is the paragraph
        assert!(matches!(cur.bump(), Some(Token::Open(_))));
        let next = cur.bump();
        assert!(matches!(next, Some(Token::Inline(c)) if c.text == "after"));
    }

    #[test]
    fn unbalanced_stream_runs_to_end() {
        let tokens = vec![Token::Rule, Token::Rule];
        let mut cur = TokenCursor::new(&tokens);
        assert_eq!(cur.block_body().len(), 2);
        assert!(cur.bump().is_none());
    }
}
