use std::fmt::Formatter;

use crate::syntax::lex::{Operator, Token};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> TokenStream {
        TokenStream { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn view(&self) -> TokenView<'_> {
        TokenView {
            tokens: &self.tokens,
            index: 0,
            end: self.tokens.len(),
        }
    }
}

impl std::fmt::Display for TokenStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let shown: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", shown.join(" "))
    }
}

/// A cursor over `[index, end)` of a token stream.
#[derive(Debug, Clone, Copy)]
pub struct TokenView<'a> {
    tokens: &'a [Token],
    index: usize,
    end: usize,
}

impl<'a> TokenView<'a> {
    pub fn peek(&self, n: usize) -> Option<&'a Token> {
        let at = self.index + n;
        if at < self.end {
            self.tokens.get(at)
        } else {
            None
        }
    }

    pub fn bump(&mut self) -> Option<&'a Token> {
        let token = self.peek(0)?;
        self.index += 1;
        Some(token)
    }

    pub fn skip(&mut self, n: usize) {
        self.index = (self.index + n).min(self.end);
    }

    pub fn len(&self) -> usize {
        self.end - self.index
    }

    pub fn is_empty(&self) -> bool {
        self.index >= self.end
    }

    /// Carves `len` tokens starting `offset` tokens ahead; clamped to this view.
    pub fn subview(&self, offset: usize, len: usize) -> TokenView<'a> {
        debug_assert!(offset + len <= self.len(), "subview exceeded available range");
        let index = (self.index + offset).min(self.end);
        TokenView {
            tokens: self.tokens,
            index,
            end: (index + len).min(self.end),
        }
    }

    /// Offset of the `)` closing a group whose `(` was just bumped.
    pub fn find_closing(&self) -> Option<usize> {
        let mut depth = 1usize;
        for offset in 0..self.len() {
            match self.peek(offset).and_then(Token::operator) {
                Some(Operator::LParen) => depth += 1,
                Some(Operator::RParen) => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(offset);
                    }
                }
                _ => (),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::lex::{lex, Operator, TokenKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_peek_does_not_consume() {
        let ts = lex("1 + 2").unwrap();
        let view = ts.view();
        assert_eq!(view.peek(0).map(|t| t.kind), Some(TokenKind::Number(1.0)));
        assert_eq!(
            view.peek(1).map(|t| t.kind),
            Some(TokenKind::Operator(Operator::Plus))
        );
        assert_eq!(view.peek(3), None);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_bump_until_empty() {
        let ts = lex("x ^ 2").unwrap();
        let mut view = ts.view();
        assert_eq!(view.bump().map(|t| t.kind), Some(TokenKind::Variable));
        assert_eq!(view.len(), 2);
        view.bump();
        view.bump();
        assert!(view.is_empty());
        assert_eq!(view.bump(), None);
    }

    #[test]
    fn test_subview_is_bounded() {
        let ts = lex("1 2 3 4 5").unwrap();
        let mut view = ts.view();
        view.bump();
        let mut sub = view.subview(1, 2);
        let values: Vec<TokenKind> = std::iter::from_fn(|| sub.bump()).map(|t| t.kind).collect();
        assert_eq!(values, vec![TokenKind::Number(3.0), TokenKind::Number(4.0)]);
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_find_closing_skips_nested_groups() {
        let ts = lex("(1 + (2)) * 3)").unwrap();
        let mut view = ts.view();
        view.bump();
        assert_eq!(view.find_closing(), Some(5));

        let ts = lex("(1 + (2)").unwrap();
        let mut view = ts.view();
        view.bump();
        assert_eq!(view.find_closing(), None);
    }
}
