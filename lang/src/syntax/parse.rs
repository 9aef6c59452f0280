use log::trace;
use thiserror::Error;

use crate::syntax::{
    bindpower::{Infix, BIND_POWER},
    lex::{Operator, Token, TokenKind},
    stream::{TokenStream, TokenView},
    tree::Expr,
};

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParseError {
    /// Nothing usable as an operand: empty input or an operator that
    /// cannot start an expression.
    #[error("expected a number, a constant, `x`, `(` or a prefix operator")]
    NotMatched,

    /// e.g. in `(1+) * 2` the right operand of `1+` is missing.
    #[error("missing right operand for operator `{op}`, while the left operand is {lhs}")]
    RhsMissing { op: Operator, lhs: Box<Expr> },

    #[error("missing operand for operator `{op}`")]
    UnaryOperandMissing { op: Operator },

    #[error("missing right parenthesis")]
    RightParenMissing,

    #[error("unexpected {token} after a complete expression")]
    UnexpectedToken { token: Token },

    #[error("expression tree is deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Precedence-climbing parser driven by [`BIND_POWER`].
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new(DEFAULT_MAX_DEPTH)
    }
}

impl Parser {
    pub fn new(max_depth: usize) -> Parser {
        Parser { max_depth }
    }

    /// Parses the whole stream; leftover tokens are an error.
    pub fn parse(&self, ts: &TokenStream) -> Result<Expr, ParseError> {
        let mut view = ts.view();
        self.parse_complete(&mut view, 0).map(|(expr, _)| expr)
    }

    /// Parses one expression from the front of `view` whose operators all
    /// bind at least as tightly as `min_bp`, leaving the rest unconsumed.
    pub fn parse_view(&self, view: &mut TokenView<'_>, min_bp: u32) -> Result<Expr, ParseError> {
        self.climb(view, min_bp, 0).map(|(expr, _)| expr)
    }

    fn parse_complete(
        &self,
        view: &mut TokenView<'_>,
        depth: usize,
    ) -> Result<(Expr, usize), ParseError> {
        let parsed = self.climb(view, 0, depth)?;
        match view.peek(0) {
            Some(token) => Err(ParseError::UnexpectedToken { token: *token }),
            None => Ok(parsed),
        }
    }

    // Returns the expression with the height of its tree.
    fn climb(
        &self,
        view: &mut TokenView<'_>,
        min_bp: u32,
        depth: usize,
    ) -> Result<(Expr, usize), ParseError> {
        if depth > self.max_depth {
            return Err(self.too_deep());
        }

        let (mut lhs, mut height) = self.parse_operand(view, depth)?;
        self.check_height(height)?;

        while let Some(op) = view.peek(0).and_then(Token::operator) {
            let bp = &BIND_POWER[op];

            if let Some(sbp) = bp.suffix {
                if sbp < min_bp {
                    break;
                }
                view.bump();
                lhs = Expr::unary(op, lhs);
                height += 1;
            } else if let Some(Infix { left, right }) = bp.infix {
                if left < min_bp {
                    break;
                }
                view.bump();
                let (rhs, rhs_height) = match self.climb(view, right, depth + 1) {
                    Ok(parsed) => parsed,
                    Err(ParseError::NotMatched) => {
                        return Err(ParseError::RhsMissing {
                            op,
                            lhs: Box::new(lhs),
                        })
                    }
                    Err(e) => return Err(e),
                };
                lhs = Expr::binary(op, lhs, rhs);
                height = height.max(rhs_height) + 1;
            } else {
                break;
            }

            self.check_height(height)?;
        }

        trace!("climbed to {} (min_bp {})", lhs, min_bp);
        Ok((lhs, height))
    }

    fn parse_operand(
        &self,
        view: &mut TokenView<'_>,
        depth: usize,
    ) -> Result<(Expr, usize), ParseError> {
        let token = view.bump().ok_or(ParseError::NotMatched)?;

        match token.kind {
            TokenKind::Operator(Operator::LParen) => self.parse_group(view, depth),
            TokenKind::Operator(op) => {
                let pbp = BIND_POWER[op].prefix.ok_or(ParseError::NotMatched)?;
                match self.climb(view, pbp, depth + 1) {
                    Ok((operand, height)) => Ok((Expr::unary(op, operand), height + 1)),
                    Err(ParseError::NotMatched) => Err(ParseError::UnaryOperandMissing { op }),
                    Err(e) => Err(e),
                }
            }
            TokenKind::Number(v) => Ok((Expr::NumberExpr(v), 1)),
            TokenKind::Constant(c) => Ok((Expr::NumberExpr(c.value()), 1)),
            TokenKind::Variable => Ok((Expr::VarExpr, 1)),
        }
    }

    // The `(` is already bumped; the group is parsed inside its own subview.
    fn parse_group(
        &self,
        view: &mut TokenView<'_>,
        depth: usize,
    ) -> Result<(Expr, usize), ParseError> {
        let close = view.find_closing().ok_or(ParseError::RightParenMissing)?;
        let mut inner = view.subview(0, close);
        let parsed = self.parse_complete(&mut inner, depth + 1)?;
        view.skip(close + 1);
        Ok(parsed)
    }

    fn check_height(&self, height: usize) -> Result<(), ParseError> {
        if height > self.max_depth {
            Err(self.too_deep())
        } else {
            Ok(())
        }
    }

    fn too_deep(&self) -> ParseError {
        ParseError::TooDeep {
            limit: self.max_depth,
        }
    }
}

pub fn parse(ts: &TokenStream) -> Result<Expr, ParseError> {
    Parser::default().parse(ts)
}
