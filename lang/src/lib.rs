use log::debug;
use thiserror::Error;

use crate::{
    runtime::{evaluate, EvalFailure, Value},
    syntax::{
        lex::{lex, LexError},
        parse::{ParseError, Parser},
        stream::TokenStream,
        tree::Expr,
    },
};

pub mod runtime;
pub mod syntax;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum CalcError {
    #[error("LexError: {0}")]
    Lex(#[from] LexError),

    #[error("ParseError: {0}")]
    Parse(#[from] ParseError),

    #[error("EvalError: {0}")]
    Eval(#[from] EvalFailure),
}

/// Runs a line of input through lexing, parsing and evaluation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator {
    parser: Parser,
}

impl Calculator {
    pub fn new(max_depth: usize) -> Calculator {
        Calculator {
            parser: Parser::new(max_depth),
        }
    }

    pub fn tokenize(&self, input: &str) -> Result<TokenStream, CalcError> {
        let ts = lex(input)?;
        debug!("tokens: {}", ts);
        Ok(ts)
    }

    pub fn parse(&self, ts: &TokenStream) -> Result<Expr, CalcError> {
        let expr = self.parser.parse(ts)?;
        debug!("ast: {}", expr);
        Ok(expr)
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value, CalcError> {
        let value = evaluate(expr)?;
        debug!("value: {}", value);
        Ok(value)
    }

    pub fn run(&self, input: &str) -> Result<Value, CalcError> {
        let ts = self.tokenize(input)?;
        let expr = self.parse(&ts)?;
        self.evaluate(&expr)
    }
}
