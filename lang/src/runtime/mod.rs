use std::fmt::Formatter;

use thiserror::Error;

use crate::{
    runtime::{
        poly::TermList,
        Value::{NumberValue, PolyValue},
    },
    syntax::tree::Expr,
};

pub mod eval;
pub mod numeric;
pub mod poly;
pub mod symbolic;

mod proptests;

pub use eval::evaluate;

#[derive(Debug, Error, PartialEq, Clone)]
#[error("`{expr}` is neither a number nor a polynomial in x")]
pub struct EvalFailure {
    pub expr: Expr,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    NumberValue(f64),
    PolyValue(TermList),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberValue(v) => write!(f, "{}", v),
            PolyValue(terms) => write!(f, "{}", terms),
        }
    }
}
