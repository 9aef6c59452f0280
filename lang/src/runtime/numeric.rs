use crate::syntax::{
    lex::Operator,
    tree::{
        Expr,
        Expr::{BinaryExpr, NumberExpr, UnaryExpr, VarExpr},
    },
};

pub trait Numeric {
    /// Folds the expression into a number; `None` when it mentions `x`
    /// or uses an operator that has no numeric meaning in that position.
    fn eval_numeric(&self) -> Option<f64>;
}

impl<T: Numeric> Numeric for Box<T> {
    fn eval_numeric(&self) -> Option<f64> {
        (**self).eval_numeric()
    }
}

impl Numeric for Expr {
    fn eval_numeric(&self) -> Option<f64> {
        match self {
            BinaryExpr(op, lhs, rhs) => fold_binary(*op, lhs.eval_numeric()?, rhs.eval_numeric()?),
            UnaryExpr(op, operand) => fold_unary(*op, operand.eval_numeric()?),
            NumberExpr(v) => Some(*v),
            VarExpr => None,
        }
    }
}

fn fold_binary(op: Operator, lhs: f64, rhs: f64) -> Option<f64> {
    match op {
        Operator::Plus => Some(lhs + rhs),
        Operator::Minus => Some(lhs - rhs),
        Operator::Multiply => Some(lhs * rhs),
        Operator::Divide => Some(lhs / rhs),
        Operator::Exponent => Some(lhs.powf(rhs)),
        _ => None,
    }
}

fn fold_unary(op: Operator, operand: f64) -> Option<f64> {
    match op {
        Operator::Plus => Some(operand),
        Operator::Minus => Some(-operand),
        Operator::Ln => Some(operand.ln()),
        // derivative of a constant
        Operator::Derivative => Some(0.0),
        _ => None,
    }
}
