use std::fmt::Formatter;

use crate::syntax::lex::Operator;

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    BinaryExpr(Operator, Box<Expr>, Box<Expr>),
    UnaryExpr(Operator, Box<Expr>),
    NumberExpr(f64),
    VarExpr,
}

impl Expr {
    pub fn binary(op: Operator, lhs: Expr, rhs: Expr) -> Expr {
        Expr::BinaryExpr(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn unary(op: Operator, operand: Expr) -> Expr {
        Expr::UnaryExpr(op, Box::new(operand))
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::BinaryExpr(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::UnaryExpr(Operator::Derivative, operand) => write!(f, "({} ')", operand),
            Expr::UnaryExpr(op, operand) => write!(f, "({} {})", op, operand),
            Expr::NumberExpr(v) => write!(f, "{}", v),
            Expr::VarExpr => write!(f, "x"),
        }
    }
}
