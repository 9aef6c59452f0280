use log::trace;

use crate::{
    runtime::{
        numeric::Numeric,
        poly::{Term, TermList},
        symbolic::termlist_of,
        EvalFailure,
        Value::{self, NumberValue, PolyValue},
    },
    syntax::{
        lex::Operator,
        tree::{
            Expr,
            Expr::{BinaryExpr, UnaryExpr},
        },
    },
};

/// Numeric folding first, term lists second.
pub fn evaluate(expr: &Expr) -> Result<Value, EvalFailure> {
    if let Some(v) = expr.eval_numeric() {
        return Ok(NumberValue(v));
    }

    trace!("{} is not numeric, trying term lists", expr);
    termlist_calc(expr)
        .map(PolyValue)
        .ok_or_else(|| EvalFailure { expr: expr.clone() })
}

/// Reduces an expression to a term list, combining sub-expressions with
/// `+ - *`, differentiating under `'` and evaluating at a point under `$`.
pub fn termlist_calc(expr: &Expr) -> Option<TermList> {
    if let Some(terms) = termlist_of(expr) {
        return Some(terms);
    }

    match expr {
        BinaryExpr(Operator::When, lhs, at) => {
            let at = at.eval_numeric()?;
            let terms = termlist_calc(lhs)?;
            Some(TermList::from(Term::constant(terms.eval(at))))
        }
        BinaryExpr(op @ Operator::Plus, lhs, rhs)
        | BinaryExpr(op @ Operator::Minus, lhs, rhs)
        | BinaryExpr(op @ Operator::Multiply, lhs, rhs) => {
            let lhs = termlist_calc(lhs)?;
            let rhs = termlist_calc(rhs)?;
            match op {
                Operator::Plus => Some(&lhs + &rhs),
                Operator::Minus => Some(&lhs - &rhs),
                _ => Some(&lhs * &rhs),
            }
        }
        UnaryExpr(Operator::Derivative, operand) => termlist_calc(operand)?.derivative(),
        UnaryExpr(Operator::Plus, operand) => termlist_calc(operand),
        UnaryExpr(Operator::Minus, operand) => termlist_calc(operand).map(|terms| -terms),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{lex::lex, parse::parse};
    use pretty_assertions::assert_eq;

    fn run(input: &str) -> Result<String, EvalFailure> {
        evaluate(&parse(&lex(input).unwrap()).unwrap()).map(|v| v.to_string())
    }

    #[test]
    fn test_numbers_take_the_numeric_path() {
        assert_eq!(run("1+2*3"), Ok("7".to_owned()));
        assert_eq!(run("-(1+2*3)*6"), Ok("-42".to_owned()));
        assert_eq!(run("2.5*2"), Ok("5".to_owned()));
        assert_eq!(run("1/4"), Ok("0.25".to_owned()));
    }

    #[test]
    fn test_polynomials() {
        assert_eq!(run("x^2+x"), Ok("x^2+x".to_owned()));
        assert_eq!(run("3*x - x + 1"), Ok("2*x+1".to_owned()));
        assert_eq!(run("x - x"), Ok("0*x".to_owned()));
    }

    #[test]
    fn test_products() {
        assert_eq!(run("(x+1)*(x-1)"), Ok("x^2+0*x-1".to_owned()));
        assert_eq!(run("2*(x+1)"), Ok("2*x+2".to_owned()));
        assert_eq!(run("x*x*x"), Ok("x^3".to_owned()));
    }

    #[test]
    fn test_derivatives() {
        assert_eq!(run("(x^2+x)'"), Ok("2*x+1".to_owned()));
        assert_eq!(run("(x^3)''"), Ok("6*x".to_owned()));
        assert_eq!(run("((x+1)*(x+1))'"), Ok("2*x+2".to_owned()));
        assert_eq!(run("(x^2+5)'"), Ok("2*x+0".to_owned()));
    }

    #[test]
    fn test_negation() {
        assert_eq!(run("-x"), Ok("-x".to_owned()));
        assert_eq!(run("-(x^2-x)"), Ok("-x^2+x".to_owned()));
        assert_eq!(run("+x"), Ok("x".to_owned()));
    }

    #[test]
    fn test_evaluate_at() {
        assert_eq!(run("x^2+x $ 2"), Ok("6".to_owned()));
        assert_eq!(run("(x^3)' $ 2"), Ok("12".to_owned()));
        assert_eq!(run("3 $ 2"), Ok("3".to_owned()));
    }

    #[test]
    fn test_failures() {
        for input in &["ln x", "ln(x)", "x/2", "2^x", "(x^-1)'", "x $ x", "(x+1)^2"] {
            let expr = parse(&lex(input).unwrap()).unwrap();
            assert_eq!(evaluate(&expr), Err(EvalFailure { expr }), "{}", input);
        }
    }

    #[test]
    fn test_failure_message() {
        let expr = parse(&lex("ln x").unwrap()).unwrap();
        assert_eq!(
            evaluate(&expr).unwrap_err().to_string(),
            "`(ln x)` is neither a number nor a polynomial in x"
        );
    }
}
