use crate::{
    runtime::{
        numeric::Numeric,
        poly::{Term, TermList},
    },
    syntax::{
        lex::Operator,
        tree::{
            Expr,
            Expr::{BinaryExpr, VarExpr},
        },
    },
};

/// Recognizes a single monomial: `x`, `x^k`, `c`, `c * x^k` or `x^k * c`,
/// where `k` and `c` fold to numbers.
pub fn term_of(expr: &Expr) -> Option<Term> {
    scaled_power(expr)
        .or_else(|| power_of(expr).map(|exponent| Term::new(1.0, exponent)))
        .or_else(|| expr.eval_numeric().map(Term::constant))
}

/// Builds a term list from monomials joined by `+` and `-` only.
pub fn termlist_of(expr: &Expr) -> Option<TermList> {
    if let Some(term) = term_of(expr) {
        return Some(TermList::from(term));
    }

    match expr {
        BinaryExpr(Operator::Plus, lhs, rhs) => Some(&termlist_of(lhs)? + &termlist_of(rhs)?),
        BinaryExpr(Operator::Minus, lhs, rhs) => Some(&termlist_of(lhs)? - &termlist_of(rhs)?),
        _ => None,
    }
}

fn power_of(expr: &Expr) -> Option<f64> {
    match expr {
        VarExpr => Some(1.0),
        BinaryExpr(Operator::Exponent, base, exponent) if **base == VarExpr => {
            exponent.eval_numeric()
        }
        _ => None,
    }
}

fn scaled_power(expr: &Expr) -> Option<Term> {
    match expr {
        BinaryExpr(Operator::Multiply, lhs, rhs) => {
            coefficient_times_power(lhs, rhs).or_else(|| coefficient_times_power(rhs, lhs))
        }
        _ => None,
    }
}

fn coefficient_times_power(coefficient: &Expr, power: &Expr) -> Option<Term> {
    let exponent = power_of(power)?;
    let coefficient = coefficient.eval_numeric()?;
    Some(Term::new(coefficient, exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{lex::lex, parse::parse};
    use pretty_assertions::assert_eq;

    fn expr(input: &str) -> Expr {
        parse(&lex(input).unwrap()).unwrap()
    }

    fn term(input: &str) -> Option<Term> {
        term_of(&expr(input))
    }

    #[test]
    fn test_monomial_shapes() {
        assert_eq!(term("x"), Some(Term::new(1.0, 1.0)));
        assert_eq!(term("x^3"), Some(Term::new(1.0, 3.0)));
        assert_eq!(term("x^(1/2)"), Some(Term::new(1.0, 0.5)));
        assert_eq!(term("4"), Some(Term::new(4.0, 0.0)));
        assert_eq!(term("2*x^3"), Some(Term::new(2.0, 3.0)));
        assert_eq!(term("x^3*2"), Some(Term::new(2.0, 3.0)));
        assert_eq!(term("3*x"), Some(Term::new(3.0, 1.0)));
        assert_eq!(term("(1+1)*x^2"), Some(Term::new(2.0, 2.0)));
    }

    #[test]
    fn test_non_monomials() {
        assert_eq!(term("x+1"), None);
        assert_eq!(term("x*x"), None);
        assert_eq!(term("x^x"), None);
        assert_eq!(term("2^x"), None);
        assert_eq!(term("-x"), None);
        assert_eq!(term("ln x"), None);
        assert_eq!(term("x/2"), None);
    }

    #[test]
    fn test_termlist_of_sums() {
        let l = termlist_of(&expr("x^2 + 3*x - 4 + x")).unwrap();
        assert_eq!(l.to_string(), "x^2+4*x-4");
    }

    #[test]
    fn test_termlist_of_leaves_products_to_the_dispatcher() {
        assert_eq!(termlist_of(&expr("(x+1)*(x-1)")), None);
        assert_eq!(termlist_of(&expr("x^2 + (x+1)*2")), None);
    }
}
