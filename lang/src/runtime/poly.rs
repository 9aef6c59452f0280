use std::{
    fmt::Formatter,
    iter::FromIterator,
    ops::{Add, Mul, Neg, Sub},
};

/// `coefficient * x^exponent`; exponents are not restricted to integers.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Term {
    pub coefficient: f64,
    pub exponent: f64,
}

impl Term {
    pub fn new(coefficient: f64, exponent: f64) -> Term {
        Term {
            coefficient,
            exponent,
        }
    }

    pub fn constant(coefficient: f64) -> Term {
        Term::new(coefficient, 0.0)
    }

    pub fn derivative(&self) -> Option<Term> {
        if self.exponent == 0.0 {
            Some(Term::new(0.0, 0.0))
        } else if self.exponent == -1.0 {
            None
        } else {
            Some(Term::new(
                self.coefficient * self.exponent,
                self.exponent - 1.0,
            ))
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.coefficient * x.powf(self.exponent)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (c, e) = (self.coefficient, self.exponent);
        if e == 0.0 {
            write!(f, "{}", c)
        } else if c == 1.0 && e == 1.0 {
            write!(f, "x")
        } else if c == -1.0 && e == 1.0 {
            write!(f, "-x")
        } else if c == 1.0 {
            write!(f, "x^{}", e)
        } else if c == -1.0 {
            write!(f, "-x^{}", e)
        } else if e == 1.0 {
            write!(f, "{}*x", c)
        } else {
            write!(f, "{}*x^{}", c, e)
        }
    }
}

/// A polynomial in `x` as a sum of terms. Holds at most one term per
/// exponent, sorted by ascending exponent. Zero coefficients produced by
/// `+`, `-` and `*` are kept.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TermList {
    terms: Vec<Term>,
}

impl TermList {
    pub fn new() -> TermList {
        TermList::default()
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Fails as a whole when any term has exponent `-1`.
    pub fn derivative(&self) -> Option<TermList> {
        let mut terms = Vec::with_capacity(self.terms.len());

        for term in &self.terms {
            let d = term.derivative()?;
            if d.coefficient != 0.0 || term.exponent == 0.0 {
                terms.push(d);
            }
        }

        Some(terms.into_iter().collect())
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.terms.iter().map(|term| term.eval(x)).sum()
    }

    fn merge<I: IntoIterator<Item = Term>>(terms: I) -> TermList {
        let mut sorted: Vec<Term> = terms.into_iter().collect();
        sorted.sort_by(|a, b| a.exponent.total_cmp(&b.exponent));

        let mut merged: Vec<Term> = Vec::with_capacity(sorted.len());
        for term in sorted {
            match merged.last_mut() {
                Some(last) if last.exponent == term.exponent => {
                    last.coefficient += term.coefficient
                }
                _ => merged.push(term),
            }
        }

        for term in merged.iter_mut() {
            // drop the sign of zero so `-0` never renders
            if term.coefficient == 0.0 {
                term.coefficient = 0.0;
            }
        }

        TermList { terms: merged }
    }
}

impl From<Term> for TermList {
    fn from(term: Term) -> TermList {
        TermList::merge(std::iter::once(term))
    }
}

impl FromIterator<Term> for TermList {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> TermList {
        TermList::merge(iter)
    }
}

impl<'a> Add<&'a TermList> for &'a TermList {
    type Output = TermList;

    fn add(self, rhs: &'a TermList) -> TermList {
        TermList::merge(self.terms.iter().chain(rhs.terms.iter()).copied())
    }
}

impl<'a> Sub<&'a TermList> for &'a TermList {
    type Output = TermList;

    fn sub(self, rhs: &'a TermList) -> TermList {
        let negated = rhs
            .terms
            .iter()
            .map(|t| Term::new(-t.coefficient, t.exponent));
        TermList::merge(self.terms.iter().copied().chain(negated))
    }
}

impl<'a> Mul<&'a TermList> for &'a TermList {
    type Output = TermList;

    fn mul(self, rhs: &'a TermList) -> TermList {
        TermList::merge(self.terms.iter().flat_map(|l| {
            rhs.terms
                .iter()
                .map(move |r| Term::new(l.coefficient * r.coefficient, l.exponent + r.exponent))
        }))
    }
}

impl Neg for TermList {
    type Output = TermList;

    fn neg(self) -> TermList {
        self.terms
            .into_iter()
            .map(|t| Term::new(-t.coefficient, t.exponent))
            .collect()
    }
}

impl std::fmt::Display for TermList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut terms = self.terms.iter().rev();

        match terms.next() {
            Some(first) => write!(f, "{}", first)?,
            None => return write!(f, "0"),
        }

        for term in terms {
            if term.coefficient < 0.0 {
                write!(f, "{}", term)?;
            } else {
                write!(f, "+{}", term)?;
            }
        }

        Ok(())
    }
}
