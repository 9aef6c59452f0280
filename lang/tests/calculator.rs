use lang::{
    runtime::Value,
    syntax::{lex::Operator, parse::ParseError},
    CalcError, Calculator,
};
use pretty_assertions::assert_eq;

fn show(input: &str) -> String {
    match Calculator::default().run(input) {
        Ok(v) => v.to_string(),
        Err(e) => e.to_string(),
    }
}

fn parse_error(input: &str) -> ParseError {
    match Calculator::default().run(input) {
        Err(CalcError::Parse(e)) => e,
        other => panic!("expected a parse error for {}, got {:?}", input, other),
    }
}

#[test]
fn arithmetic() {
    assert_eq!(show("1+2*3"), "7");
    assert_eq!(show("-(1+2*3)*6"), "-42");
    assert_eq!(show("1-2-3"), "-4");
    assert_eq!(show("2^3^2"), "512");
    assert_eq!(show("(1+2)*3"), "9");
    assert_eq!(show("7/2"), "3.5");
}

#[test]
fn constants_and_logarithms() {
    match Calculator::default().run("ln e + pi") {
        Ok(Value::NumberValue(v)) => assert!((v - (1.0 + std::f64::consts::PI)).abs() < 1e-9),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn polynomials() {
    assert_eq!(show("x^2+x"), "x^2+x");
    assert_eq!(show("(x^2+x)'"), "2*x+1");
    assert_eq!(show("(x+1)*(x+1)"), "x^2+2*x+1");
    assert_eq!(show("3*x^2 - x^2"), "2*x^2");
}

#[test]
fn evaluate_at_a_point() {
    assert_eq!(show("x^2+x $ 2"), "6");
    assert_eq!(show("(x^2)' $ 3"), "6");
}

#[test]
fn parse_errors() {
    assert_eq!(parse_error("(1+"), ParseError::RightParenMissing);
    assert_eq!(
        parse_error("+"),
        ParseError::UnaryOperandMissing { op: Operator::Plus }
    );
    match parse_error("1+") {
        ParseError::RhsMissing { op, .. } => assert_eq!(op, Operator::Plus),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unsupported_expressions_fail_to_evaluate() {
    for input in &["ln(x)", "x/2", "(x^-1)'", "2^x"] {
        let res = Calculator::default().run(input);
        assert!(matches!(res, Err(CalcError::Eval(_))), "{}: {:?}", input, res);
    }
}

#[test]
fn unknown_words_fail_to_lex() {
    assert_eq!(show("2 * y"), "LexError: unrecognized identifier `y`");
}
