use std::fmt::Formatter;

use log::trace;
use thiserror::Error;

use crate::syntax::{
    lex::TokenKind::{Constant as ConstantToken, Number, Operator as OperatorToken, Variable},
    stream::TokenStream,
};

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Exponent,
    Ln,
    LParen,
    RParen,
    Derivative,
    When,
}

impl Operator {
    pub const COUNT: usize = 10;

    pub const ALL: [Operator; Operator::COUNT] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Multiply,
        Operator::Divide,
        Operator::Exponent,
        Operator::Ln,
        Operator::LParen,
        Operator::RParen,
        Operator::Derivative,
        Operator::When,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Exponent => "^",
            Operator::Ln => "ln",
            Operator::LParen => "(",
            Operator::RParen => ")",
            Operator::Derivative => "'",
            Operator::When => "$",
        }
    }

    fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Exponent),
            '(' => Some(Operator::LParen),
            ')' => Some(Operator::RParen),
            '\'' => Some(Operator::Derivative),
            '$' => Some(Operator::When),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Constant {
    E,
    Pi,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::E => std::f64::consts::E,
            Constant::Pi => std::f64::consts::PI,
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constant::E => write!(f, "e"),
            Constant::Pi => write!(f, "pi"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TokenKind {
    Number(f64),
    Operator(Operator),
    Constant(Constant),
    Variable,
}

/// A lexeme together with whether the raw text continued right after it
/// without whitespace. The flag is informational; the parser ignores it.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub adjacent: bool,
}

impl Token {
    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            OperatorToken(op) => Some(op),
            _ => None,
        }
    }

    fn ends_operand(&self) -> bool {
        match self.kind {
            Number(_) | ConstantToken(_) | Variable => true,
            OperatorToken(op) => op == Operator::RParen || op == Operator::Derivative,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            Number(v) => write!(f, "NUMBER({})", v),
            OperatorToken(op) => write!(f, "OPERATOR({})", op),
            ConstantToken(c) => write!(f, "CONSTANT({})", c),
            Variable => write!(f, "VARIABLE(x)"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LexError {
    #[error("no lexeme matched")]
    NotMatched,
    #[error("unrecognized identifier `{0}`")]
    UndefinedIdentifier(String),
}

type LexResult<'a> = Result<(TokenKind, &'a str), LexError>;

type Matcher = for<'a> fn(&'a str, Option<&Token>) -> LexResult<'a>;

const MATCHERS: [Matcher; 4] = [lex_number, lex_operator, lex_constant, lex_variable];

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn trim_space(script: &str) -> &str {
    script.trim_start_matches(is_space)
}

fn lex_unsigned_number(script: &str) -> Option<(f64, &str)> {
    match script.chars().next() {
        Some(c) if c.is_ascii_digit() => (),
        _ => return None,
    }

    let mut value = 0.0;
    let mut dotted = false;
    let mut dec_exp = 0;
    let mut len = 0;

    for c in script.chars() {
        match c.to_digit(10) {
            Some(digit) if dotted => {
                dec_exp += 1;
                value += 0.1_f64.powi(dec_exp) * f64::from(digit);
            }
            Some(digit) => value = value * 10.0 + f64::from(digit),
            None if c == '.' && !dotted => dotted = true,
            None => break,
        }
        len += c.len_utf8();
    }

    Some((value, &script[len..]))
}

// `-` only belongs to the number when no operand precedes it, so `1-2` stays infix.
fn lex_number<'a>(script: &'a str, prev: Option<&Token>) -> LexResult<'a> {
    if let Some(unsigned) = script.strip_prefix('-') {
        if prev.map_or(false, Token::ends_operand) {
            return Err(LexError::NotMatched);
        }
        return lex_unsigned_number(unsigned)
            .map(|(value, rest)| (Number(-value), rest))
            .ok_or(LexError::NotMatched);
    }

    lex_unsigned_number(script)
        .map(|(value, rest)| (Number(value), rest))
        .ok_or(LexError::NotMatched)
}

fn lex_operator<'a>(script: &'a str, _: Option<&Token>) -> LexResult<'a> {
    if let Some(rest) = script.strip_prefix("ln") {
        return Ok((OperatorToken(Operator::Ln), rest));
    }

    let mut chars = script.chars();
    match chars.next().and_then(Operator::from_char) {
        Some(op) => Ok((OperatorToken(op), chars.as_str())),
        None => Err(LexError::NotMatched),
    }
}

fn lex_constant<'a>(script: &'a str, _: Option<&Token>) -> LexResult<'a> {
    if let Some(rest) = script.strip_prefix("pi") {
        Ok((ConstantToken(Constant::Pi), rest))
    } else if let Some(rest) = script.strip_prefix('e') {
        Ok((ConstantToken(Constant::E), rest))
    } else {
        Err(LexError::NotMatched)
    }
}

fn lex_variable<'a>(script: &'a str, _: Option<&Token>) -> LexResult<'a> {
    script
        .strip_prefix('x')
        .map(|rest| (Variable, rest))
        .ok_or(LexError::NotMatched)
}

fn lex_one<'a>(script: &'a str, prev: Option<&Token>) -> LexResult<'a> {
    for matcher in MATCHERS.iter() {
        match matcher(script, prev) {
            Err(LexError::NotMatched) => continue,
            res => return res,
        }
    }

    let word = script
        .split(|c: char| is_space(c) || Operator::from_char(c).is_some())
        .next()
        .unwrap_or(script);
    Err(LexError::UndefinedIdentifier(word.to_owned()))
}

pub fn lex(input: &str) -> Result<TokenStream, LexError> {
    let mut script = trim_space(input);
    let mut tokens: Vec<Token> = Vec::new();

    while !script.is_empty() {
        let (kind, rest) = lex_one(script, tokens.last())?;
        let token = Token {
            kind,
            adjacent: rest.starts_with(|c: char| !is_space(c)),
        };
        trace!("lexed {}", token);
        tokens.push(token);
        script = trim_space(rest);
    }

    Ok(TokenStream::new(tokens))
}
