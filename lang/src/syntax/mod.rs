pub mod bindpower;
pub mod lex;
pub mod parse;
pub mod stream;
pub mod tree;
