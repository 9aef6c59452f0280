use lang::{syntax::parse::DEFAULT_MAX_DEPTH, Calculator};

pub struct Config {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub max_depth: usize,
}

impl Config {
    pub(crate) fn new() -> Self {
        Config {
            dump_tokens: false,
            dump_ast: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub(crate) fn calculator(&self) -> Calculator {
        Calculator::new(self.max_depth)
    }
}
