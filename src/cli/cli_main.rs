use rustyline::{
    completion::{Candidate, Completer},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Context as RContext, Editor, Helper, Result as RResult,
};

use lang::{runtime::Value, syntax::bindpower::BIND_POWER, CalcError};

use crate::config::Config;

const COMMANDS: [(&str, &str); 5] = [
    (":q", "Quit REPL"),
    (":bp", "Show the binding power table"),
    (":tokens", "Toggle printing tokens"),
    (":ast", "Toggle printing the parsed tree"),
    (":help", "Show this list"),
];

const WORDS: [&str; 2] = ["ln", "pi"];

struct REPL {
    rl: Editor<REPLHelper>,
    history_file: Option<String>,
    cfg: Config,
    repl_run: bool,
    prompt: String,
}

enum CompleteCandidate {
    Command(String, String),
    Word(String),
}

impl Candidate for CompleteCandidate {
    fn display(&self) -> &str {
        match self {
            CompleteCandidate::Command(cmd, _) => cmd,
            CompleteCandidate::Word(word) => word,
        }
    }

    fn replacement(&self) -> &str {
        match self {
            CompleteCandidate::Command(cmd, _) => cmd,
            CompleteCandidate::Word(word) => word,
        }
    }
}

struct REPLHelper;

impl Helper for REPLHelper {}

impl Completer for REPLHelper {
    type Candidate = CompleteCandidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &RContext<'_>,
    ) -> RResult<(usize, Vec<Self::Candidate>)> {
        let line = &line[..pos];

        if line.starts_with(':') {
            Ok((
                pos,
                COMMANDS
                    .iter()
                    .filter(|it| it.0.starts_with(line))
                    .map(|it| (it.0.split_at(line.len()).1, it.1))
                    .map(|it| CompleteCandidate::Command(it.0.to_owned(), it.1.to_owned()))
                    .collect(),
            ))
        } else {
            let word = line
                .rsplit(|c: char| !c.is_ascii_alphabetic())
                .next()
                .unwrap_or("");
            Ok((
                pos,
                WORDS
                    .iter()
                    .filter(|it| !word.is_empty() && it.len() > word.len() && it.starts_with(word))
                    .map(|it| CompleteCandidate::Word(it.split_at(word.len()).1.to_owned()))
                    .collect(),
            ))
        }
    }
}

impl Validator for REPLHelper {}

impl Hinter for REPLHelper {}

impl Highlighter for REPLHelper {}

impl REPL {
    fn new(cfg: Config) -> REPL {
        let history_file = dirs::home_dir()
            .map(|mut path| {
                path.push(".yc-history");
                path.to_str().map(|s| s.to_owned())
            })
            .flatten();

        let mut repl = REPL {
            rl: Editor::<REPLHelper>::new(),
            history_file,
            cfg,
            repl_run: true,
            prompt: "yc> ".to_owned(),
        };

        if let Some(ref path) = repl.history_file {
            let _ = repl.rl.load_history(path);
        }

        repl.rl.set_helper(Some(REPLHelper));
        repl
    }

    fn start(&mut self) {
        while self.repl_run {
            let readline = self.rl.readline(self.prompt.as_str());
            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    self.rl.add_history_entry(line);
                    if line.starts_with(':') {
                        self.process_command(line);
                    } else {
                        run_and_print(&self.cfg, None, line);
                    }
                }

                Err(ReadlineError::Interrupted) => (),
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    eprintln!("ReadlineError: {:?}", err);
                    break;
                }
            }
        }
    }

    fn process_command(&mut self, line: &str) {
        match line {
            ":q" => {
                self.repl_run = false;
            }

            ":bp" => print!("{}", *BIND_POWER),

            ":tokens" => {
                self.cfg.dump_tokens = !self.cfg.dump_tokens;
                println!("token dump {}", on_off(self.cfg.dump_tokens));
            }

            ":ast" => {
                self.cfg.dump_ast = !self.cfg.dump_ast;
                println!("tree dump {}", on_off(self.cfg.dump_ast));
            }

            ":help" => {
                for (cmd, help) in COMMANDS.iter() {
                    println!("{:<8} {}", cmd, help);
                }
            }

            _ => println!("REPL: Unknown command {}", line),
        }
    }
}

impl Drop for REPL {
    fn drop(&mut self) {
        if let Some(ref path) = self.history_file {
            let _ = self.rl.save_history(path);
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn calculate(cfg: &Config, input: &str) -> Result<Value, CalcError> {
    let calc = cfg.calculator();

    let ts = calc.tokenize(input)?;
    if cfg.dump_tokens {
        eprintln!("{}", ts);
    }

    let expr = calc.parse(&ts)?;
    if cfg.dump_ast {
        eprintln!("{}", expr);
    }

    calc.evaluate(&expr)
}

fn run_and_print(cfg: &Config, location: Option<String>, input: &str) -> bool {
    match calculate(cfg, input) {
        Ok(v) => {
            println!("{}", v);
            true
        }
        Err(err) => {
            match location {
                Some(at) => eprintln!("{}: {}", at, err),
                None => eprintln!("{}", err),
            }
            false
        }
    }
}

pub(crate) fn eval_main(cfg: &Config, input: &str) -> bool {
    run_and_print(cfg, None, input)
}

// Line numbers start at 1.
fn line_location(path: &str, index: usize) -> String {
    format!("{}:{}", path, index + 1)
}

/// Every non-empty line of `input` is evaluated on its own; returns
/// whether all of them succeeded.
pub(crate) fn cli_main(cfg: Config, input: Option<String>) -> bool {
    if let Some(input) = input {
        let src = match std::fs::read_to_string(input.as_str()) {
            Ok(src) => src,
            Err(err) => {
                eprintln!("{}: {}", input, err);
                return false;
            }
        };

        src.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| run_and_print(&cfg, Some(line_location(&input, n)), line))
            .fold(true, |ok, line_ok| ok && line_ok)
    } else {
        let mut repl = REPL::new(cfg);
        repl.start();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_input(name: &str, contents: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("yc-{}-{}.txt", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_file_with_a_failing_line_fails() {
        let path = write_input("failing", "1+2*3\n\n   \nln(x)\n");
        assert!(!cli_main(Config::new(), Some(path.clone())));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_with_good_lines_succeeds() {
        let path = write_input("good", "1+2*3\n\n(x^2+x)'\n");
        assert!(cli_main(Config::new(), Some(path.clone())));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_reported() {
        let mut path = std::env::temp_dir();
        path.push(format!("yc-{}-missing.txt", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        assert!(!cli_main(Config::new(), Some(path)));
    }

    #[test]
    fn test_depth_limit_reaches_the_calculator() {
        let mut cfg = Config::new();
        cfg.max_depth = 4;
        assert!(calculate(&cfg, "((((((1))))))").is_err());
        assert!(calculate(&Config::new(), "((((((1))))))").is_ok());
    }

    #[test]
    fn test_single_expression() {
        assert!(eval_main(&Config::new(), "x^2+x $ 2"));
        assert!(!eval_main(&Config::new(), "1+"));
    }

    #[test]
    fn test_line_location() {
        assert_eq!(line_location("input.txt", 0), "input.txt:1");
        assert_eq!(line_location("input.txt", 3), "input.txt:4");
    }
}
