pub mod cli;
pub mod config;

use clap::{value_t, App, ArgMatches};
use log::LevelFilter;

use crate::config::Config;

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn config_from(args: &ArgMatches) -> Config {
    let mut cfg = Config::new();
    cfg.dump_tokens = args.is_present("dump-tokens");
    cfg.dump_ast = args.is_present("dump-ast");
    if args.is_present("max-depth") {
        cfg.max_depth = value_t!(args, "max-depth", usize).unwrap_or_else(|e| e.exit());
    }
    cfg
}

fn app() -> App<'static, 'static> {
    App::new("yatcalc")
        .version("0.1.0")
        .author("Kiva <imkiva@icloud.com>")
        .about("Calculator for numbers and polynomials in x")
        .args_from_usage(
            "-i, --repl              'Starts an interactive shell'
            -e, --eval [EXPR]        'Evaluates one expression'
            --max-depth [N]          'Limits how deep the expression tree may grow'
            --dump-tokens            'Prints the tokens of every input'
            --dump-ast               'Prints the parsed tree of every input'
            -v...                    'Raises the log level'
            [INPUT]                  'Evaluates every line of a file'",
        )
}

fn main() {
    let args = app().get_matches();

    init_logger(args.occurrences_of("v"));
    let cfg = config_from(&args);

    let ok = if let Some(expr) = args.value_of("eval") {
        cli::cli_main::eval_main(&cfg, expr)
    } else if args.is_present("repl") {
        cli::cli_main::cli_main(cfg, None)
    } else {
        cli::cli_main::cli_main(cfg, args.value_of("INPUT").map(|e| e.to_owned()))
    };

    if !ok {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lang::syntax::parse::DEFAULT_MAX_DEPTH;

    #[test]
    fn test_config_defaults() {
        let cfg = config_from(&app().get_matches_from(vec!["yc"]));
        assert!(!cfg.dump_tokens);
        assert!(!cfg.dump_ast);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_config_from_flags() {
        let args = app().get_matches_from(vec!["yc", "--max-depth", "32", "--dump-ast", "in.txt"]);
        let cfg = config_from(&args);
        assert!(cfg.dump_ast);
        assert!(!cfg.dump_tokens);
        assert_eq!(cfg.max_depth, 32);
        assert_eq!(args.value_of("INPUT"), Some("in.txt"));
    }

    #[test]
    fn test_eval_and_verbosity() {
        let args = app().get_matches_from(vec!["yc", "-vv", "--dump-tokens", "-e", "1+2"]);
        assert_eq!(args.occurrences_of("v"), 2);
        assert_eq!(args.value_of("eval"), Some("1+2"));
        assert!(config_from(&args).dump_tokens);
    }
}
