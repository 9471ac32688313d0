mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod interp;
mod parser;
mod symbol;
mod value;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use error::{InitError, LispError};
use interp::Interpreter;
use value::Value;

/// A small Lisp interpreter with lexical closures, macros, and a REPL
#[derive(ClapParser, Debug)]
#[command(name = "wee-lisp")]
#[command(version = config::VERSION)]
#[command(about = "A small Lisp-family interpreter")]
struct CliArgs {
    /// Script file to run (omit to start the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let mut interp = Interpreter::new();

    if let Err(e) = load_prelude(&mut interp) {
        eprintln!("FatalInitError: {e}");
        return ExitCode::FAILURE;
    }

    match args.script {
        Some(path) => run_file(&mut interp, &path),
        None => repl(&mut interp),
    }
    ExitCode::SUCCESS
}

/// Loads `lib.lisp` from the working directory and evaluates every form in
/// it against the global environment. A missing or malformed prelude is a
/// fatal initialisation error (§6/§7).
fn load_prelude(interp: &mut Interpreter) -> Result<(), InitError> {
    let source = std::fs::read_to_string(config::PRELUDE_FILE)
        .map_err(|_| InitError::PreludeMissing(config::PRELUDE_FILE.to_string()))?;
    let forms = parser::parse_program(interp, &source)?;
    let env = interp.global_env.clone();
    for form in &forms {
        eval::eval(interp, &env, form)?;
    }
    Ok(())
}

/// Parses and runs every top-level form in `path`, printing the value of
/// the last one. An error part-way through stops the remaining forms in
/// this file but does not abort the process (§7).
fn run_file(interp: &mut Interpreter, path: &PathBuf) {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("can't open file: {}: {e}", path.display());
            return;
        }
    };
    let env = interp.global_env.clone();
    let forms = match parser::parse_program(interp, &source) {
        Ok(forms) => forms,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let mut result = Value::Null;
    for form in &forms {
        match eval::eval(interp, &env, form) {
            Ok(value) => result = value,
            Err(e) => {
                eprintln!("{e}");
                result = Value::Null;
                break;
            }
        }
    }
    println!("{result}");
}

/// Reads one line at a time, parses it as a source fragment, runs every
/// form it contains and prints the last result, then loops. EOF ends the
/// session.
fn repl(interp: &mut Interpreter) {
    println!("{}", config::WELCOME);
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl = match DefaultEditor::with_config(rl_config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("failed to initialise REPL: {e}");
            return;
        }
    };
    let _ = rl.load_history(config::HISTORY_FILE);

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => run_fragment(interp, &line),
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }
    let _ = rl.save_history(config::HISTORY_FILE);
}

fn run_fragment(interp: &mut Interpreter, line: &str) {
    let env = interp.global_env.clone();
    let forms = match parser::parse_program(interp, line) {
        Ok(forms) => forms,
        Err(e) => {
            eprintln!("{}", LispError::from(e));
            return;
        }
    };
    let mut result = Value::Null;
    for form in &forms {
        match eval::eval(interp, &env, form) {
            Ok(value) => result = value,
            Err(e) => {
                eprintln!("{}", LispError::from(e));
                return;
            }
        }
    }
    println!("{result}");
}
