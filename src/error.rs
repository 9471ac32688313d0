// ABOUTME: Error types for parsing, evaluation, and initialization failures

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("ParserError: unprocessed character: {0}")]
    UnexpectedChar(char),

    #[error("ParserError: malformed number near '{0}'")]
    MalformedNumber(String),

    #[error("ParserError: unterminated string literal")]
    UnterminatedString,

    #[error("ParserError: unterminated list")]
    UnterminatedList,

    #[error("ParserError: unexpected end of input")]
    UnexpectedEof,
}

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("NameError: unbound symbol: {0}")]
    UnboundSymbol(String),

    #[error("ArityError: {name} takes {expected} positional arguments but {actual} were given")]
    Arity {
        name: String,
        expected: String,
        actual: usize,
    },

    #[error("TypeError: unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    BadOperands {
        op: String,
        lhs: String,
        rhs: String,
    },

    #[error("TypeError: {function}: expected {expected}, got {actual}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
    },

    #[error("TypeError: can't call type: {0}")]
    NotCallable(String),

    #[error("TypeError: can't set to type {0}")]
    InvalidSetTarget(String),

    #[error("ArityError: set requires an even number of arguments, got {0}")]
    OddSetArgs(usize),

    #[error("{0}")]
    Custom(String),
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("can't open file: {0}")]
    PreludeMissing(String),

    #[error("prelude parse error: {0}")]
    PreludeParse(#[from] ParseError),

    #[error("prelude evaluation error: {0}")]
    PreludeEval(#[from] EvalError),
}

/// Unifies the two error kinds a top-level driver (file run or REPL
/// iteration) can see from a single parsed-and-evaluated form.
#[derive(Error, Debug, Clone)]
pub enum LispError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
