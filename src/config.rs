// ABOUTME: Small constants shared by the CLI and the REPL

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROMPT: &str = ">>> ";
pub const PRELUDE_FILE: &str = "lib.lisp";
pub const HISTORY_FILE: &str = ".wee_lisp_history";
pub const WELCOME: &str = "wee-lisp REPL — Ctrl-D to exit";
