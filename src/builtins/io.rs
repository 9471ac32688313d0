// ABOUTME: Console output builtins (print println)

use std::io::Write;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::Interpreter;
use crate::value::Value;

fn joined(args: &[Value]) -> String {
    args.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    print!("{}", joined(args));
    let _ = std::io::stdout().flush();
    Ok(Value::Null)
}

pub fn println_fn(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    println!("{}", joined(args));
    Ok(Value::Null)
}
