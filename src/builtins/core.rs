// ABOUTME: The macroexpand and eval builtins

use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::{eval, expand_macro, list_to_vec};
use crate::interp::Interpreter;
use crate::value::Value;

/// `(macroexpand '(m a b))`: `m` must resolve to a Macro; expands it against
/// the raw (unevaluated) tail and returns the expansion without evaluating
/// it further.
pub fn macroexpand(interp: &mut Interpreter, env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    let (head, tail) = match &args[0] {
        Value::Cons(pair) => (&pair.0, &pair.1),
        other => {
            return Err(EvalError::TypeMismatch {
                function: "macroexpand".to_string(),
                expected: "CONS".to_string(),
                actual: other.type_name().to_string(),
            })
        }
    };
    let head_val = eval(interp, env, head)?;
    match head_val {
        Value::Macro(m) => {
            let raw_args = list_to_vec(tail)?;
            expand_macro(interp, env, &m, raw_args)
        }
        other => Err(EvalError::TypeMismatch {
            function: "macroexpand".to_string(),
            expected: "MACRO".to_string(),
            actual: other.type_name().to_string(),
        }),
    }
}

/// `(eval x)`: a String argument is parsed as source and its forms are run
/// in sequence; any other value is evaluated a second time (the first
/// evaluation already happened when `eval`'s own argument expression was
/// reduced to a value by the call protocol).
pub fn eval_builtin(interp: &mut Interpreter, env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Str(s) => {
            let forms = crate::parser::parse_program(interp, s)
                .map_err(|e| EvalError::Custom(e.to_string()))?;
            let mut result = Value::Null;
            for form in &forms {
                result = eval(interp, env, form)?;
            }
            Ok(result)
        }
        other => eval(interp, env, &other.clone()),
    }
}
