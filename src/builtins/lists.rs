// ABOUTME: List builtins (car cdr cons)

use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::Interpreter;
use crate::value::Value;

fn not_a_cons(function: &str, actual: &Value) -> EvalError {
    EvalError::TypeMismatch {
        function: function.to_string(),
        expected: "CONS".to_string(),
        actual: actual.type_name().to_string(),
    }
}

pub fn car(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Cons(pair) => Ok(pair.0.clone()),
        other => Err(not_a_cons("car", other)),
    }
}

pub fn cdr(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Cons(pair) => Ok(pair.1.clone()),
        other => Err(not_a_cons("cdr", other)),
    }
}

pub fn cons(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}
