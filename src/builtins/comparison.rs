// ABOUTME: Equality and ordering builtins (== != > >= < <=)

use std::cmp::Ordering;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::Interpreter;
use crate::symbol::symbol_eq;
use crate::value::Value;

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool, Value::Bool) => true,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Int(x), Value::Float(y)) => (*x as f64) == *y,
        (Value::Float(x), Value::Int(y)) => *x == (*y as f64),
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => symbol_eq(x, y),
        (Value::Cons(x), Value::Cons(y)) => Rc::ptr_eq(x, y),
        (Value::Builtin(x), Value::Builtin(y)) => Rc::ptr_eq(x, y),
        (Value::Lambda(x), Value::Lambda(y)) => Rc::ptr_eq(x, y),
        (Value::Macro(x), Value::Macro(y)) => Rc::ptr_eq(x, y),
        (Value::Environment(x), Value::Environment(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

fn numeric_order(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.partial_cmp(y),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        _ => None,
    }
}

fn order(op: &str, a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    if let Some(ord) = numeric_order(a, b) {
        return Ok(ord);
    }
    if let (Value::Str(x), Value::Str(y)) = (a, b) {
        return Ok(x.as_ref().cmp(y.as_ref()));
    }
    Err(EvalError::BadOperands {
        op: op.to_string(),
        lhs: a.type_name().to_string(),
        rhs: b.type_name().to_string(),
    })
}

fn bool_value(b: bool) -> Value {
    if b {
        Value::Bool
    } else {
        Value::Null
    }
}

pub fn eq(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_value(value_eq(&args[0], &args[1])))
}

pub fn neq(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_value(!value_eq(&args[0], &args[1])))
}

pub fn gt(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_value(order(">", &args[0], &args[1])?.is_gt()))
}

pub fn ge(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_value(order(">=", &args[0], &args[1])?.is_ge()))
}

pub fn lt(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_value(order("<", &args[0], &args[1])?.is_lt()))
}

pub fn le(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_value(order("<=", &args[0], &args[1])?.is_le()))
}
