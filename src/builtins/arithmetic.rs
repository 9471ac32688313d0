// ABOUTME: Arithmetic builtins (+ - * /) with Int/Float coercion and string concatenation for +

use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::Interpreter;
use crate::value::Value;

fn bad_operands(op: &str, lhs: &Value, rhs: &Value) -> EvalError {
    EvalError::BadOperands {
        op: op.to_string(),
        lhs: lhs.type_name().to_string(),
        rhs: rhs.type_name().to_string(),
    }
}

pub fn add(interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(interp.make_int(a.wrapping_add(*b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 + b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a + *b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
        (lhs, rhs) => Err(bad_operands("+", lhs, rhs)),
    }
}

pub fn sub(interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(interp.make_int(a.wrapping_sub(*b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 - b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a - *b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
        (lhs, rhs) => Err(bad_operands("-", lhs, rhs)),
    }
}

pub fn mul(interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(interp.make_int(a.wrapping_mul(*b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 * b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a * *b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
        (lhs, rhs) => Err(bad_operands("*", lhs, rhs)),
    }
}

pub fn div(_interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Int(_), Value::Int(0)) => Err(EvalError::Custom("ZeroDivisionError: division by zero".to_string())),
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a / b)),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 / b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a / *b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
        (lhs, rhs) => Err(bad_operands("/", lhs, rhs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp_env() -> (Interpreter, Rc<Environment>) {
        let interp = Interpreter::new();
        let env = interp.global_env.clone();
        (interp, env)
    }

    #[test]
    fn int_plus_int_is_int() {
        let (mut interp, env) = interp_env();
        let r = add(&mut interp, &env, &[Value::Int(1), Value::Int(2)]).unwrap();
        assert!(matches!(r, Value::Int(3)));
    }

    #[test]
    fn int_plus_float_coerces_to_float() {
        let (mut interp, env) = interp_env();
        let r = add(&mut interp, &env, &[Value::Int(1), Value::Float(2.5)]).unwrap();
        assert!(matches!(r, Value::Float(f) if f == 3.5));
    }

    #[test]
    fn string_plus_string_concatenates() {
        let (mut interp, env) = interp_env();
        let r = add(&mut interp, &env, &[Value::string("foo"), Value::string("bar")]).unwrap();
        match r {
            Value::Str(s) => assert_eq!(&*s, "foobar"),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn int_plus_string_is_type_error() {
        let (mut interp, env) = interp_env();
        let err = add(&mut interp, &env, &[Value::Int(1), Value::string("x")]).unwrap_err();
        assert!(matches!(err, EvalError::BadOperands { .. }));
    }

    #[test]
    fn integer_division_truncates_toward_zero() {
        let (mut interp, env) = interp_env();
        let r = div(&mut interp, &env, &[Value::Int(-7), Value::Int(2)]).unwrap();
        assert!(matches!(r, Value::Int(-3)));
    }

    #[test]
    fn division_by_zero_errors() {
        let (mut interp, env) = interp_env();
        let err = div(&mut interp, &env, &[Value::Int(1), Value::Int(0)]).unwrap_err();
        assert!(matches!(err, EvalError::Custom(_)));
    }

    #[test]
    fn integer_overflow_wraps_instead_of_panicking() {
        let (mut interp, env) = interp_env();
        let r = add(&mut interp, &env, &[Value::Int(i64::MAX), Value::Int(1)]).unwrap();
        assert!(matches!(r, Value::Int(i64::MIN)));
    }
}
