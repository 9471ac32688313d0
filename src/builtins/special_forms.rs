// ABOUTME: Non-eager special forms (quote set lambda defmacro progn cond while)

use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::{eval, eval_sequence, list_to_vec};
use crate::interp::Interpreter;
use crate::value::{LambdaData, MacroData, Value};

pub fn quote(_interp: &mut Interpreter, _env: &Rc<Environment>, raw_args: &[Value]) -> Result<Value, EvalError> {
    Ok(raw_args[0].clone())
}

/// `(set sym expr sym expr ...)`. Pairs must come in a non-empty, even
/// count; each pair evaluates its expression and either mutates an existing
/// binding anywhere in the chain or creates one in the current frame.
pub fn set(interp: &mut Interpreter, env: &Rc<Environment>, raw_args: &[Value]) -> Result<Value, EvalError> {
    if raw_args.len() < 2 || raw_args.len() % 2 != 0 {
        return Err(EvalError::OddSetArgs(raw_args.len()));
    }
    for pair in raw_args.chunks_exact(2) {
        let sym = match &pair[0] {
            Value::Symbol(s) => s.clone(),
            other => return Err(EvalError::InvalidSetTarget(other.type_name().to_string())),
        };
        let value = eval(interp, env, &pair[1])?;
        if !env.set_existing(&sym, value.clone()) {
            env.bind(sym, value);
        }
    }
    Ok(Value::Null)
}

const REST_MARKER: &str = "&REST";

/// `(lambda (params... [&rest r]) body...)`. Captures `env` as the closure's
/// defining environment.
pub fn lambda(interp: &mut Interpreter, env: &Rc<Environment>, raw_args: &[Value]) -> Result<Value, EvalError> {
    if raw_args.len() < 2 {
        return Err(EvalError::Arity {
            name: "LAMBDA".to_string(),
            expected: "at least 2".to_string(),
            actual: raw_args.len(),
        });
    }
    let param_forms = list_to_vec(&raw_args[0])?;
    let (params, rest) = parse_formals("lambda", &param_forms)?;
    let arity = params.len() as i64 + if rest.is_some() { 1 } else { 0 };
    let name = interp.intern("LAMBDA");
    let lambda = Value::Lambda(Rc::new(LambdaData {
        name,
        arity,
        params,
        rest,
        body: raw_args[1..].to_vec(),
        env: env.clone(),
    }));
    Ok(lambda)
}

/// `(defmacro name (params...) body...)`. Binds `name` in `env` to a fresh
/// Macro; its body is expanded (never evaluated directly) at call sites.
pub fn defmacro(interp: &mut Interpreter, env: &Rc<Environment>, raw_args: &[Value]) -> Result<Value, EvalError> {
    if raw_args.len() < 3 {
        return Err(EvalError::Arity {
            name: "DEFMACRO".to_string(),
            expected: "at least 3".to_string(),
            actual: raw_args.len(),
        });
    }
    let name = match &raw_args[0] {
        Value::Symbol(s) => s.clone(),
        other => {
            return Err(EvalError::TypeMismatch {
                function: "defmacro".to_string(),
                expected: "SYMBOL".to_string(),
                actual: other.type_name().to_string(),
            })
        }
    };
    let param_forms = list_to_vec(&raw_args[1])?;
    let (params, _rest) = parse_formals("defmacro", &param_forms)?;
    let arity = params.len() as i64;
    let macro_value = Value::Macro(Rc::new(MacroData {
        name: name.clone(),
        arity,
        params,
        body: raw_args[2..].to_vec(),
    }));
    env.bind(name.clone(), macro_value);
    Ok(Value::Symbol(name))
}

fn parse_formals(
    context: &str,
    forms: &[Value],
) -> Result<(Vec<crate::symbol::Symbol>, Option<crate::symbol::Symbol>), EvalError> {
    let mut params = Vec::new();
    let mut rest = None;
    let mut i = 0;
    while i < forms.len() {
        match &forms[i] {
            Value::Symbol(s) if s.name == REST_MARKER => {
                let rest_sym = match forms.get(i + 1) {
                    Some(Value::Symbol(r)) => r.clone(),
                    _ => {
                        return Err(EvalError::Custom(format!(
                            "{context}: &rest must be followed by a parameter symbol"
                        )))
                    }
                };
                rest = Some(rest_sym);
                i += 2;
            }
            Value::Symbol(s) => {
                params.push(s.clone());
                i += 1;
            }
            other => {
                return Err(EvalError::TypeMismatch {
                    function: context.to_string(),
                    expected: "SYMBOL".to_string(),
                    actual: other.type_name().to_string(),
                })
            }
        }
    }
    Ok((params, rest))
}

/// Pushes a fresh frame and evaluates `raw_args` in order, returning the
/// last value — the shared "implicit sequence" building block.
pub fn progn(interp: &mut Interpreter, env: &Rc<Environment>, raw_args: &[Value]) -> Result<Value, EvalError> {
    eval_sequence(interp, env, raw_args)
}

/// `(cond (test result) (test result) ...)`. Evaluates tests in order;
/// returns the result paired with the first truthy test, or `NIL`.
pub fn cond(interp: &mut Interpreter, env: &Rc<Environment>, raw_args: &[Value]) -> Result<Value, EvalError> {
    for clause in raw_args {
        let parts = list_to_vec(clause)?;
        if parts.len() != 2 {
            return Err(EvalError::Custom(
                "cond: each clause must be a (test result) pair".to_string(),
            ));
        }
        let test = eval(interp, env, &parts[0])?;
        if test.is_truthy() {
            return eval(interp, env, &parts[1]);
        }
    }
    Ok(Value::Null)
}

/// `(while test body)`. Re-evaluates `test` before each iteration; stops as
/// soon as it is `NIL`.
pub fn while_loop(interp: &mut Interpreter, env: &Rc<Environment>, raw_args: &[Value]) -> Result<Value, EvalError> {
    loop {
        let test = eval(interp, env, &raw_args[0])?;
        if !test.is_truthy() {
            break;
        }
        eval(interp, env, &raw_args[1])?;
    }
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_returns_argument_unevaluated() {
        let mut interp = Interpreter::new();
        let env = interp.global_env.clone();
        let sym = Value::Symbol(interp.intern("undefined-name"));
        let r = quote(&mut interp, &env, std::slice::from_ref(&sym)).unwrap();
        assert!(matches!(r, Value::Symbol(_)));
    }

    #[test]
    fn set_creates_binding_when_unbound() {
        let mut interp = Interpreter::new();
        let env = interp.global_env.clone();
        let x = interp.intern("x");
        set(&mut interp, &env, &[Value::Symbol(x.clone()), Value::Int(5)]).unwrap();
        assert!(matches!(env.get(&x), Some(Value::Int(5))));
    }

    #[test]
    fn set_mutates_existing_binding() {
        let mut interp = Interpreter::new();
        let env = interp.global_env.clone();
        let x = interp.intern("x");
        env.bind(x.clone(), Value::Int(1));
        set(&mut interp, &env, &[Value::Symbol(x.clone()), Value::Int(2)]).unwrap();
        assert!(matches!(env.get(&x), Some(Value::Int(2))));
    }

    #[test]
    fn set_with_odd_args_errors() {
        let mut interp = Interpreter::new();
        let env = interp.global_env.clone();
        let x = interp.intern("x");
        let err = set(&mut interp, &env, &[Value::Symbol(x), Value::Int(1), Value::Int(2)]).unwrap_err();
        assert!(matches!(err, EvalError::OddSetArgs(3)));
    }

    #[test]
    fn lambda_drops_rest_marker_and_tracks_rest_symbol() {
        let mut interp = Interpreter::new();
        let env = interp.global_env.clone();
        let a = Value::Symbol(interp.intern("a"));
        let rest_marker = Value::Symbol(interp.intern("&rest"));
        let r = Value::Symbol(interp.intern("r"));
        let params = crate::eval::vec_to_list(vec![a, rest_marker, r]);
        let body = Value::Int(1);
        let raw = [params, body];
        let result = lambda(&mut interp, &env, &raw).unwrap();
        match result {
            Value::Lambda(l) => {
                assert_eq!(l.params.len(), 1);
                assert!(l.rest.is_some());
                assert_eq!(l.arity, 2);
            }
            other => panic!("expected lambda, got {other:?}"),
        }
    }

    #[test]
    fn cond_returns_nil_when_no_clause_matches() {
        let mut interp = Interpreter::new();
        let env = interp.global_env.clone();
        let clause = crate::eval::vec_to_list(vec![Value::Null, Value::Int(1)]);
        let r = cond(&mut interp, &env, &[clause]).unwrap();
        assert!(matches!(r, Value::Null));
    }
}
