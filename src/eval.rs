// ABOUTME: Evaluator module for executing parsed Lisp expressions

use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::Interpreter;
use crate::value::Value;

/// Evaluates `expr` in `env`. Self-evaluating atoms return themselves;
/// symbols resolve through the frame chain; a Cons form evaluates its head
/// to obtain a callable and invokes the call protocol with its raw (as yet
/// unevaluated) tail.
pub fn eval(interp: &mut Interpreter, env: &Rc<Environment>, expr: &Value) -> Result<Value, EvalError> {
    match expr {
        Value::Null
        | Value::Bool
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Builtin(_)
        | Value::Lambda(_)
        | Value::Macro(_)
        | Value::Environment(_) => Ok(expr.clone()),
        Value::Symbol(s) => env
            .get(s)
            .ok_or_else(|| EvalError::UnboundSymbol(s.name.clone())),
        Value::Cons(pair) => {
            let callee = eval(interp, env, &pair.0)?;
            call(interp, env, &callee, &pair.1)
        }
    }
}

/// Walks a proper-list `Value` spine into a `Vec`, left to right.
pub fn list_to_vec(list: &Value) -> Result<Vec<Value>, EvalError> {
    let mut out = Vec::new();
    let mut cur = list;
    loop {
        match cur {
            Value::Null => return Ok(out),
            Value::Cons(pair) => {
                out.push(pair.0.clone());
                cur = &pair.1;
            }
            other => {
                return Err(EvalError::Custom(format!(
                    "improper list where a proper list was expected: {other}"
                )))
            }
        }
    }
}

/// Builds a proper list from `items`, in order.
pub fn vec_to_list(items: Vec<Value>) -> Value {
    items
        .into_iter()
        .rev()
        .fold(Value::Null, |tail, head| Value::cons(head, tail))
}

/// Evaluates each element of the raw argument list `raw_args`, in order,
/// returning the evaluated values.
fn eval_list(interp: &mut Interpreter, env: &Rc<Environment>, raw_args: &Value) -> Result<Vec<Value>, EvalError> {
    list_to_vec(raw_args)?
        .iter()
        .map(|form| eval(interp, env, form))
        .collect()
}

/// Pushes a fresh child frame onto `env`, evaluates `body` in source order
/// inside that frame, and returns the value of the last form (or `NIL` if
/// `body` is empty). This is exactly what the bare `progn` builtin does, and
/// it is reused — as a *second*, nested push — by both lambda invocation and
/// macro expansion, matching the original two-frame call sequence.
pub fn eval_sequence(interp: &mut Interpreter, env: &Rc<Environment>, body: &[Value]) -> Result<Value, EvalError> {
    let frame = Environment::child(env.clone());
    let mut result = Value::Null;
    for form in body {
        result = eval(interp, &frame, form)?;
    }
    Ok(result)
}

/// Implements §4.5's call protocol: arity check, then dispatch by variant.
pub fn call(interp: &mut Interpreter, env: &Rc<Environment>, callable: &Value, raw_args: &Value) -> Result<Value, EvalError> {
    let raw_forms = list_to_vec(raw_args)?;
    let argc = raw_forms.len();

    match callable {
        Value::Macro(m) => {
            check_arity(&m.name.name, m.arity, argc, false)?;
            let expansion = expand_macro(interp, env, m, raw_forms)?;
            eval(interp, env, &expansion)
        }
        Value::Lambda(l) => {
            let has_rest = l.rest.is_some();
            check_arity(&l.name.name, l.arity, argc, has_rest)?;
            let evaluated = eval_args_vec(interp, env, &raw_forms)?;
            invoke_lambda(interp, l, evaluated)
        }
        Value::Builtin(b) => {
            check_arity(&b.name.name, b.arity, argc, false)?;
            if b.eval_args {
                let evaluated = eval_args_vec(interp, env, &raw_forms)?;
                (b.func)(interp, env, &evaluated)
            } else {
                (b.func)(interp, env, &raw_forms)
            }
        }
        other => Err(EvalError::NotCallable(other.type_name().to_string())),
    }
}

fn eval_args_vec(interp: &mut Interpreter, env: &Rc<Environment>, raw_forms: &[Value]) -> Result<Vec<Value>, EvalError> {
    raw_forms.iter().map(|form| eval(interp, env, form)).collect()
}

fn check_arity(name: &str, declared_arity: i64, argc: usize, has_rest: bool) -> Result<(), EvalError> {
    if declared_arity < 0 {
        return Ok(());
    }
    if has_rest {
        let minimum = (declared_arity - 1).max(0) as usize;
        if argc < minimum {
            return Err(EvalError::Arity {
                name: name.to_string(),
                expected: format!("at least {minimum}"),
                actual: argc,
            });
        }
    } else if argc != declared_arity as usize {
        return Err(EvalError::Arity {
            name: name.to_string(),
            expected: declared_arity.to_string(),
            actual: argc,
        });
    }
    Ok(())
}

fn invoke_lambda(interp: &mut Interpreter, lambda: &Rc<crate::value::LambdaData>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    let frame = Environment::child(lambda.env.clone());
    let fixed = lambda.params.len();
    let rest_args = if args.len() > fixed { args.split_off(fixed) } else { Vec::new() };
    for (param, value) in lambda.params.iter().zip(args.into_iter()) {
        frame.bind(param.clone(), value);
    }
    if let Some(rest) = &lambda.rest {
        frame.bind(rest.clone(), vec_to_list(rest_args));
    }
    eval_sequence(interp, &frame, &lambda.body)
}

/// §4.6: binds the macro's formals to the *raw* argument forms in a frame
/// whose parent is the caller's environment, then evaluates the body as an
/// implicit sequence. The result is the expansion, not yet evaluated again.
pub fn expand_macro(
    interp: &mut Interpreter,
    caller_env: &Rc<Environment>,
    macro_data: &Rc<crate::value::MacroData>,
    raw_args: Vec<Value>,
) -> Result<Value, EvalError> {
    let frame = Environment::child(caller_env.clone());
    for (param, raw) in macro_data.params.iter().zip(raw_args.into_iter()) {
        frame.bind(param.clone(), raw);
    }
    eval_sequence(interp, &frame, &macro_data.body)
}
