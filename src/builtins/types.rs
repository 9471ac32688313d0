// ABOUTME: The typeof builtin

use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::Interpreter;
use crate::value::Value;

pub fn type_of(interp: &mut Interpreter, _env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    let sym = interp.intern(args[0].type_name());
    Ok(Value::Symbol(sym))
}
