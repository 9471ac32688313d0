// ABOUTME: Registers every built-in special form and function into a fresh interpreter's global environment

mod arithmetic;
mod comparison;
mod core;
mod io;
mod lists;
mod special_forms;
mod types;

use std::rc::Rc;

use crate::interp::Interpreter;
use crate::value::{BuiltinData, BuiltinFn, Value};

fn register(interp: &mut Interpreter, name: &str, arity: i64, eval_args: bool, func: BuiltinFn) {
    let sym = interp.intern(name);
    let builtin = Value::Builtin(Rc::new(BuiltinData {
        name: sym.clone(),
        arity,
        eval_args,
        func,
    }));
    interp.global_env.bind(sym, builtin);
}

/// Populates `interp`'s global environment with every built-in named in
/// §4.7 — special forms first (non-eager), then ordinary functions (eager).
pub fn register_all(interp: &mut Interpreter) {
    register(interp, "QUOTE", 1, false, special_forms::quote);
    register(interp, "SET", -1, false, special_forms::set);
    register(interp, "LAMBDA", -1, false, special_forms::lambda);
    register(interp, "DEFMACRO", -1, false, special_forms::defmacro);
    register(interp, "PROGN", -1, false, special_forms::progn);
    register(interp, "COND", -1, false, special_forms::cond);
    register(interp, "WHILE", 2, false, special_forms::while_loop);

    register(interp, "MACROEXPAND", 1, true, core::macroexpand);
    register(interp, "EVAL", 1, true, core::eval_builtin);

    register(interp, "CAR", 1, true, lists::car);
    register(interp, "CDR", 1, true, lists::cdr);
    register(interp, "CONS", 2, true, lists::cons);

    register(interp, "PRINT", -1, true, io::print);
    register(interp, "PRINTLN", -1, true, io::println_fn);

    register(interp, "TYPEOF", 1, true, types::type_of);

    register(interp, "+", 2, true, arithmetic::add);
    register(interp, "-", 2, true, arithmetic::sub);
    register(interp, "*", 2, true, arithmetic::mul);
    register(interp, "/", 2, true, arithmetic::div);

    register(interp, "==", 2, true, comparison::eq);
    register(interp, "!=", 2, true, comparison::neq);
    register(interp, ">", 2, true, comparison::gt);
    register(interp, ">=", 2, true, comparison::ge);
    register(interp, "<", 2, true, comparison::lt);
    register(interp, "<=", 2, true, comparison::le);
}
