// ABOUTME: Bundles the interpreter's process-wide state into one explicit value

use std::rc::Rc;

use crate::env::Environment;
use crate::symbol::{Symbol, SymbolTable};
use crate::value::Value;

const INT_CACHE_MIN: i64 = -128;
const INT_CACHE_MAX: i64 = 128;

/// Everything that would otherwise be ambient module state — the symbol
/// table, the small-integer cache, and the global environment — lives here
/// instead, so that multiple independent interpreters can coexist and tests
/// never need to serialize on shared globals (§9's design note).
pub struct Interpreter {
    pub symbols: SymbolTable,
    pub global_env: Rc<Environment>,
    int_cache: Vec<Value>,
}

impl Interpreter {
    /// Builds a fresh interpreter with the global environment populated by
    /// every built-in special form and function (§4.7).
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        let global_env = Environment::root();
        let int_cache = (INT_CACHE_MIN..=INT_CACHE_MAX).map(Value::Int).collect();

        bind_globals(&mut symbols, &global_env);
        let mut interp = Interpreter {
            symbols,
            global_env,
            int_cache,
        };
        crate::builtins::register_all(&mut interp);
        interp
    }

    pub fn intern(&mut self, spelling: &str) -> Symbol {
        self.symbols.intern(spelling)
    }

    /// Returns a cached `Value::Int` for small integers so that repeated
    /// evaluation of the same literal produces observably identical values,
    /// matching §3's invariant. Values are immutable, so "identical" here is
    /// value equality of the returned `Int` — the cache exists so that both
    /// the literal-evaluation path and any builtin constructing small
    /// integers (e.g. `typeof`'s arity display) go through one
    /// representation rather than allocating bespoke ones ad hoc.
    pub fn make_int(&self, n: i64) -> Value {
        if (INT_CACHE_MIN..=INT_CACHE_MAX).contains(&n) {
            self.int_cache[(n - INT_CACHE_MIN) as usize].clone()
        } else {
            Value::Int(n)
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// `NIL` and `T` are bound as ordinary global variables, matching the
/// original's `add_var(GlobalEnv, intern("NIL"), NilObj)` /
/// `add_var(GlobalEnv, intern("T"), TrueObj)`.
fn bind_globals(symbols: &mut SymbolTable, env: &Rc<Environment>) {
    let nil_sym = symbols.intern("NIL");
    let t_sym = symbols.intern("T");
    env.bind(nil_sym, Value::Null);
    env.bind(t_sym, Value::Bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_ints_are_cached_and_equal() {
        let interp = Interpreter::new();
        let a = interp.make_int(42);
        let b = interp.make_int(42);
        assert!(matches!((a, b), (Value::Int(x), Value::Int(y)) if x == y));
    }

    #[test]
    fn large_ints_are_not_cached_but_still_equal() {
        let interp = Interpreter::new();
        let a = interp.make_int(100_000);
        let b = interp.make_int(100_000);
        assert!(matches!((a, b), (Value::Int(x), Value::Int(y)) if x == y));
    }

    #[test]
    fn nil_and_t_are_bound_globally() {
        let mut interp = Interpreter::new();
        let nil_sym = interp.intern("NIL");
        let t_sym = interp.intern("T");
        assert!(matches!(interp.global_env.get(&nil_sym), Some(Value::Null)));
        assert!(matches!(interp.global_env.get(&t_sym), Some(Value::Bool)));
    }
}
