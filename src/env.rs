// ABOUTME: Environment module for managing variable bindings and lexical scopes

use std::cell::RefCell;
use std::rc::Rc;

use crate::symbol::{symbol_eq, Symbol};
use crate::value::Value;

/// A frame chain. Each frame holds an ordered association list of
/// `(symbol, value)` pairs; `bind` appends to this frame's list and lookups
/// scan it back-to-front so the most recently bound entry for a name always
/// wins (shadowing), then fall through to the parent frame.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<Vec<(Symbol, Value)>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates the root environment. Its parent is `None` — walking off the
    /// top of any frame chain terminates here.
    pub fn root() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: None,
        })
    }

    /// Creates a new child frame whose parent is `parent`.
    pub fn child(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: Some(parent),
        })
    }

    /// Binds `sym` in *this* frame, shadowing any existing binding (in this
    /// frame or an outer one) for subsequent lookups in this frame.
    pub fn bind(&self, sym: Symbol, value: Value) {
        self.bindings.borrow_mut().push((sym, value));
    }

    /// Walks the frame chain looking for `sym`, returning its bound value.
    pub fn get(&self, sym: &Symbol) -> Option<Value> {
        if let Some(v) = self.get_local(sym) {
            return Some(v);
        }
        match &self.parent {
            Some(parent) => parent.get(sym),
            None => None,
        }
    }

    fn get_local(&self, sym: &Symbol) -> Option<Value> {
        self.bindings
            .borrow()
            .iter()
            .rev()
            .find(|(s, _)| symbol_eq(s, sym))
            .map(|(_, v)| v.clone())
    }

    /// `set` semantics (§4.3/§4.7): mutate the nearest existing binding for
    /// `sym` anywhere in the chain. Returns `true` if a binding was found
    /// and mutated, `false` if `sym` is unbound everywhere.
    pub fn set_existing(&self, sym: &Symbol, value: Value) -> bool {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(entry) = bindings.iter_mut().rev().find(|(s, _)| symbol_eq(s, sym)) {
            entry.1 = value;
            return true;
        }
        drop(bindings);
        match &self.parent {
            Some(parent) => parent.set_existing(sym, value),
            None => false,
        }
    }
}
