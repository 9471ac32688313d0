// ABOUTME: Process-wide symbol interning table

use std::fmt;
use std::rc::Rc;

/// The data behind an interned symbol. Two `Symbol`s are equal iff they are
/// the same `Rc` allocation — identity equality agrees with case-insensitive
/// spelling equality because `SymbolTable::intern` never allocates twice for
/// the same upcased spelling.
#[derive(Debug)]
pub struct SymbolData {
    pub name: String,
}

pub type Symbol = Rc<SymbolData>;

impl fmt::Display for SymbolData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Compares two symbols by identity (pointer equality), per the data model's
/// interning invariant.
pub fn symbol_eq(a: &Symbol, b: &Symbol) -> bool {
    Rc::ptr_eq(a, b)
}

/// A single process-wide (well, single-interpreter-wide — see `Interpreter`)
/// interning table. `intern` upcases the spelling and returns the existing
/// symbol for it, if any, otherwise allocates and registers a new one.
#[derive(Debug, Default)]
pub struct SymbolTable {
    table: std::collections::HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            table: std::collections::HashMap::new(),
        }
    }

    pub fn intern(&mut self, spelling: &str) -> Symbol {
        let upper = spelling.to_ascii_uppercase();
        if let Some(sym) = self.table.get(&upper) {
            return sym.clone();
        }
        let sym: Symbol = Rc::new(SymbolData { name: upper.clone() });
        self.table.insert(upper, sym.clone());
        sym
    }
}
