// ABOUTME: Value types representing the universal tagged datum and its variants

use std::fmt;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::Interpreter;
use crate::symbol::{symbol_eq, Symbol};

/// A builtin's function pointer. Whether `args` holds evaluated values or
/// raw, unevaluated forms is determined by `BuiltinData::eval_args` at the
/// call site (§4.5) — the function itself doesn't need to know which.
pub type BuiltinFn =
    fn(&mut Interpreter, &Rc<Environment>, &[Value]) -> Result<Value, EvalError>;

#[derive(Debug)]
pub struct BuiltinData {
    pub name: Symbol,
    /// Declared arity; -1 means variadic (any count accepted by the call
    /// protocol — the builtin itself may still enforce a minimum).
    pub arity: i64,
    pub eval_args: bool,
    pub func: BuiltinFn,
}

#[derive(Debug)]
pub struct LambdaData {
    pub name: Symbol,
    pub arity: i64,
    pub params: Vec<Symbol>,
    pub rest: Option<Symbol>,
    pub body: Vec<Value>,
    pub env: Rc<Environment>,
}

#[derive(Debug)]
pub struct MacroData {
    pub name: Symbol,
    pub arity: i64,
    pub params: Vec<Symbol>,
    pub body: Vec<Value>,
}

/// The universal tagged datum. `Null` is the unique empty list and false
/// value; `Bool` has a single inhabitant, `T`. Every other value is true.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool,
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Symbol(Symbol),
    Cons(Rc<(Value, Value)>),
    Builtin(Rc<BuiltinData>),
    Lambda(Rc<LambdaData>),
    Macro(Rc<MacroData>),
    Environment(Rc<Environment>),
}

impl Value {
    pub fn cons(head: Value, tail: Value) -> Value {
        Value::Cons(Rc::new((head, tail)))
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::Str(Rc::from(s.into()))
    }

    /// `NIL` is false; everything else (including `0`, `""`, and `T`) is true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn car(&self) -> Option<&Value> {
        match self {
            Value::Cons(pair) => Some(&pair.0),
            _ => None,
        }
    }

    pub fn cdr(&self) -> Option<&Value> {
        match self {
            Value::Cons(pair) => Some(&pair.1),
            _ => None,
        }
    }

    /// Uppercase type-name symbol spelling per §4.7's `typeof`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool => "BOOL",
            Value::Int(_) => "INT",
            Value::Float(_) => "FLOAT",
            Value::Str(_) => "STRING",
            Value::Symbol(_) => "SYMBOL",
            Value::Cons(_) => "CONS",
            Value::Builtin(_) => "BUILTIN",
            Value::Lambda(_) => "LAMBDA",
            Value::Macro(_) => "MACRO",
            Value::Environment(_) => "ENV",
        }
    }

    /// Structural equality used by the round-trip test property (§8): two
    /// freshly-parsed trees are equal iff every atom matches and the cons
    /// spine has the same shape. Symbols compare by identity, matching the
    /// evaluator's own notion of symbol equality.
    pub fn structurally_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool, Value::Bool) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => symbol_eq(a, b),
            (Value::Cons(a), Value::Cons(b)) => {
                a.0.structurally_eq(&b.0) && a.1.structurally_eq(&b.1)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NIL"),
            Value::Bool => write!(f, "T"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{n:.1}")
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Symbol(s) => write!(f, "{}", s.name),
            Value::Cons(_) => {
                write!(f, "(")?;
                let mut cur = self;
                let mut first = true;
                loop {
                    match cur {
                        Value::Cons(pair) => {
                            if !first {
                                write!(f, " ")?;
                            }
                            first = false;
                            write!(f, "{}", pair.0)?;
                            cur = &pair.1;
                        }
                        Value::Null => break,
                        other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Builtin(b) => write!(f, "<BUILTIN {}({})>", b.name.name, b.arity),
            Value::Lambda(l) => write!(f, "<LAMBDA {}({})>", l.name.name, l.arity),
            Value::Macro(m) => write!(f, "<MACRO {}({})>", m.name.name, m.arity),
            Value::Environment(_) => write!(f, "<ENV>"),
        }
    }
}
