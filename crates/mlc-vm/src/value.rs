//! The heterogeneous register value (spec §4.6, §9 "Closures and
//! environments"): `Int | Bool | Closure`. `Closure` is carried for
//! fidelity with spec's design note that the register map needs a "side
//! channel" for non-integer values, but this code generator never
//! constructs one (see `mlc-cg`'s module doc): every application in this
//! language targets a syntactically resolvable callee (a literal `Fn`, or
//! a `Var` naming a `Let`-bound `Fn`/`Fun`), so closure dispatch is
//! resolved entirely at code-generation time via a direct-call symbol
//! table, the way a compiled language resolves non-virtual calls. The
//! variant stays reachable only through `RuntimeError::MalformedClosure`,
//! the defensive arm hit if an arithmetic/branch instruction is ever
//! pointed at a register that unexpectedly holds one.

use mlc_util::Symbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Closure { formal: Symbol, entry: usize },
}

impl Value {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n),
            Value::Bool(b) => Some(b as i64),
            Value::Closure { .. } => None,
        }
    }
}
