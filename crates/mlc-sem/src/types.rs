//! Closed type universe for the language (spec §3/§4.3).
//!
//! Kept down from the teacher's general-purpose `Type` (which also carried
//! tuples, arrays, references, ADTs, options/results, a float/char/string
//! family, `Error`/`Never`) to exactly what this language's three surface
//! forms (`int`, `bool`, arrow types) plus inference variables need.

use mlc_util::{define_idx, Idx};
use std::fmt;

define_idx!(TypeVarId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    Arrow(Box<Type>, Box<Type>),
    /// An as-yet-unsolved inference variable (`α`, `β`, `γ` in spec §4.3).
    Var(TypeVarId),
}

impl Type {
    pub fn arrow(from: Type, to: Type) -> Type {
        Type::Arrow(Box::new(from), Box::new(to))
    }

    /// True if `self` is fully solved — contains no inference variable.
    pub fn is_concrete(&self) -> bool {
        match self {
            Type::Int | Type::Bool => true,
            Type::Arrow(a, b) => a.is_concrete() && b.is_concrete(),
            Type::Var(_) => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Arrow(a, b) => write!(f, "({a} -> {b})"),
            Type::Var(id) => write!(f, "TV_{}", id.index() + 1),
        }
    }
}

/// Maps the surface [`mlc_par::Type`] annotation syntax onto the inference
/// universe (annotations never mention inference variables).
impl From<&mlc_par::Type> for Type {
    fn from(ty: &mlc_par::Type) -> Self {
        match ty {
            mlc_par::Type::Int => Type::Int,
            mlc_par::Type::Bool => Type::Bool,
            mlc_par::Type::Arrow(a, b) => {
                Type::Arrow(Box::new(Type::from(a.as_ref())), Box::new(Type::from(b.as_ref())))
            }
        }
    }
}
