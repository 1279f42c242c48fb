//! Abstract syntax (spec §3).
//!
//! The AST is a tagged union of expression nodes plus a small type-syntax
//! sum type for the optional `Let`/`Fn` annotations. `PartialEq` ignores
//! spans (see the manual impls below) so that the round-trip property
//! (spec §8, universal property #2) can compare a re-parsed tree against
//! the original by structural equality alone.

use mlc_util::Span;
use std::fmt;

/// A type as written in a `(: type)?` annotation, or produced internally
/// by the type inferencer once solved.
#[derive(Clone, Debug)]
pub enum Type {
    Int,
    Bool,
    Arrow(Box<Type>, Box<Type>),
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Int, Type::Int) | (Type::Bool, Type::Bool) => true,
            (Type::Arrow(a1, b1), Type::Arrow(a2, b2)) => a1 == a2 && b1 == b2,
            _ => false,
        }
    }
}
impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Arrow(head, tail) => write!(f, "({} -> {})", head, tail),
        }
    }
}

/// An expression node. Every variant carries the [`Span`] of the source
/// text it was parsed from; `Span::DUMMY` is used for nodes synthesized
/// later in the pipeline (renamer-inserted binders, inlined call sites).
#[derive(Clone, Debug)]
pub enum Expr {
    Num(i64, Span),
    Bln(bool, Span),
    Var(String, Span),

    Add(Box<Expr>, Box<Expr>, Span),
    Sub(Box<Expr>, Box<Expr>, Span),
    Mul(Box<Expr>, Box<Expr>, Span),
    Div(Box<Expr>, Box<Expr>, Span),
    Mod(Box<Expr>, Box<Expr>, Span),
    Eql(Box<Expr>, Box<Expr>, Span),
    Leq(Box<Expr>, Box<Expr>, Span),
    Lth(Box<Expr>, Box<Expr>, Span),
    And(Box<Expr>, Box<Expr>, Span),
    Or(Box<Expr>, Box<Expr>, Span),

    Neg(Box<Expr>, Span),
    Not(Box<Expr>, Span),

    Let(String, Option<Type>, Box<Expr>, Box<Expr>, Span),
    IfThenElse(Box<Expr>, Box<Expr>, Box<Expr>, Span),
    Fn(String, Option<Type>, Box<Expr>, Span),
    /// Self-referential named function, used for recursion (spec §3: `Fun`).
    Fun(String, String, Box<Expr>, Span),
    App(Box<Expr>, Box<Expr>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Num(_, s)
            | Expr::Bln(_, s)
            | Expr::Var(_, s)
            | Expr::Add(_, _, s)
            | Expr::Sub(_, _, s)
            | Expr::Mul(_, _, s)
            | Expr::Div(_, _, s)
            | Expr::Mod(_, _, s)
            | Expr::Eql(_, _, s)
            | Expr::Leq(_, _, s)
            | Expr::Lth(_, _, s)
            | Expr::And(_, _, s)
            | Expr::Or(_, _, s)
            | Expr::Neg(_, s)
            | Expr::Not(_, s)
            | Expr::Let(_, _, _, _, s)
            | Expr::IfThenElse(_, _, _, s)
            | Expr::Fn(_, _, _, s)
            | Expr::Fun(_, _, _, s)
            | Expr::App(_, _, s) => *s,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Num(a, _), Expr::Num(b, _)) => a == b,
            (Expr::Bln(a, _), Expr::Bln(b, _)) => a == b,
            (Expr::Var(a, _), Expr::Var(b, _)) => a == b,
            (Expr::Add(a1, b1, _), Expr::Add(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Sub(a1, b1, _), Expr::Sub(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Mul(a1, b1, _), Expr::Mul(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Div(a1, b1, _), Expr::Div(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Mod(a1, b1, _), Expr::Mod(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Eql(a1, b1, _), Expr::Eql(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Leq(a1, b1, _), Expr::Leq(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Lth(a1, b1, _), Expr::Lth(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::And(a1, b1, _), Expr::And(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Or(a1, b1, _), Expr::Or(a2, b2, _)) => a1 == a2 && b1 == b2,
            (Expr::Neg(a, _), Expr::Neg(b, _)) => a == b,
            (Expr::Not(a, _), Expr::Not(b, _)) => a == b,
            (Expr::Let(n1, t1, d1, b1, _), Expr::Let(n2, t2, d2, b2, _)) => {
                n1 == n2 && t1 == t2 && d1 == d2 && b1 == b2
            }
            (Expr::IfThenElse(c1, t1, e1, _), Expr::IfThenElse(c2, t2, e2, _)) => {
                c1 == c2 && t1 == t2 && e1 == e2
            }
            (Expr::Fn(n1, t1, b1, _), Expr::Fn(n2, t2, b2, _)) => n1 == n2 && t1 == t2 && b1 == b2,
            (Expr::Fun(f1, x1, b1, _), Expr::Fun(f2, x2, b2, _)) => {
                f1 == f2 && x1 == x2 && b1 == b2
            }
            (Expr::App(f1, a1, _), Expr::App(f2, a2, _)) => f1 == f2 && a1 == a2,
            _ => false,
        }
    }
}
impl Eq for Expr {}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n, _) => write!(f, "{n}"),
            Expr::Bln(b, _) => write!(f, "{b}"),
            Expr::Var(name, _) => write!(f, "{name}"),
            Expr::Add(a, b, _) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b, _) => write!(f, "({a} - {b})"),
            Expr::Mul(a, b, _) => write!(f, "({a} * {b})"),
            Expr::Div(a, b, _) => write!(f, "({a} / {b})"),
            Expr::Mod(a, b, _) => write!(f, "({a} mod {b})"),
            Expr::Eql(a, b, _) => write!(f, "({a} = {b})"),
            Expr::Leq(a, b, _) => write!(f, "({a} <= {b})"),
            Expr::Lth(a, b, _) => write!(f, "({a} < {b})"),
            Expr::And(a, b, _) => write!(f, "({a} and {b})"),
            Expr::Or(a, b, _) => write!(f, "({a} or {b})"),
            Expr::Neg(e, _) => write!(f, "(~{e})"),
            Expr::Not(e, _) => write!(f, "(not {e})"),
            Expr::Let(name, ty, def, body, _) => {
                // A `let rec` desugars to Let(name, Fun(name, ..), body); print it back
                // in that surface form so display -> parse round-trips.
                if let Expr::Fun(fname, formal, fbody, _) = def.as_ref() {
                    if fname == name {
                        return write!(f, "(let rec {name} {formal} <- {fbody} in {body} end)");
                    }
                }
                match ty {
                    Some(ty) => write!(f, "(let {name} : {ty} <- {def} in {body} end)"),
                    None => write!(f, "(let {name} <- {def} in {body} end)"),
                }
            }
            Expr::IfThenElse(c, t, e, _) => write!(f, "(if {c} then {t} else {e} end)"),
            Expr::Fn(formal, ty, body, _) => match ty {
                Some(ty) => write!(f, "(fn {formal} : {ty} => {body})"),
                None => write!(f, "(fn {formal} => {body})"),
            },
            Expr::Fun(name, formal, body, _) => write!(f, "(fun {name} {formal} => {body})"),
            Expr::App(fun, arg, _) => write!(f, "({fun} {arg})"),
        }
    }
}
