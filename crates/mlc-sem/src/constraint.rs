//! Constraint generation (spec §4.3).
//!
//! A read-only-in-spirit AST walk: it never mutates the expression tree,
//! only accumulates `(Type, Type)` equality pairs and allocates fresh
//! inference variables. The one place it can fail outright is looking up
//! a free `Var` — the spec's "identifier name appears in a constraint"
//! convenience is implemented here as an immediate environment lookup
//! rather than carrying the name symbolically into the constraint list,
//! which needs no separate name-resolution pass over the solved
//! substitution (see DESIGN.md).

use crate::error::{TypeError, TypeResult};
use crate::types::{Type, TypeVarId};
use mlc_par::Expr;
use std::collections::HashMap;

/// An equality constraint between two type terms, to be solved by
/// unification (spec §4.3).
#[derive(Debug, Clone)]
pub struct Constraint(pub Type, pub Type);

/// Allocates fresh type variables and collects the bindings every source
/// identifier is typed against, so callers can report a `name -> type`
/// mapping after solving (spec §4.3's closing sentence).
#[derive(Default)]
pub struct ConstraintGenerator {
    next_var: u32,
    constraints: Vec<Constraint>,
    /// Every identifier's placeholder type variable, recorded the first
    /// time a binder introduces it.
    bindings: Vec<(String, Type)>,
}

type Env = HashMap<String, Type>;

impl ConstraintGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> Type {
        let id = TypeVarId(self.next_var);
        self.next_var += 1;
        Type::Var(id)
    }

    pub fn into_parts(self) -> (Vec<Constraint>, Vec<(String, Type)>) {
        (self.constraints, self.bindings)
    }

    fn push(&mut self, lhs: Type, rhs: Type) {
        self.constraints.push(Constraint(lhs, rhs));
    }

    fn bind(&mut self, env: &mut Env, name: &str, ty: Type) {
        env.insert(name.to_string(), ty.clone());
        self.bindings.push((name.to_string(), ty));
    }

    /// Generate constraints for `expr` against its expected type `tau`,
    /// under environment `env` mapping in-scope names to their
    /// placeholder types. Mirrors the table in spec §4.3 row by row.
    pub fn generate(&mut self, expr: &Expr, tau: Type, env: &Env) -> TypeResult<()> {
        match expr {
            Expr::Num(_, _) => self.push(Type::Int, tau),
            Expr::Bln(_, _) => self.push(Type::Bool, tau),
            Expr::Var(name, _) => match env.get(name) {
                Some(ty) => self.push(ty.clone(), tau),
                None => return Err(TypeError::UndefinedVariable(name.clone())),
            },
            Expr::Add(a, b, _) | Expr::Sub(a, b, _) | Expr::Mul(a, b, _) | Expr::Div(a, b, _)
            | Expr::Mod(a, b, _) => {
                self.generate(a, Type::Int, env)?;
                self.generate(b, Type::Int, env)?;
                self.push(Type::Int, tau);
            }
            Expr::Neg(e, _) => {
                self.generate(e, Type::Int, env)?;
                self.push(Type::Int, tau);
            }
            Expr::And(a, b, _) | Expr::Or(a, b, _) => {
                self.generate(a, Type::Bool, env)?;
                self.generate(b, Type::Bool, env)?;
                self.push(Type::Bool, tau);
            }
            Expr::Not(e, _) => {
                self.generate(e, Type::Bool, env)?;
                self.push(Type::Bool, tau);
            }
            Expr::Leq(a, b, _) | Expr::Lth(a, b, _) => {
                self.generate(a, Type::Int, env)?;
                self.generate(b, Type::Int, env)?;
                self.push(Type::Bool, tau);
            }
            Expr::Eql(a, b, _) => {
                let gamma = self.fresh();
                self.generate(a, gamma.clone(), env)?;
                self.generate(b, gamma, env)?;
                self.push(Type::Bool, tau);
            }
            Expr::IfThenElse(c, t, e, _) => {
                self.generate(c, Type::Bool, env)?;
                let beta = self.fresh();
                self.generate(t, beta.clone(), env)?;
                self.generate(e, beta.clone(), env)?;
                self.push(beta, tau);
            }
            Expr::Let(name, annotation, def, body, _) => {
                let alpha = match annotation {
                    Some(ty) => Type::from(ty),
                    None => self.fresh(),
                };
                self.generate(def, alpha.clone(), env)?;
                let mut inner = env.clone();
                self.bind(&mut inner, name, alpha);
                let beta = self.fresh();
                self.generate(body, beta.clone(), &inner)?;
                self.push(beta, tau);
            }
            Expr::Fn(formal, annotation, body, _) => {
                let alpha = match annotation {
                    Some(ty) => Type::from(ty),
                    None => self.fresh(),
                };
                let beta = self.fresh();
                let mut inner = env.clone();
                self.bind(&mut inner, formal, alpha.clone());
                self.generate(body, beta.clone(), &inner)?;
                self.push(Type::arrow(alpha, beta), tau);
            }
            Expr::Fun(fname, formal, body, _) => {
                let alpha = self.fresh();
                let beta = self.fresh();
                let arrow = Type::arrow(alpha.clone(), beta.clone());
                let mut inner = env.clone();
                self.bind(&mut inner, fname, arrow.clone());
                self.bind(&mut inner, formal, alpha);
                self.generate(body, beta, &inner)?;
                self.push(arrow, tau);
            }
            Expr::App(f, a, _) => {
                let alpha = self.fresh();
                self.generate(f, Type::arrow(alpha.clone(), tau), env)?;
                self.generate(a, alpha, env)?;
            }
        }
        Ok(())
    }
}
