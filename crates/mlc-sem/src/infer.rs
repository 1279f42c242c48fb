//! Unification and solving (spec §4.3), grounded on the teacher's
//! `TypeInference` engine: a substitution table indexed by type-variable
//! id, an occurs check before every bind, and a `resolve` that follows
//! substitution chains. Narrowed from the teacher's general unifier (which
//! also handled tuples, arrays, references, ADTs, trait constraints) down
//! to this language's three type constructors.

use crate::constraint::Constraint;
use crate::error::{TypeError, TypeResult};
use crate::types::{Type, TypeVarId};
use mlc_util::IndexVec;

#[derive(Default)]
pub struct Unifier {
    substitutions: IndexVec<TypeVarId, Option<Type>>,
}

impl Unifier {
    pub fn new(var_count: u32) -> Self {
        let mut substitutions = IndexVec::new();
        for _ in 0..var_count {
            substitutions.push(None);
        }
        Self { substitutions }
    }

    pub fn solve(&mut self, constraints: &[Constraint]) -> TypeResult<()> {
        for Constraint(lhs, rhs) in constraints {
            self.unify(lhs, rhs)?;
        }
        Ok(())
    }

    fn unify(&mut self, t1: &Type, t2: &Type) -> TypeResult<()> {
        let t1 = self.resolve(t1);
        let t2 = self.resolve(t2);
        match (&t1, &t2) {
            (Type::Var(a), Type::Var(b)) if a == b => Ok(()),
            (Type::Var(id), other) | (other, Type::Var(id)) => {
                if self.occurs_check(*id, other) {
                    return Err(TypeError::InfiniteType);
                }
                self.substitutions[*id] = Some(other.clone());
                Ok(())
            }
            (Type::Int, Type::Int) | (Type::Bool, Type::Bool) => Ok(()),
            (Type::Arrow(a1, b1), Type::Arrow(a2, b2)) => {
                self.unify(a1, a2)?;
                self.unify(b1, b2)
            }
            _ => Err(TypeError::Mismatch(t1, t2)),
        }
    }

    fn occurs_check(&self, var: TypeVarId, ty: &Type) -> bool {
        match self.resolve(ty) {
            Type::Var(id) => id == var,
            Type::Arrow(a, b) => self.occurs_check(var, &a) || self.occurs_check(var, &b),
            Type::Int | Type::Bool => false,
        }
    }

    /// Follow the substitution chain for `ty` until hitting an unbound
    /// variable or a rigid constructor, recursing into arrow heads/tails.
    pub fn resolve(&self, ty: &Type) -> Type {
        match ty {
            Type::Var(id) => match self.substitutions.get(*id) {
                Some(Some(bound)) => self.resolve(bound),
                _ => ty.clone(),
            },
            Type::Arrow(a, b) => Type::arrow(self.resolve(a), self.resolve(b)),
            Type::Int | Type::Bool => ty.clone(),
        }
    }

    /// Canonicalize a fully-generated binding: resolve it and classify
    /// per spec §4.3's closing paragraph.
    pub fn canonical(&self, ty: &Type) -> TypeResult<Type> {
        let resolved = self.resolve(ty);
        if resolved.is_concrete() {
            Ok(resolved)
        } else {
            Err(TypeError::Polymorphic)
        }
    }
}
