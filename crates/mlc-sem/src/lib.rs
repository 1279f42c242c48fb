//! Hindley-Milner type inferencer `I: Expr → (Type, name → Type)` (spec §4.3).
//!
//! Two passes over the expression tree: [`constraint::ConstraintGenerator`]
//! walks it once to collect equality constraints and fresh inference
//! variables, then [`infer::Unifier`] solves them by substitution with an
//! occurs check. The module is split the way the teacher splits
//! constraint collection from solving (`types.rs`/`infer.rs`), narrowed
//! from a general-purpose type system down to `int`/`bool`/arrow.

pub mod constraint;
pub mod error;
pub mod infer;
pub mod types;

use constraint::ConstraintGenerator;
use error::TypeResult;
use infer::Unifier;
use mlc_par::Expr;
use std::collections::HashMap;

pub use error::TypeError as Error;
pub use types::Type;

/// Result of successfully inferring a closed expression: its principal
/// type plus the solved type of every source identifier encountered
/// (spec §4.3's closing sentence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    pub ty: Type,
    pub bindings: HashMap<String, Type>,
}

/// Run constraint generation followed by unification over `expr`,
/// returning its principal type and the solved type of every binder.
pub fn infer(expr: &Expr) -> TypeResult<InferenceResult> {
    let mut gen = ConstraintGenerator::new();
    let root = gen.fresh();
    gen.generate(expr, root.clone(), &HashMap::new())?;
    let (constraints, raw_bindings) = gen.into_parts();

    let var_count = constraints
        .iter()
        .flat_map(|c| [&c.0, &c.1])
        .chain(raw_bindings.iter().map(|(_, t)| t))
        .chain(std::iter::once(&root))
        .filter_map(max_var_id)
        .max()
        .map_or(0, |id| id + 1);

    let mut unifier = Unifier::new(var_count);
    unifier.solve(&constraints)?;

    let ty = unifier.canonical(&root)?;

    let mut bindings = HashMap::new();
    for (name, placeholder) in raw_bindings {
        // Later bindings of a reused name (shadowing) overwrite earlier
        // ones; the map only makes sense pre-renaming as a last-writer view.
        bindings.insert(name, unifier.canonical(&placeholder).unwrap_or(placeholder));
    }

    Ok(InferenceResult { ty, bindings })
}

fn max_var_id(ty: &Type) -> Option<u32> {
    match ty {
        Type::Var(id) => Some(id.0),
        Type::Arrow(a, b) => max_var_id(a).into_iter().chain(max_var_id(b)).max(),
        Type::Int | Type::Bool => None,
    }
}
