use crate::types::Type;
use thiserror::Error;

/// Taxonomy exactly as spec §7 lists it (no `Span` field — unlike
/// `LexError`/`ParseError`, the original design does not thread source
/// positions through the constraint solver).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("type mismatch: expected {0}, found {1}")]
    Mismatch(Type, Type),
    #[error("infinite type")]
    InfiniteType,
    #[error("underconstrained (polymorphic) type")]
    Polymorphic,
    #[error("ambiguous type")]
    Ambiguous,
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
}

pub type TypeResult<T> = Result<T, TypeError>;
