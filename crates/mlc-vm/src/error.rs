//! Runtime error taxonomy (spec §7), exhaustive and fatal: the first
//! error encountered aborts interpretation (spec §5 concurrency note).

use mlc_util::Symbol;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("undefined register `{0}`")]
    UndefinedRegister(Symbol),
    #[error("division by zero")]
    DivByZero,
    #[error("memory access out of bounds")]
    MemoryBounds,
    #[error("malformed closure")]
    MalformedClosure,
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
