//! Core utilities shared by every stage of the pipeline: interned
//! identifiers, source spans, diagnostics, and the typed index vectors
//! `mlc-sem`'s type-variable store builds on.
//!
//! The whole compilation runs sequentially on a single thread over a
//! single in-memory expression (§5, §6.1), so unlike a project-wide
//! compiler these utilities favor simplicity over concurrent data
//! structures: one `RefCell`-backed interner, one `Span`/source buffer,
//! at most one live [`diagnostic::Diagnostic`].

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;
