use mlc_lex::TokenKind;
use mlc_util::Span;
use thiserror::Error;

/// No recovery (spec §4.2): the first unexpected token aborts parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found} at {position:?}")]
pub struct ParseError {
    pub expected: String,
    pub found: TokenKind,
    pub position: Span,
}

pub type ParseResult<T> = Result<T, ParseError>;
