use mlc_util::Span;
use thiserror::Error;

/// Errors the lexer can raise (spec §7). There is no recovery: the first
/// error encountered ends scanning.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    Unexpected(char, Span),

    #[error("unterminated block comment")]
    UnterminatedComment(Span),
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::Unexpected(_, span) => *span,
            LexError::UnterminatedComment(span) => *span,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
