//! mlc-lex — lexical analysis (spec §4.1).
//!
//! ============================================================================
//! LEXICAL ANALYSIS THEORY
//! ============================================================================
//!
//! Lexical analysis is the first phase of compilation. It transforms a
//! stream of characters into a stream of tokens.
//!
//! Formally, the lexer is a function `L: Σ* → T*` where `Σ` is the source
//! alphabet and `T` the (closed) set of token kinds. It runs in a single
//! pass, O(n) in the length of the input, and is context-free: it never
//! looks beyond the current and next character.
//!
//! This lexer's token set is intentionally small — see [`TokenKind`] — it
//! covers exactly the lexemes the source language defines, not a
//! general-purpose systems-language token set.

mod error;
mod lexer;
mod token;

pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
