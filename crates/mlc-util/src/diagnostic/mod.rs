//! Diagnostics.
//!
//! The pipeline stops at the first error (§7: "fatal on first error"), so
//! unlike a batch compiler collecting many diagnostics per run, there is at
//! most one [`Diagnostic`] to report per invocation. This module keeps only
//! what the driver needs to print that single, one-line message.
//!
//! # Examples
//!
//! ```
//! use mlc_util::diagnostic::{Diagnostic, Level};
//! use mlc_util::span::Span;
//!
//! let d = Diagnostic::new(Level::Error, "unexpected character '@'", Span::new(4, 5, 1, 5));
//! assert_eq!(d.level, Level::Error);
//! ```

use crate::span::Span;
use std::fmt;

/// Severity of a [`Diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single reportable message, bound to a source location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (at {}:{})",
            self.level, self.message, self.span.line, self.span.column
        )
    }
}
