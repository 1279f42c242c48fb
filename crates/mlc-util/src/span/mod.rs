//! Source location tracking.
//!
//! The driver reads a single expression from stdin (see §6.1), so unlike a
//! multi-file compiler there is exactly one source buffer per compilation —
//! no [`FileId`]/`SourceMap` indirection is needed, only byte offsets plus
//! the line/column pair used for diagnostic rendering.
//!
//! # Examples
//!
//! ```
//! use mlc_util::span::Span;
//!
//! let span = Span::new(10, 20, 1, 5);
//! assert_eq!(span.start, 10);
//! assert_eq!(span.end, 20);
//! ```

/// A byte range in the source text, with the 1-indexed line/column of its
/// start for human-readable diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Span covering neither file position nor text; used by synthesized
    /// nodes that have no corresponding source text (e.g. renamer-inserted
    /// binders).
    pub const DUMMY: Span = Span::new(0, 0, 0, 0);

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_spans_the_full_range() {
        let a = Span::new(0, 3, 1, 1);
        let b = Span::new(10, 14, 1, 11);
        let joined = a.to(b);
        assert_eq!(joined.start, 0);
        assert_eq!(joined.end, 14);
    }
}
