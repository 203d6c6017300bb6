//! Core type definitions shared by every obparse crate.
//!
//! Nothing in here depends on the grammar: source positions, the dialect
//! selector, charset configuration, and the caller-facing option set.

pub mod charset;
pub mod dialect;
pub mod options;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use charset::{Charset, CharsetConfig};
pub use dialect::DialectMode;
pub use options::{ConfigError, ParseOptions};

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const ZERO: Self = Self { start: 0, end: 0 };

    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub const fn contains(self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Slice `source` by this span. Out-of-range spans yield `""`.
    #[must_use]
    pub fn slice(self, source: &str) -> &str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Human-facing location: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourcePosition {
    pub offset: u32,
    pub line: u32,
    pub col: u32,
}

impl SourcePosition {
    #[must_use]
    pub const fn new(offset: u32, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_union_covers_both() {
        let a = Span::new(4, 9);
        let b = Span::new(2, 6);
        assert_eq!(a.union(b), Span::new(2, 9));
        assert_eq!(b.union(a), Span::new(2, 9));
    }

    #[test]
    fn span_slice_out_of_range_is_empty() {
        assert_eq!(Span::new(0, 6).slice("SELECT 1"), "SELECT");
        assert_eq!(Span::new(7, 99).slice("SELECT 1"), "");
    }

    #[test]
    fn position_display_is_line_col() {
        assert_eq!(SourcePosition::new(10, 2, 1).to_string(), "2:1");
    }
}
