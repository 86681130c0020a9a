use std::fmt;
use std::ops::Range;

/// A half-open `start..end` range of token positions.
///
/// Positions are counted in tokens from the origin of the input, so for a
/// character stream a span indexes characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates a span covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Creates the one-token span starting at `position`.
    pub fn at(position: usize) -> Self {
        Self::new(position, position + 1)
    }

    /// Returns the number of tokens covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no tokens.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
