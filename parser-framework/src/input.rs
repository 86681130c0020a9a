use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Structural errors raised by [`InputStream`] itself.
///
/// These never cross the parse boundary: the primitives convert them into a
/// [`Failure`](crate::Failure) with a matching [`FailureKind`](crate::FailureKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("requested {requested} tokens at position {position}, but only {remaining} remain")]
    OutOfRange {
        requested: usize,
        remaining: usize,
        position: usize,
    },
    #[error("pattern not found after position {position}")]
    PatternNotFound { position: usize },
}

/// An immutable positional view over a shared token buffer.
///
/// Cloning a stream clones an `Arc` and a cursor, never the tokens. The
/// position is counted from the origin of the buffer and never reset, so it
/// always equals the number of tokens consumed so far.
pub struct InputStream<T> {
    tokens: Arc<[T]>,
    position: usize,
}

impl<T> InputStream<T> {
    /// Creates a stream positioned at the start of `tokens`.
    pub fn new(tokens: Vec<T>) -> Self {
        Self {
            tokens: Arc::from(tokens),
            position: 0,
        }
    }

    /// Returns the number of tokens consumed since the origin.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of tokens left.
    pub fn len(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Returns `true` if no tokens are left.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the remaining tokens.
    pub fn as_slice(&self) -> &[T] {
        &self.tokens[self.position..]
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<&T> {
        self.tokens.get(self.position)
    }

    /// Splits off the next `n` tokens, returning them with the advanced stream.
    ///
    /// This only partitions by position; token content is never inspected.
    pub fn take(&self, n: usize) -> Result<(Vec<T>, InputStream<T>), StreamError>
    where
        T: Clone,
    {
        if n > self.len() {
            return Err(StreamError::OutOfRange {
                requested: n,
                remaining: self.len(),
                position: self.position,
            });
        }
        let taken = self.as_slice()[..n].to_vec();
        let rest = InputStream {
            tokens: Arc::clone(&self.tokens),
            position: self.position + n,
        };
        Ok((taken, rest))
    }

    /// Returns the lowest index, relative to the current position, at which
    /// `pattern` occurs in the remaining tokens.
    ///
    /// An empty pattern is found at index 0.
    pub fn find(&self, pattern: &[T]) -> Result<usize, StreamError>
    where
        T: PartialEq,
    {
        let not_found = StreamError::PatternNotFound {
            position: self.position,
        };
        if pattern.is_empty() {
            return Ok(0);
        }
        self.as_slice()
            .windows(pattern.len())
            .position(|window| window == pattern)
            .ok_or(not_found)
    }
}

impl<T> Clone for InputStream<T> {
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
            position: self.position,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for InputStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStream")
            .field("position", &self.position)
            .field("remaining", &self.as_slice())
            .finish()
    }
}

/// Two streams are equal when they stand at the same position with the same
/// tokens ahead.
impl<T: PartialEq> PartialEq for InputStream<T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for InputStream<T> {}

impl fmt::Display for InputStream<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}

impl<T> From<Vec<T>> for InputStream<T> {
    fn from(tokens: Vec<T>) -> Self {
        Self::new(tokens)
    }
}

impl<T: Clone> From<&[T]> for InputStream<T> {
    fn from(tokens: &[T]) -> Self {
        Self::new(tokens.to_vec())
    }
}

impl<T: Clone, const N: usize> From<&[T; N]> for InputStream<T> {
    fn from(tokens: &[T; N]) -> Self {
        Self::new(tokens.to_vec())
    }
}

impl<T> From<&InputStream<T>> for InputStream<T> {
    fn from(stream: &InputStream<T>) -> Self {
        stream.clone()
    }
}

impl From<&str> for InputStream<char> {
    fn from(text: &str) -> Self {
        Self::new(text.chars().collect())
    }
}

impl From<String> for InputStream<char> {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

/// Conversion into an owned token sequence, used for token sets and search
/// patterns.
pub trait IntoTokens<T> {
    fn into_tokens(self) -> Vec<T>;
}

impl IntoTokens<char> for &str {
    fn into_tokens(self) -> Vec<char> {
        self.chars().collect()
    }
}

impl IntoTokens<char> for String {
    fn into_tokens(self) -> Vec<char> {
        self.chars().collect()
    }
}

impl IntoTokens<char> for char {
    fn into_tokens(self) -> Vec<char> {
        vec![self]
    }
}

impl<T> IntoTokens<T> for Vec<T> {
    fn into_tokens(self) -> Vec<T> {
        self
    }
}

impl<T: Clone> IntoTokens<T> for &[T] {
    fn into_tokens(self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T, const N: usize> IntoTokens<T> for [T; N] {
    fn into_tokens(self) -> Vec<T> {
        self.into()
    }
}

impl<T: Clone, const N: usize> IntoTokens<T> for &[T; N] {
    fn into_tokens(self) -> Vec<T> {
        self.to_vec()
    }
}
