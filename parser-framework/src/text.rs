//! Specialisations for character streams.

use crate::error::{Failure, FailureKind};
use crate::parser::{Parser, Token};
use crate::primitives::{reject, result, take, take_until};

/// Matches the literal `expected`, producing it as a `String`.
pub fn just_str(expected: &str) -> Parser<char, String> {
    let expected = expected.to_string();
    let len = expected.chars().count();
    take(len).spanned().bind(move |(chars, span)| {
        let found: String = chars.into_iter().collect();
        if found == expected {
            result(found)
        } else {
            let kind = FailureKind::Expected {
                expected: format!("{expected:?}"),
                found: format!("{found:?}"),
            };
            reject(Failure::new(kind, span).with_label("just_str"))
        }
    })
}

/// Consumes every character before the first occurrence of `pattern`.
pub fn take_until_str(pattern: &str) -> Parser<char, String> {
    let described = format!("{pattern:?}");
    take_until(pattern).collect_str().map_failure(move |failure| {
        if !matches!(failure.kind(), FailureKind::PatternNotFound { .. }) {
            return failure;
        }
        let kind = FailureKind::PatternNotFound {
            pattern: described.clone(),
        };
        Failure::new(kind, failure.span()).with_label("take_until")
    })
}

impl<T: Token> Parser<T, Vec<char>> {
    /// Concatenates a sequence of characters into a `String`.
    pub fn collect_str(self) -> Parser<T, String> {
        self.map(|chars| chars.into_iter().collect())
    }
}
