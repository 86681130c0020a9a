//! Leaf parsers, defined directly over the input stream.
//!
//! The stream's `take`/`find` are the only places where bounds are checked;
//! every primitive that reads a token goes through [`take_any`] or [`take`].

use std::fmt;

use common_framework::Span;

use crate::error::{Failure, FailureKind};
use crate::input::{InputStream, IntoTokens};
use crate::parser::{Parser, Success, Token};

/// Succeeds with `value` without consuming input.
pub fn result<T: Token, O>(value: O) -> Parser<T, O>
where
    O: Clone + Send + Sync + 'static,
{
    Parser::new(move |input| Ok(Success::new(input, value.clone())))
}

/// Always fails with "Zero parser.".
pub fn zero<T: Token, O: 'static>() -> Parser<T, O> {
    Parser::new(|input: InputStream<T>| {
        let span = Span::at(input.position());
        Err(Failure::custom("Zero parser.", span).with_label("zero"))
    })
}

/// Always fails with the given message.
pub fn fail<T: Token, O: 'static>(message: impl Into<String>) -> Parser<T, O> {
    let message = message.into();
    Parser::new(move |input: InputStream<T>| {
        let span = Span::at(input.position());
        Err(Failure::custom(message.clone(), span).with_label("fail"))
    })
}

/// Always fails, reporting `found` as an unexpected item.
pub fn unexpected<T: Token, O: 'static>(found: impl fmt::Debug) -> Parser<T, O> {
    let found = format!("{found:?}");
    Parser::new(move |input: InputStream<T>| {
        let kind = FailureKind::Unexpected {
            found: found.clone(),
        };
        Err(Failure::new(kind, Span::at(input.position())))
    })
}

/// Always fails with exactly `failure`.
pub fn reject<T: Token, O: 'static>(failure: Failure) -> Parser<T, O> {
    Parser::new(move |_| Err(failure.clone()))
}

/// Consumes a single token of any value.
pub fn take_any<T: Token>() -> Parser<T, T> {
    Parser::new(|input: InputStream<T>| {
        let exhausted = || Failure::end_of_input(input.position()).with_label("take_any");
        let (taken, remaining) = input.take(1).map_err(|_| exhausted())?;
        let token = taken.into_iter().next().ok_or_else(exhausted)?;
        Ok(Success::new(remaining, token))
    })
}

/// Consumes exactly `amount` tokens.
pub fn take<T: Token>(amount: usize) -> Parser<T, Vec<T>> {
    Parser::new(move |input: InputStream<T>| {
        let (taken, remaining) = input
            .take(amount)
            .map_err(|_| Failure::end_of_input(input.position()).with_label("take"))?;
        Ok(Success::new(remaining, taken))
    })
}

/// Consumes one token and accepts it if `predicate` holds, otherwise fails
/// with an `Unexpected` failure pointing at that token.
fn accept_if<T: Token, F>(label: &'static str, predicate: F) -> Parser<T, T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    take_any().spanned().bind(move |(token, span)| {
        if predicate(&token) {
            result(token)
        } else {
            let kind = FailureKind::Unexpected {
                found: format!("{token:?}"),
            };
            reject(Failure::new(kind, span).with_label(label))
        }
    })
}

/// Accepts exactly the token `expected`.
pub fn just<T: Token + PartialEq>(expected: T) -> Parser<T, T> {
    accept_if("just", move |token| *token == expected)
}

/// Accepts one token that is a member of `set`.
pub fn one_of<T: Token + PartialEq>(set: impl IntoTokens<T>) -> Parser<T, T> {
    let set = set.into_tokens();
    accept_if("one_of", move |token| set.contains(token))
}

/// Accepts one token that is not a member of `set`.
pub fn none_of<T: Token + PartialEq>(set: impl IntoTokens<T>) -> Parser<T, T> {
    let set = set.into_tokens();
    accept_if("none_of", move |token| !set.contains(token))
}

/// Accepts one token for which `predicate` holds.
pub fn satisfy<T: Token, F>(predicate: F) -> Parser<T, T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    accept_if("satisfy", predicate)
}

/// Consumes every token before the first occurrence of `pattern`, leaving
/// the pattern itself in the input.
pub fn take_until<T: Token + PartialEq>(pattern: impl IntoTokens<T>) -> Parser<T, Vec<T>> {
    let pattern = pattern.into_tokens();
    Parser::new(move |input: InputStream<T>| match input.find(&pattern) {
        Ok(location) => take(location).parse(input),
        Err(_) => {
            let kind = FailureKind::PatternNotFound {
                pattern: describe(&pattern),
            };
            Err(Failure::new(kind, Span::at(input.position())).with_label("take_until"))
        }
    })
}

fn describe<T: fmt::Debug>(tokens: &[T]) -> String {
    match tokens {
        [single] => format!("{single:?}"),
        many => format!("{many:?}"),
    }
}
