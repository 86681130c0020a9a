//! Text helpers built only from the framework's primitives and combinators.

use std::iter;

use parser_framework::{
    just, just_str, one_of, reject, result, satisfy, take_any, Failure, FailureKind, Parser, Token,
};

/// Matches the literal `expected`.
pub fn symbol(expected: &str) -> Parser<char, String> {
    just_str(expected).with_label("symbol")
}

/// One or more characters for which `predicate` holds.
pub fn take_while<F>(predicate: F) -> Parser<char, String>
where
    F: Fn(&char) -> bool + Send + Sync + 'static,
{
    satisfy(predicate).repeat(1, None).collect_str()
}

/// A letter or `_`, followed by any number of letters, digits and `_`.
pub fn ident() -> Parser<char, String> {
    let head = satisfy(|c: &char| c.is_alphabetic() || *c == '_');
    let tail = satisfy(|c: &char| c.is_alphanumeric() || *c == '_').repeat(0, None);
    head.then(tail)
        .map(|(head, tail)| iter::once(head).chain(tail).collect())
        .with_label("ident")
}

/// Any run of spaces, tabs and line breaks, possibly empty.
pub fn whitespace() -> Parser<char, String> {
    one_of(" \t\r\n").repeat(0, None).collect_str()
}

/// Spaces and tabs only, possibly empty.
pub fn inline_whitespace() -> Parser<char, String> {
    one_of(" \t").repeat(0, None).collect_str()
}

/// Runs `parser`, skipping whitespace on both sides.
pub fn padded_whitespace<O: 'static>(parser: Parser<char, O>) -> Parser<char, O> {
    parser.padded(whitespace())
}

/// Decimal number with an optional fractional part, e.g. `42` or `3.14`.
pub fn number() -> Parser<char, f64> {
    let digits = || take_while(char::is_ascii_digit);
    let fraction = just('.').ignore_then(digits()).optional();
    digits()
        .then(fraction)
        .spanned()
        .bind(|((whole, fraction), span)| {
            let text = match fraction {
                Some(fraction) => format!("{whole}.{fraction}"),
                None => whole,
            };
            match text.parse::<f64>() {
                Ok(value) => result(value),
                Err(err) => reject(Failure::custom(err.to_string(), span)),
            }
        })
        .with_label("number")
}

/// Consumes `c` when it is next, otherwise consumes nothing.
pub fn take_or_not(c: char) -> Parser<char, ()> {
    just(c).optional().map(|_| ())
}

/// Succeeds only when no input is left.
pub fn end_of_input<T: Token>() -> Parser<T, ()> {
    take_any()
        .optional()
        .spanned()
        .bind(|(token, span)| match token {
            None => result(()),
            Some(token) => {
                let kind = FailureKind::Unexpected {
                    found: format!("{token:?}"),
                };
                reject(Failure::new(kind, span).with_label("end_of_input"))
            }
        })
}

/// Parses `open`, `inner` and `close` in order, keeping the output of
/// `inner`.
///
/// Unlike [`Parser::delimited`], a missing closer is reported as an unclosed
/// `delimiter` pointing at the opener.
pub fn delimited_by<T, A, B, O>(
    open: Parser<T, A>,
    inner: Parser<T, O>,
    close: Parser<T, B>,
    delimiter: &str,
) -> Parser<T, O>
where
    T: Token,
    A: 'static,
    B: 'static,
    O: 'static,
{
    let delimiter = delimiter.to_string();
    open.spanned().bind(move |(_, open_span)| {
        let delimiter = delimiter.clone();
        let close = close.clone().map_failure(move |_| {
            let kind = FailureKind::Unclosed {
                delimiter: delimiter.clone(),
            };
            Failure::new(kind, open_span).with_label("delimited_by")
        });
        inner.clone().then_ignore(close)
    })
}
