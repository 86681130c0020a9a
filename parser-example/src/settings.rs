//! `key = value` settings files.
//!
//! ```text
//! # comments run to the end of the line
//! name = "demo"
//! port = 8080
//! debug = true
//! ```
//!
//! Values are double-quoted strings, integers or `true`/`false`. Blank lines
//! and comment-only lines are skipped.

use parser_framework::{
    just, none_of, reject, result, Failure, FailureKind, InputStream, Parser, Span, Success,
};

use crate::helpers::{delimited_by, end_of_input, ident, inline_whitespace, take_or_not, take_while};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
    /// Character span of the key.
    pub span: Span,
}

/// Entries of a settings file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub entries: Vec<Entry>,
}

impl Settings {
    /// Value of `key`; a later entry overrides an earlier one.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }
}

fn string_value() -> Parser<char, Value> {
    let body = none_of("\"\n").repeat(0, None).collect_str();
    delimited_by(just('"'), body, just('"'), "'\"'").map(Value::Str)
}

fn int_value() -> Parser<char, Value> {
    just('-')
        .optional()
        .then(take_while(char::is_ascii_digit))
        .spanned()
        .bind(|((sign, digits), span)| {
            let text = match sign {
                Some(_) => format!("-{digits}"),
                None => digits,
            };
            match text.parse::<i64>() {
                Ok(value) => result(Value::Int(value)),
                Err(err) => reject(Failure::custom(format!("Invalid integer: {err}."), span)),
            }
        })
}

fn bool_value() -> Parser<char, Value> {
    ident().spanned().bind(|(word, span)| match word.as_str() {
        "true" => result(Value::Bool(true)),
        "false" => result(Value::Bool(false)),
        _ => {
            let kind = FailureKind::Expected {
                expected: "a value".to_string(),
                found: format!("{word:?}"),
            };
            reject(Failure::new(kind, span))
        }
    })
}

/// A value, picked by its first character.
fn value() -> Parser<char, Value> {
    let string = string_value();
    let int = int_value();
    let boolean = bool_value();
    Parser::new(move |input: InputStream<char>| match input.peek() {
        Some('"') => string.parse(input),
        Some(c) if *c == '-' || c.is_ascii_digit() => int.parse(input),
        _ => boolean.parse(input),
    })
    .with_label("value")
}

/// Trailing blanks, an optional comment and the line break (or end of
/// input).
fn line_end() -> Parser<char, ()> {
    let comment = just('#').ignore_then(none_of("\n").repeat(0, None));
    let newline = take_or_not('\r').ignore_then(just('\n')).map(|_| ());
    let end = newline.alt(end_of_input()).map_failure(|failure| {
        let kind = FailureKind::Custom("Expected end of line.".to_string());
        Failure::new(kind, failure.span())
    });
    inline_whitespace()
        .ignore_then(comment.optional())
        .ignore_then(end)
}

fn entry() -> Parser<char, Entry> {
    inline_whitespace()
        .ignore_then(ident().spanned())
        .then_ignore(just('=').padded(inline_whitespace()))
        .then(value())
        .then_ignore(line_end())
        .map(|((key, span), value)| Entry { key, value, span })
}

/// The whole file.
pub fn settings() -> Parser<char, Settings> {
    let entry = entry();
    let line = entry.clone().map(Some).alt(line_end().map(|_| None));
    let lines = line.repeat(0, None).map(|lines| Settings {
        entries: lines.into_iter().flatten().collect(),
    });

    lines.bind(move |settings| {
        let entry = entry.clone();
        Parser::new(move |input: InputStream<char>| {
            if input.is_empty() {
                return Ok(Success::new(input, settings.clone()));
            }
            // Lines stopped matching: rerun the entry grammar for its failure.
            match entry.parse(&input) {
                Err(failure) => Err(failure),
                Ok(_) => {
                    let kind = FailureKind::Custom("Unparsed input.".to_string());
                    Err(Failure::new(kind, Span::at(input.position())))
                }
            }
        })
    })
}

/// Parses a complete settings file.
pub fn parse(text: &str) -> Result<Settings, Failure> {
    settings().parse(text).map(|parsed| parsed.value)
}
