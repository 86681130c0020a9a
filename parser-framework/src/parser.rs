use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::Failure;
use crate::input::InputStream;

/// Bounds every token type must satisfy.
///
/// Parsers are shared across threads, so the tokens captured by primitives
/// (expected values, token sets) must be `Send + Sync`.
pub trait Token: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> Token for T where T: Clone + fmt::Debug + Send + Sync + 'static {}

/// The success variant of a parse result: the produced value and the input
/// left after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Success<T, O> {
    pub remaining: InputStream<T>,
    pub value: O,
}

impl<T, O> Success<T, O> {
    pub fn new(remaining: InputStream<T>, value: O) -> Self {
        Self { remaining, value }
    }

    /// Transforms the value, keeping the remaining input.
    pub fn map<U, F>(self, f: F) -> Success<T, U>
    where
        F: FnOnce(O) -> U,
    {
        Success {
            remaining: self.remaining,
            value: f(self.value),
        }
    }
}

/// Outcome of a single parse attempt.
pub type ParseResult<T, O> = Result<Success<T, O>, Failure>;

type ParseFn<T, O> = Arc<dyn Fn(InputStream<T>) -> ParseResult<T, O> + Send + Sync>;

/// A parser consuming tokens of type `T` and producing an `O`.
///
/// A parser wraps a single parsing function. Cloning shares that function;
/// combinators never change it but build a new parser closing over the old
/// one. The label is attached with [`Parser::with_label`], which consumes the
/// parser, so a parser that has been shared can no longer be relabelled.
pub struct Parser<T, O> {
    parse_fn: ParseFn<T, O>,
    label: Option<Arc<str>>,
}

impl<T, O> Clone for Parser<T, O> {
    fn clone(&self) -> Self {
        Parser {
            parse_fn: Arc::clone(&self.parse_fn),
            label: self.label.clone(),
        }
    }
}

impl<T, O> fmt::Debug for Parser<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<T: Token, O: 'static> Parser<T, O> {
    /// Wraps a parsing function.
    pub fn new<F>(parse_fn: F) -> Self
    where
        F: Fn(InputStream<T>) -> ParseResult<T, O> + Send + Sync + 'static,
    {
        Parser {
            parse_fn: Arc::new(parse_fn),
            label: None,
        }
    }

    /// Runs the parser.
    ///
    /// Never panics on any input; running out of tokens is reported as a
    /// [`Failure`]. A failure leaving a labelled parser carries its label.
    pub fn parse(&self, input: impl Into<InputStream<T>>) -> ParseResult<T, O> {
        let result = (self.parse_fn)(input.into());
        match (&self.label, result) {
            (Some(label), Err(failure)) => {
                trace!(%label, span = %failure.span(), "labelled parser failed");
                Err(failure.with_label(label.as_ref()))
            }
            (_, result) => result,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Attaches a diagnostic label reported with failures of this parser.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(Arc::from(label.into()));
        self
    }
}
