use std::ops::{Add, BitOr, Mul, Shr, Sub};

use common_framework::Span;
use tracing::trace;

use crate::error::{Failure, FailureKind};
use crate::input::InputStream;
use crate::parser::{Parser, Success, Token};

// === Combinators as methods ===

impl<T: Token, O: 'static> Parser<T, O> {
    /// Monadic bind: parse with `self`, then with the parser `binder` builds
    /// from its output, on the remaining input.
    ///
    /// A failure of `self` is returned unchanged and `binder` is not called.
    pub fn bind<U: 'static, F>(self, binder: F) -> Parser<T, U>
    where
        F: Fn(O) -> Parser<T, U> + Send + Sync + 'static,
    {
        Parser::new(move |input| {
            let Success { remaining, value } = self.parse(input)?;
            binder(value).parse(remaining)
        })
    }

    /// Map: transform the output, consuming nothing extra.
    ///
    /// Equivalent to `self.bind(move |v| result(f(v)))` without requiring the
    /// mapped value to be `Clone`.
    pub fn map<U: 'static, F>(self, f: F) -> Parser<T, U>
    where
        F: Fn(O) -> U + Send + Sync + 'static,
    {
        Parser::new(move |input| self.parse(input).map(|success| success.map(&f)))
    }

    /// Sequence: parse `self` then `other`, returning both outputs.
    pub fn then<U: 'static>(self, other: Parser<T, U>) -> Parser<T, (O, U)> {
        Parser::new(move |input| {
            let first = self.parse(input)?;
            let second = other.parse(first.remaining)?;
            Ok(Success::new(second.remaining, (first.value, second.value)))
        })
    }

    /// Keep left: parse `self` then `other`, discarding the output of `other`.
    pub fn then_ignore<U: 'static>(self, other: Parser<T, U>) -> Parser<T, O> {
        self.then(other).map(|(value, _)| value)
    }

    /// Keep right: parse `self` then `other`, discarding the output of `self`.
    pub fn ignore_then<U: 'static>(self, other: Parser<T, U>) -> Parser<T, U> {
        self.bind(move |_| other.clone())
    }

    /// Choice: try `self`; if it fails, try `other` on the same input.
    ///
    /// Whatever the failed branch consumed is discarded. When both fail the
    /// result is a [`FailureKind::Combined`] holding both failures.
    pub fn alt(self, other: Parser<T, O>) -> Parser<T, O> {
        Parser::new(move |input: InputStream<T>| match self.parse(&input) {
            Ok(success) => Ok(success),
            Err(first) => {
                trace!(position = input.position(), %first, "trying second alternative");
                other
                    .parse(input)
                    .map_err(|second| Failure::combine(first, second))
            }
        })
    }

    /// Repeats `self` at least `minimum` and at most `maximum` times.
    ///
    /// Stops at the first failure, keeping the input after the last success.
    /// Fewer than `minimum` matches fail with [`FailureKind::TooFew`]. Without
    /// a maximum, a match that consumes nothing ends the loop once `minimum` is met.
    pub fn repeat(self, minimum: usize, maximum: Option<usize>) -> Parser<T, Vec<O>> {
        Parser::new(move |input: InputStream<T>| {
            let mut values = Vec::new();
            let mut stream = input;
            while maximum.map_or(true, |max| values.len() < max) {
                let success = match self.parse(&stream) {
                    Ok(success) => success,
                    Err(failure) => {
                        trace!(count = values.len(), %failure, "repeat stopped");
                        break;
                    }
                };
                let progressed = success.remaining.position() > stream.position();
                values.push(success.value);
                stream = success.remaining;
                if !progressed && maximum.is_none() && values.len() >= minimum {
                    trace!(count = values.len(), "repeat made no progress");
                    break;
                }
            }

            if values.len() < minimum {
                let kind = FailureKind::TooFew {
                    minimum,
                    found: values.len(),
                };
                return Err(Failure::new(kind, Span::at(stream.position())));
            }
            Ok(Success::new(stream, values))
        })
    }

    /// Optional: on failure succeed with `None` on the untouched input.
    pub fn optional(self) -> Parser<T, Option<O>> {
        Parser::new(move |input: InputStream<T>| match self.parse(&input) {
            Ok(success) => Ok(success.map(Some)),
            Err(_) => Ok(Success::new(input, None)),
        })
    }

    /// Parses `start`, then `self`, then `end`, keeping only the output of
    /// `self`.
    pub fn delimited<A: 'static, B: 'static>(
        self,
        start: Parser<T, A>,
        end: Parser<T, B>,
    ) -> Parser<T, O> {
        start.ignore_then(self).then_ignore(end)
    }

    /// Allows optional `padding` on both sides of `self`.
    pub fn padded<P: 'static>(self, padding: Parser<T, P>) -> Parser<T, O> {
        self.delimited(padding.clone().optional(), padding.optional())
    }

    /// Pairs the output with the span of tokens it was parsed from.
    pub fn spanned(self) -> Parser<T, (O, Span)> {
        Parser::new(move |input: InputStream<T>| {
            let start = input.position();
            self.parse(input).map(|success| {
                let span = Span::new(start, success.remaining.position());
                success.map(|value| (value, span))
            })
        })
    }

    /// Rewrites a failure of `self`; successes pass through untouched.
    pub fn map_failure<F>(self, f: F) -> Parser<T, O>
    where
        F: Fn(Failure) -> Failure + Send + Sync + 'static,
    {
        Parser::new(move |input| self.parse(input).map_err(&f))
    }
}

impl<T: Token, A: 'static, B: 'static> Parser<T, (A, Vec<B>)> {
    /// Folds the items onto the initial value, left to right.
    ///
    /// Expresses left-associative chains such as `a + b + c` without left
    /// recursion: `operand.then(op.ignore_then(operand).repeat(0, None))`.
    pub fn fold<F>(self, fold_fn: F) -> Parser<T, A>
    where
        F: Fn(A, B) -> A + Send + Sync + 'static,
    {
        self.map(move |(initial, items)| items.into_iter().fold(initial, &fold_fn))
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: Token, O: 'static, U: 'static> Add<Parser<T, U>> for Parser<T, O> {
    type Output = Parser<T, (O, U)>;

    fn add(self, rhs: Parser<T, U>) -> Self::Output {
        self.then(rhs)
    }
}

/// `-` for keep left: A - B -> A
impl<T: Token, O: 'static, U: 'static> Sub<Parser<T, U>> for Parser<T, O> {
    type Output = Parser<T, O>;

    fn sub(self, rhs: Parser<T, U>) -> Self::Output {
        self.then_ignore(rhs)
    }
}

/// `*` for keep right: A * B -> B
impl<T: Token, O: 'static, U: 'static> Mul<Parser<T, U>> for Parser<T, O> {
    type Output = Parser<T, U>;

    fn mul(self, rhs: Parser<T, U>) -> Self::Output {
        self.ignore_then(rhs)
    }
}

/// `|` for choice: A | B
impl<T: Token, O: 'static> BitOr<Parser<T, O>> for Parser<T, O> {
    type Output = Parser<T, O>;

    fn bitor(self, rhs: Parser<T, O>) -> Self::Output {
        self.alt(rhs)
    }
}

/// `>>` for map: A >> fn
impl<T: Token, O: 'static, U: 'static, F> Shr<F> for Parser<T, O>
where
    F: Fn(O) -> U + Send + Sync + 'static,
{
    type Output = Parser<T, U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}
