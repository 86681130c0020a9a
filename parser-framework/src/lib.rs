//! Parser Framework
//!
//! A parser-combinator engine over immutable token streams. Parsers are
//! built from the primitives in [`primitives`] and [`text`] and composed with
//! the combinator methods on [`Parser`]; running one yields either a
//! [`Success`] with the remaining input or a [`Failure`] with a span for
//! diagnostics.
//!
//! ```
//! use parser_framework::{just, one_of};
//!
//! let digit = one_of("0123456789").map(|c: char| c.to_digit(10).unwrap_or(0));
//! let sum = digit
//!     .clone()
//!     .then(just('+').ignore_then(digit).repeat(0, None))
//!     .fold(|a, b| a + b);
//!
//! let parsed = sum.parse("1+2+3").unwrap();
//! assert_eq!(parsed.value, 6);
//! assert!(parsed.remaining.is_empty());
//! ```

pub mod combinators;
pub mod error;
pub mod input;
pub mod parser;
pub mod primitives;
pub mod report;
pub mod text;

pub use common_framework::{LineIndex, Position, Span};
#[cfg(feature = "diagnostics")]
pub use error::SourcedFailure;
pub use error::{Failure, FailureKind};
pub use input::{InputStream, IntoTokens, StreamError};
pub use parser::{ParseResult, Parser, Success, Token};
pub use primitives::{
    fail, just, none_of, one_of, reject, result, satisfy, take, take_any, take_until, unexpected,
    zero,
};
pub use report::make_report;
pub use text::{just_str, take_until_str};
