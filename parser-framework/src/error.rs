use common_framework::Span;
use thiserror::Error;

/// What went wrong in a failed parse attempt.
///
/// The `Display` text of a kind is the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// More input was requested than remains.
    #[error("Expected something, but found end of input.")]
    EndOfInput,
    /// A single token was present but not accepted.
    #[error("Unexpected item {found}.")]
    Unexpected { found: String },
    /// A run of tokens did not match the expected literal.
    #[error("Expected {expected}, instead found {found}.")]
    Expected { expected: String, found: String },
    /// `take_until` found no occurrence of its pattern ahead.
    #[error("Pattern {pattern} not in input.")]
    PatternNotFound { pattern: String },
    /// User-constructed failure (`fail`, `zero`).
    #[error("{0}")]
    Custom(String),
    /// An opening delimiter was never closed.
    #[error("Unclosed delimiter {delimiter}.")]
    Unclosed { delimiter: String },
    /// A repetition matched fewer times than its minimum.
    #[error("Expected input.")]
    TooFew { minimum: usize, found: usize },
    /// Both branches of an alternation failed.
    #[error("Both parsers returned an error. First parser: {first}; Second parser: {second}")]
    Combined {
        first: Box<Failure>,
        second: Box<Failure>,
    },
}

impl FailureKind {
    /// Short identifier used in diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::EndOfInput => "end_of_input",
            Self::Unexpected { .. } => "unexpected",
            Self::Expected { .. } => "expected",
            Self::PatternNotFound { .. } => "pattern_not_found",
            Self::Custom(_) => "custom",
            Self::Unclosed { .. } => "unclosed",
            Self::TooFew { .. } => "too_few",
            Self::Combined { .. } => "combined",
        }
    }
}

/// The failure variant of a parse result.
///
/// A failure never reports consumed input: callers may retry from the
/// position they started at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Failure {
    kind: FailureKind,
    span: Span,
    label: Option<String>,
}

impl Failure {
    pub fn new(kind: FailureKind, span: Span) -> Self {
        Self {
            kind,
            span,
            label: None,
        }
    }

    /// Failure for running out of input at `position`.
    pub fn end_of_input(position: usize) -> Self {
        Self::new(FailureKind::EndOfInput, Span::at(position))
    }

    /// Failure carrying a user-provided message.
    pub fn custom(message: impl Into<String>, span: Span) -> Self {
        Self::new(FailureKind::Custom(message.into()), span)
    }

    /// Combines the failures of two alternatives; the span covers both.
    pub fn combine(first: Failure, second: Failure) -> Self {
        let span = first.span.merge(&second.span);
        Self::new(
            FailureKind::Combined {
                first: Box::new(first),
                second: Box::new(second),
            },
            span,
        )
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The human-readable message of this failure.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns the failure tagged with the label of the parser it left.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the failure pointing at `span` instead.
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[cfg(feature = "diagnostics")]
mod diagnostics {
    use std::fmt;
    use std::sync::Arc;

    use common_framework::LineIndex;
    use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
    use thiserror::Error;

    use super::Failure;

    impl Diagnostic for Failure {
        fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
            Some(Box::new(format!("parser::{}", self.kind.code_suffix())))
        }

        fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
            self.label
                .as_ref()
                .map(|label| Box::new(format!("expected to find {label}")) as Box<dyn fmt::Display + 'a>)
        }
    }

    /// A [`Failure`] attached to the text it was produced from.
    ///
    /// Token positions are translated into byte offsets so that `miette` can
    /// underline the offending characters.
    #[derive(Debug, Error)]
    #[error("{failure}")]
    pub struct SourcedFailure {
        failure: Failure,
        source_code: Arc<NamedSource<String>>,
        span: SourceSpan,
    }

    impl SourcedFailure {
        pub fn failure(&self) -> &Failure {
            &self.failure
        }

        pub fn source_span(&self) -> SourceSpan {
            self.span
        }
    }

    impl Failure {
        /// Attaches the original text of a `char` stream to this failure.
        pub fn with_source(self, name: impl AsRef<str>, text: impl Into<String>) -> SourcedFailure {
            let text = text.into();
            let index = LineIndex::new(&text);
            let start = index.byte_offset(self.span.start);
            let end = index.byte_offset(self.span.end);
            SourcedFailure {
                failure: self,
                span: SourceSpan::from(start..end),
                source_code: Arc::new(NamedSource::new(name, text)),
            }
        }
    }

    impl Diagnostic for SourcedFailure {
        fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
            self.failure.code()
        }

        fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
            self.failure.help()
        }

        fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
            let text = match self.failure.label() {
                Some(label) => format!("in parser {label}"),
                None => "here".to_string(),
            };
            let labels = vec![LabeledSpan::new_with_span(Some(text), self.span)];
            Some(Box::new(labels.into_iter()))
        }

        fn source_code(&self) -> Option<&dyn SourceCode> {
            Some(&*self.source_code)
        }
    }
}

#[cfg(feature = "diagnostics")]
pub use diagnostics::SourcedFailure;
