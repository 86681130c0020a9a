//! Common Framework
//!
//! Location types shared by parser-framework and its clients: token spans
//! and line/column lookup over the original text.

pub mod position;
pub mod span;

pub use position::{LineIndex, Position};
pub use span::Span;
