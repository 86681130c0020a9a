//! Client parsers written against `parser-framework`.
//!
//! - [`helpers`]: small text parsers (identifiers, whitespace, numbers,
//!   delimiters) assembled from the framework's primitives.
//! - [`calc`]: a calculator grammar, scanned to tokens and then parsed.
//! - [`settings`]: a `key = value` settings-file grammar.
//! - [`logging`]: the `tracing` subscriber the binaries install.

pub mod calc;
pub mod helpers;
pub mod logging;
pub mod settings;
