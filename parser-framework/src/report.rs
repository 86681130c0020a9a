//! Plain-text error reports for failures of `char` parsers.

use common_framework::LineIndex;

use crate::error::Failure;

/// Formats `failure` against the text that was parsed:
///
/// ```text
/// Error at line 2, in parser number:
///     let x = ?
///             ^
/// Unexpected item '?'.
/// ```
///
/// The label part is left out for unlabelled failures.
pub fn make_report(text: &str, failure: &Failure) -> String {
    let index = LineIndex::new(text);
    let position = index.position(failure.span().start);
    let line = index.line(position.line).unwrap_or_default();

    let mut report = format!("Error at line {}", position.line);
    if let Some(label) = failure.label() {
        report.push_str(", in parser ");
        report.push_str(label);
    }
    report.push_str(":\n    ");
    report.push_str(line);
    report.push_str("\n    ");
    report.push_str(&" ".repeat(position.column - 1));
    report.push_str("^\n");
    report.push_str(&failure.message());
    report
}
