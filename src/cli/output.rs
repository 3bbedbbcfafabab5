//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use palaver::{DiscussionError, ToolOutcome};

/// Writes a tool outcome: results to stdout, failures to stderr.
///
/// # Errors
///
/// Returns [`DiscussionError::Io`] when the stream cannot be written.
pub fn write_outcome(outcome: &ToolOutcome) -> Result<(), DiscussionError> {
    if outcome.is_failure() {
        write_outcome_to(&mut io::stderr().lock(), outcome)
    } else {
        write_outcome_to(&mut io::stdout().lock(), outcome)
    }
}

/// Writes the outcome's payload followed by a newline to the given writer.
///
/// # Errors
///
/// Returns [`DiscussionError::Io`] when the writer fails.
pub fn write_outcome_to<W: Write>(
    writer: &mut W,
    outcome: &ToolOutcome,
) -> Result<(), DiscussionError> {
    writeln!(writer, "{}", outcome.text()).map_err(|error| DiscussionError::Io {
        message: error.to_string(),
    })
}
