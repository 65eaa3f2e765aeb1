//! Error types for resolution and tree selection

use std::fmt;

/// Resolution over one document failed; shared state is untouched and the
/// caller may retry with a different grammar or document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Chart resolution never produced the grammar's start symbol
    ParseFailed { start_symbol: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ParseFailed { start_symbol } => {
                write!(
                    f,
                    "parse failed: start symbol '{}' was never produced",
                    start_symbol
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}
