//! # Parse Errors
//!
//! The only failure the text parser can produce. The message is the YAML
//! parser's diagnostic verbatim (or a conversion message when the text is
//! well-formed YAML but has no canonical representation).

use std::fmt;

use thiserror::Error;

/// Location of a syntax error inside the source text, as reported by the
/// YAML parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Text could not be turned into a canonical [`Value`](crate::Value).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    /// Diagnostic text from the underlying parser.
    pub message: String,
    /// Where the parser gave up, when known.
    pub position: Option<Position>,
}

impl ParseError {
    /// Build an error with no source location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub(crate) fn from_yaml(err: &serde_yaml::Error) -> Self {
        Self {
            message: err.to_string(),
            position: err.location().map(|loc| Position {
                line: loc.line(),
                column: loc.column(),
            }),
        }
    }
}
