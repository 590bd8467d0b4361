//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while reading an import payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty file")]
    EmptyFile,

    #[error("no valid cards found ({skipped} lines skipped)")]
    NoValidLines { skipped: usize },

    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}
