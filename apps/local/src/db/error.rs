//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("collection not found: {0}")]
    CollectionNotFound(i64),
}
