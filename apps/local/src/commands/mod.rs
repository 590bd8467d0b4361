//! Commands exposed to the presentation layer.
//!
//! Each command locks the repository for its duration and returns plain data
//! or a `CommandError` the UI can show directly.

pub mod card;
pub mod collection;
pub mod import;
pub mod settings;
pub mod stats;
pub mod study;

pub use card::{
    create_card, delete_card, get_card, search_cards, set_card_mastered, update_card,
    update_card_fields,
};
pub use collection::{create_collection, delete_collection, get_collection_stats, list_collections};
pub use import::{export_collection, import_file, import_json, import_text, ExportedFile};
pub use settings::{get_reminder_settings, save_reminder_settings};
pub use stats::{get_activity, get_streak, DEFAULT_ACTIVITY_DAYS, MAX_ACTIVITY_DAYS};
pub use study::{get_study_queue, record_answer};

use crate::db::DbError;
use crate::reminder::ReminderError;
use flashcard_core::ParseError;

/// Error category, used by the UI to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    MalformedInput,
    Storage,
    Io,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CommandError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<DbError> for CommandError {
    fn from(e: DbError) -> Self {
        let kind = match &e {
            DbError::EmptyField { .. } => ErrorKind::Validation,
            DbError::CollectionNotFound(_) => ErrorKind::NotFound,
            DbError::Sqlite(_) => ErrorKind::Storage,
        };
        if kind == ErrorKind::Storage {
            tracing::error!(error = %e, "storage failure");
        }
        Self::new(kind, e.to_string())
    }
}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> Self {
        Self::new(ErrorKind::MalformedInput, e.to_string())
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, e.to_string())
    }
}

impl From<ReminderError> for CommandError {
    fn from(e: ReminderError) -> Self {
        Self::internal(e.to_string())
    }
}
