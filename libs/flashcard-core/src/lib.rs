//! Core flashcard library shared by the local store and its front ends.
//!
//! Provides:
//! - Shared types (Collection, Card, CardPatch, SearchQuery, etc.)
//! - Tag normalization
//! - Text and JSON import parsers
//! - The daily streak transition
//! - Study ordering strategies and the study session cursor

pub mod error;
pub mod parser;
pub mod streak;
pub mod study;
pub mod tags;
pub mod types;

pub use error::{ParseError, Result};
pub use parser::{cards_from_json, parse_json, parse_text, TextImport};
pub use streak::next_streak;
pub use study::{MasteryFirst, SeededShuffle, StudyOrder, StudySession};
pub use tags::normalize_tags;
pub use types::{
    Card, CardPatch, Collection, CollectionStats, CollectionWithStats, DayActivity, ExportBundle,
    ImportSummary, RawCard, ReminderSettings, SearchQuery, SortOrder, StreakState,
    EXPORT_FORMAT_VERSION,
};
