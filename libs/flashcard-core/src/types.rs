//! Core types for flashcard application.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Version tag written into every collection export.
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// A named group of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
}

/// A stored card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub collection_id: i64,
    pub front: String,
    pub back: String,
    pub mastered: bool,
    pub created_at: NaiveDateTime,
    /// Normalized, comma-joined tag list. Empty when the card has no tags.
    pub tags: String,
    pub image_uri: Option<String>,
}

impl Card {
    /// Tags as individual tokens.
    pub fn tag_list(&self) -> Vec<&str> {
        crate::tags::split_tags(&self.tags)
    }
}

/// Card fields before insertion (from a form, a text line or a JSON entry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCard {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub image_uri: Option<String>,
}

impl RawCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_image(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = Some(image_uri.into());
        self
    }

    /// Both sides carry text once trimmed.
    pub fn is_valid(&self) -> bool {
        !self.front.trim().is_empty() && !self.back.trim().is_empty()
    }
}

/// Partial card update. Absent fields are left untouched.
///
/// Unknown keys are rejected when deserializing, so only the listed columns
/// can ever be written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// `Some(None)` clears the image reference.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_uri: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastered: Option<bool>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
            && self.back.is_none()
            && self.tags.is_none()
            && self.image_uri.is_none()
            && self.mastered.is_none()
    }
}

// Distinguishes a missing key (outer None via `default`) from an explicit null.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Result ordering for card searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// By front text, case-insensitive ascending.
    Alphabetical,
    /// By id ascending.
    Oldest,
    /// By id descending.
    #[default]
    Newest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alphabetical => "alphabetical",
            Self::Oldest => "oldest",
            Self::Newest => "newest",
        }
    }
}

impl From<&str> for SortOrder {
    /// Unrecognized names fall back to newest-first.
    fn from(s: &str) -> Self {
        match s {
            "alphabetical" => Self::Alphabetical,
            "oldest" => Self::Oldest,
            _ => Self::Newest,
        }
    }
}

/// Card search filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub collection_id: i64,
    /// Substring matched against front or back. Ignored when blank.
    #[serde(default)]
    pub query: String,
    /// Every tag listed must be present on the card.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub only_not_mastered: bool,
    #[serde(default)]
    pub order: SortOrder,
}

impl SearchQuery {
    pub fn new(collection_id: i64) -> Self {
        Self {
            collection_id,
            ..Default::default()
        }
    }

    pub fn matching(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn only_not_mastered(mut self) -> Self {
        self.only_not_mastered = true;
        self
    }

    pub fn ordered_by(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// Mastery progress of one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total: u32,
    pub mastered: u32,
    pub percent: u32,
}

impl CollectionStats {
    pub fn new(total: u32, mastered: u32) -> Self {
        let percent = if total == 0 {
            0
        } else {
            (100.0 * f64::from(mastered) / f64::from(total)).round() as u32
        };
        Self {
            total,
            mastered,
            percent,
        }
    }
}

/// Collection row joined with its stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionWithStats {
    #[serde(flatten)]
    pub collection: Collection,
    #[serde(flatten)]
    pub stats: CollectionStats,
}

/// Daily reminder preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub hour: u32,
    pub minute: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: 20,
            minute: 0,
        }
    }
}

impl ReminderSettings {
    /// Clamp hour to 0-23 and minute to 0-59.
    pub fn clamped(self) -> Self {
        Self {
            enabled: self.enabled,
            hour: self.hour.min(23),
            minute: self.minute.min(59),
        }
    }
}

/// Study answers recorded on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub day: NaiveDate,
    pub count: u32,
}

/// Consecutive-day streak bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub streak: u32,
    pub last_study_date: Option<NaiveDate>,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

impl ImportSummary {
    /// Add lines dropped before the records reached the store.
    pub fn with_parse_skips(mut self, skipped: usize) -> Self {
        self.skipped += skipped;
        self
    }
}

/// Serialized form of a collection and its cards.
///
/// Cards carry `created_at` as ISO-8601 without a zone
/// (`2024-03-10T12:00:00`) and `mastered` as a boolean. Import only reads
/// `front`, `back`, `tags` and `image_uri`, so those fields are not needed to
/// load an export back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub collection: Collection,
    pub cards: Vec<Card>,
    pub version: u32,
}

impl ExportBundle {
    pub fn new(collection: Collection, cards: Vec<Card>) -> Self {
        Self {
            collection,
            cards,
            version: EXPORT_FORMAT_VERSION,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// `flashcards_<name>.json`, whitespace runs in the name replaced by `_`.
    pub fn suggested_file_name(&self) -> String {
        let name = self
            .collection
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!("flashcards_{}.json", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stats_of_empty_collection() {
        assert_eq!(
            CollectionStats::new(0, 0),
            CollectionStats {
                total: 0,
                mastered: 0,
                percent: 0
            }
        );
    }

    #[test]
    fn stats_percent_rounds() {
        assert_eq!(CollectionStats::new(3, 1).percent, 33);
        assert_eq!(CollectionStats::new(3, 2).percent, 67);
        assert_eq!(CollectionStats::new(8, 1).percent, 13);
        assert_eq!(CollectionStats::new(4, 4).percent, 100);
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let result: serde_json::Result<CardPatch> =
            serde_json::from_str(r#"{"front": "x", "collection_id": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_distinguishes_null_image() {
        let cleared: CardPatch = serde_json::from_str(r#"{"image_uri": null}"#).unwrap();
        assert_eq!(cleared.image_uri, Some(None));

        let untouched: CardPatch = serde_json::from_str(r#"{"mastered": true}"#).unwrap();
        assert_eq!(untouched.image_uri, None);
        assert_eq!(untouched.mastered, Some(true));
    }

    #[test]
    fn empty_patch() {
        let patch: CardPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn sort_order_falls_back_to_newest() {
        assert_eq!(SortOrder::from("alphabetical"), SortOrder::Alphabetical);
        assert_eq!(SortOrder::from("oldest"), SortOrder::Oldest);
        assert_eq!(SortOrder::from("whatever"), SortOrder::Newest);
    }

    #[test]
    fn reminder_clamps() {
        let settings = ReminderSettings {
            enabled: false,
            hour: 31,
            minute: 75,
        };
        assert_eq!(
            settings.clamped(),
            ReminderSettings {
                enabled: false,
                hour: 23,
                minute: 59
            }
        );
    }

    #[test]
    fn export_file_name() {
        let bundle = ExportBundle::new(
            Collection {
                id: 1,
                name: "French  verbs\tA1".to_string(),
            },
            vec![],
        );
        assert_eq!(bundle.suggested_file_name(), "flashcards_French_verbs_A1.json");
        assert_eq!(bundle.version, 1);
    }

    #[test]
    fn collection_with_stats_serializes_flat() {
        let row = CollectionWithStats {
            collection: Collection {
                id: 7,
                name: "Geo".to_string(),
            },
            stats: CollectionStats::new(2, 1),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "name": "Geo", "total": 2, "mastered": 1, "percent": 50})
        );
    }
}
