//! Repository pattern for database access.

use crate::db::clock::{Clock, SystemClock};
use crate::db::date_utils::{format_day, last_n_days, parse_day};
use crate::db::error::DbError;
use crate::db::schema::{self, meta_keys};
use chrono::NaiveDate;
use flashcard_core::tags::{normalize_tag, normalize_tags};
use flashcard_core::types::{
    Card, CardPatch, Collection, CollectionStats, CollectionWithStats, DayActivity, ExportBundle,
    ImportSummary, RawCard, ReminderSettings, SearchQuery, SortOrder, StreakState,
};
use flashcard_core::{cards_from_json, next_streak};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

const CARD_COLUMNS: &str = "id, collection_id, front, back, mastered, created_at, tags, image_uri";

/// Repository for collection operations.
pub trait CollectionRepository {
    fn create_collection(&self, name: &str) -> Result<Collection>;
    fn get_collection(&self, id: i64) -> Result<Option<Collection>>;
    fn list_collections(&self) -> Result<Vec<Collection>>;
    fn delete_collection(&self, id: i64) -> Result<()>;
    fn collection_stats(&self, id: i64) -> Result<CollectionStats>;
    fn list_collections_with_stats(&self) -> Result<Vec<CollectionWithStats>>;
}

/// Repository for card operations.
pub trait CardRepository {
    fn create_card(&self, collection_id: i64, card: &RawCard) -> Result<Card>;
    fn get_card(&self, id: i64) -> Result<Option<Card>>;
    fn get_cards_by_collection(&self, collection_id: i64) -> Result<Vec<Card>>;
    fn update_card(&self, id: i64, patch: &CardPatch) -> Result<()>;
    fn set_mastered(&self, id: i64, mastered: bool) -> Result<()>;
    fn delete_card(&self, id: i64) -> Result<()>;
    fn search_cards(&self, query: &SearchQuery) -> Result<Vec<Card>>;
}

/// Repository for bulk import and export.
pub trait ImportRepository {
    fn bulk_create(&self, collection_id: i64, records: &[RawCard]) -> Result<ImportSummary>;
    fn export_collection(&self, collection_id: i64) -> Result<ExportBundle>;
    fn import_from_json(&self, collection_id: i64, value: &serde_json::Value)
        -> Result<ImportSummary>;
}

/// Repository for streak and daily activity.
pub trait ActivityRepository {
    fn register_activity(&self) -> Result<StreakState>;
    fn streak(&self) -> Result<u32>;
    fn last_study_date(&self) -> Result<Option<NaiveDate>>;
    fn streak_state(&self) -> Result<StreakState>;
    fn activity_last_n_days(&self, days: usize) -> Result<Vec<DayActivity>>;
}

/// Repository for user preferences.
pub trait PreferenceRepository {
    fn get_reminder_settings(&self) -> Result<ReminderSettings>;
    fn save_reminder_settings(&self, settings: &ReminderSettings) -> Result<()>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
    clock: Box<dyn Clock>,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_clock(path, SystemClock)
    }

    pub fn open_with_clock<P: AsRef<Path>>(path: P, clock: impl Clock + 'static) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::info!(path = %path.display(), journal_mode = %mode, "opened database");
        Self::from_connection(conn, clock)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with_clock(SystemClock)
    }

    pub fn open_in_memory_with_clock(clock: impl Clock + 'static) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, clock)
    }

    fn from_connection(conn: Connection, clock: impl Clock + 'static) -> Result<Self> {
        let repo = Self {
            conn,
            clock: Box::new(clock),
        };
        repo.initialize()?;
        Ok(repo)
    }

    /// Ensure tables, columns and meta defaults exist. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        schema::initialize(&self.conn)
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn row_to_card(row: &rusqlite::Row) -> rusqlite::Result<Card> {
        Ok(Card {
            id: row.get(0)?,
            collection_id: row.get(1)?,
            front: row.get(2)?,
            back: row.get(3)?,
            mastered: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
            created_at: row.get(5)?,
            tags: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            image_uri: row.get(7)?,
        })
    }

    fn query_cards(&self, sql: &str, values: Vec<SqlValue>) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(sql)?;
        let cards = stmt
            .query_map(params_from_iter(values), Self::row_to_card)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    fn collection_exists(conn: &Connection, id: i64) -> Result<bool> {
        let found: Option<i64> = conn
            .query_row("SELECT id FROM collections WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn require_collection(conn: &Connection, id: i64) -> Result<()> {
        if Self::collection_exists(conn, id)? {
            Ok(())
        } else {
            Err(DbError::CollectionNotFound(id))
        }
    }
}

/// Trim a required text field, rejecting it when nothing is left.
fn required_text(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DbError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Escape LIKE wildcards so the pattern matches literally (with `ESCAPE '\'`).
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn get_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM meta WHERE key = ?1", params![key], |row| {
        row.get::<_, Option<String>>(0)
    })
    .optional()
    .map(Option::flatten)
    .map_err(Into::into)
}

fn set_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// Read a numeric meta value, falling back to `default` when it does not parse.
fn get_meta_u32(conn: &Connection, key: &str, default: u32) -> Result<u32> {
    let raw = get_meta(conn, key)?.unwrap_or_default();
    match raw.trim().parse::<u32>() {
        Ok(value) => Ok(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "unparsable meta value, using default");
            Ok(default)
        }
    }
}

fn read_streak_state(conn: &Connection) -> Result<StreakState> {
    let streak = get_meta_u32(conn, meta_keys::STREAK, 0)?;
    let last_study_date = get_meta(conn, meta_keys::LAST_STUDY_DATE)?
        .as_deref()
        .and_then(parse_day);
    Ok(StreakState {
        streak,
        last_study_date,
    })
}

impl CollectionRepository for SqliteRepository {
    fn create_collection(&self, name: &str) -> Result<Collection> {
        let name = required_text(name, "name")?;
        self.conn.execute(
            "INSERT INTO collections (name) VALUES (?1)",
            params![name],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "created collection");
        Ok(Collection { id, name })
    }

    fn get_collection(&self, id: i64) -> Result<Option<Collection>> {
        self.conn
            .query_row(
                "SELECT id, name FROM collections WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Collection {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    fn list_collections(&self) -> Result<Vec<Collection>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM collections ORDER BY id DESC")?;

        let collections = stmt
            .query_map([], |row| {
                Ok(Collection {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(collections)
    }

    fn delete_collection(&self, id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let cards = tx.execute("DELETE FROM cards WHERE collection_id = ?1", params![id])?;
        let collections = tx.execute("DELETE FROM collections WHERE id = ?1", params![id])?;
        tx.commit()?;

        tracing::debug!(id, cards, collections, "deleted collection");
        Ok(())
    }

    fn collection_stats(&self, id: i64) -> Result<CollectionStats> {
        let (total, mastered) = self.conn.query_row(
            "SELECT
                COUNT(*) as total,
                COALESCE(SUM(CASE WHEN mastered = 1 THEN 1 ELSE 0 END), 0) as mastered_count
            FROM cards
            WHERE collection_id = ?1",
            params![id],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)),
        )?;

        Ok(CollectionStats::new(total, mastered))
    }

    fn list_collections_with_stats(&self) -> Result<Vec<CollectionWithStats>> {
        self.list_collections()?
            .into_iter()
            .map(|collection| -> Result<CollectionWithStats> {
                let stats = self.collection_stats(collection.id)?;
                Ok(CollectionWithStats { collection, stats })
            })
            .collect()
    }
}

impl CardRepository for SqliteRepository {
    fn create_card(&self, collection_id: i64, card: &RawCard) -> Result<Card> {
        let front = required_text(&card.front, "front")?;
        let back = required_text(&card.back, "back")?;
        Self::require_collection(&self.conn, collection_id)?;

        let sql = format!(
            "INSERT INTO cards (collection_id, front, back, tags, image_uri, mastered)
             VALUES (?1, ?2, ?3, ?4, ?5, 0)
             RETURNING {}",
            CARD_COLUMNS
        );
        let created = self.conn.query_row(
            &sql,
            params![
                collection_id,
                front,
                back,
                normalize_tags(&card.tags),
                card.image_uri
            ],
            Self::row_to_card,
        )?;

        tracing::debug!(id = created.id, collection_id, "created card");
        Ok(created)
    }

    fn get_card(&self, id: i64) -> Result<Option<Card>> {
        let sql = format!("SELECT {} FROM cards WHERE id = ?1", CARD_COLUMNS);
        self.conn
            .query_row(&sql, params![id], Self::row_to_card)
            .optional()
            .map_err(Into::into)
    }

    fn get_cards_by_collection(&self, collection_id: i64) -> Result<Vec<Card>> {
        let sql = format!(
            "SELECT {} FROM cards WHERE collection_id = ?1 ORDER BY id DESC",
            CARD_COLUMNS
        );
        self.query_cards(&sql, vec![SqlValue::Integer(collection_id)])
    }

    fn update_card(&self, id: i64, patch: &CardPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut values: Vec<SqlValue> = Vec::new();

        if let Some(front) = &patch.front {
            assignments.push("front = ?");
            values.push(SqlValue::Text(required_text(front, "front")?));
        }
        if let Some(back) = &patch.back {
            assignments.push("back = ?");
            values.push(SqlValue::Text(required_text(back, "back")?));
        }
        if let Some(tags) = &patch.tags {
            assignments.push("tags = ?");
            values.push(SqlValue::Text(normalize_tags(tags)));
        }
        if let Some(image_uri) = &patch.image_uri {
            assignments.push("image_uri = ?");
            values.push(image_uri.clone().map_or(SqlValue::Null, SqlValue::Text));
        }
        if let Some(mastered) = patch.mastered {
            assignments.push("mastered = ?");
            values.push(SqlValue::Integer(i64::from(mastered)));
        }
        values.push(SqlValue::Integer(id));

        let sql = format!("UPDATE cards SET {} WHERE id = ?", assignments.join(", "));
        let updated = self.conn.execute(&sql, params_from_iter(values))?;
        tracing::debug!(id, updated, "updated card");
        Ok(())
    }

    fn set_mastered(&self, id: i64, mastered: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE cards SET mastered = ?1 WHERE id = ?2",
            params![mastered, id],
        )?;
        Ok(())
    }

    fn delete_card(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM cards WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn search_cards(&self, query: &SearchQuery) -> Result<Vec<Card>> {
        let mut sql = format!("SELECT {} FROM cards WHERE collection_id = ?", CARD_COLUMNS);
        let mut values = vec![SqlValue::Integer(query.collection_id)];

        if query.only_not_mastered {
            sql.push_str(" AND mastered = 0");
        }

        // Blank queries are ignored; otherwise whitespace in the query is significant.
        if !query.query.trim().is_empty() {
            sql.push_str(" AND (front LIKE ? ESCAPE '\\' OR back LIKE ? ESCAPE '\\')");
            let pattern = format!("%{}%", escape_like(&query.query));
            values.push(SqlValue::Text(pattern.clone()));
            values.push(SqlValue::Text(pattern));
        }

        // The stored list is wrapped in commas so `,tag,` only matches whole tokens.
        let wanted = query
            .tags
            .iter()
            .flat_map(|tag| tag.split(','))
            .map(normalize_tag)
            .filter(|tag| !tag.is_empty());
        for tag in wanted {
            sql.push_str(" AND (',' || LOWER(IFNULL(tags, '')) || ',') LIKE ? ESCAPE '\\'");
            values.push(SqlValue::Text(format!("%,{},%", escape_like(&tag))));
        }

        sql.push_str(match query.order {
            SortOrder::Alphabetical => " ORDER BY front COLLATE NOCASE ASC",
            SortOrder::Oldest => " ORDER BY id ASC",
            SortOrder::Newest => " ORDER BY id DESC",
        });

        self.query_cards(&sql, values)
    }
}

impl ImportRepository for SqliteRepository {
    fn bulk_create(&self, collection_id: i64, records: &[RawCard]) -> Result<ImportSummary> {
        let tx = self.conn.unchecked_transaction()?;
        Self::require_collection(&tx, collection_id)?;

        let mut summary = ImportSummary::default();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cards (collection_id, front, back, tags, image_uri, mastered)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0)",
            )?;
            for record in records {
                if !record.is_valid() {
                    summary.skipped += 1;
                    continue;
                }
                stmt.execute(params![
                    collection_id,
                    record.front.trim(),
                    record.back.trim(),
                    normalize_tags(&record.tags),
                    record.image_uri,
                ])?;
                summary.inserted += 1;
            }
        }
        tx.commit()?;

        tracing::info!(
            collection_id,
            inserted = summary.inserted,
            skipped = summary.skipped,
            "bulk import committed"
        );
        Ok(summary)
    }

    fn export_collection(&self, collection_id: i64) -> Result<ExportBundle> {
        let collection = self
            .get_collection(collection_id)?
            .ok_or(DbError::CollectionNotFound(collection_id))?;

        let sql = format!(
            "SELECT {} FROM cards WHERE collection_id = ?1 ORDER BY id ASC",
            CARD_COLUMNS
        );
        let cards = self.query_cards(&sql, vec![SqlValue::Integer(collection_id)])?;

        Ok(ExportBundle::new(collection, cards))
    }

    fn import_from_json(
        &self,
        collection_id: i64,
        value: &serde_json::Value,
    ) -> Result<ImportSummary> {
        self.bulk_create(collection_id, &cards_from_json(value))
    }
}

impl ActivityRepository for SqliteRepository {
    fn register_activity(&self) -> Result<StreakState> {
        let today = self.clock.today();
        let day = format_day(today);

        let tx = self.conn.unchecked_transaction()?;
        let previous = read_streak_state(&tx)?;
        let next = next_streak(previous, today);

        set_meta(&tx, meta_keys::STREAK, &next.streak.to_string())?;
        set_meta(&tx, meta_keys::LAST_STUDY_DATE, &day)?;
        tx.execute(
            "INSERT INTO study_log (day, count) VALUES (?1, 1)
             ON CONFLICT(day) DO UPDATE SET count = IFNULL(count, 0) + 1",
            params![day],
        )?;
        tx.commit()?;

        tracing::debug!(day = %day, streak = next.streak, "registered study activity");
        Ok(next)
    }

    fn streak(&self) -> Result<u32> {
        get_meta_u32(&self.conn, meta_keys::STREAK, 0)
    }

    fn last_study_date(&self) -> Result<Option<NaiveDate>> {
        Ok(get_meta(&self.conn, meta_keys::LAST_STUDY_DATE)?
            .as_deref()
            .and_then(parse_day))
    }

    fn streak_state(&self) -> Result<StreakState> {
        read_streak_state(&self.conn)
    }

    fn activity_last_n_days(&self, days: usize) -> Result<Vec<DayActivity>> {
        let range = last_n_days(self.clock.today(), days);
        let (Some(first), Some(last)) = (range.first(), range.last()) else {
            return Ok(Vec::new());
        };

        let mut stmt = self
            .conn
            .prepare("SELECT day, count FROM study_log WHERE day >= ?1 AND day <= ?2")?;
        let counts = stmt
            .query_map(params![format_day(*first), format_day(*last)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<u32>>(1)?.unwrap_or(0),
                ))
            })?
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;

        Ok(range
            .into_iter()
            .map(|day| DayActivity {
                count: counts.get(&format_day(day)).copied().unwrap_or(0),
                day,
            })
            .collect())
    }
}

impl PreferenceRepository for SqliteRepository {
    fn get_reminder_settings(&self) -> Result<ReminderSettings> {
        let defaults = ReminderSettings::default();
        let enabled = get_meta(&self.conn, meta_keys::REMINDER_ENABLED)?.as_deref() == Some("1");
        let hour = get_meta_u32(&self.conn, meta_keys::REMINDER_HOUR, defaults.hour)?;
        let minute = get_meta_u32(&self.conn, meta_keys::REMINDER_MINUTE, defaults.minute)?;

        Ok(ReminderSettings {
            enabled,
            hour,
            minute,
        })
    }

    fn save_reminder_settings(&self, settings: &ReminderSettings) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        set_meta(
            &tx,
            meta_keys::REMINDER_ENABLED,
            if settings.enabled { "1" } else { "0" },
        )?;
        set_meta(&tx, meta_keys::REMINDER_HOUR, &settings.hour.to_string())?;
        set_meta(&tx, meta_keys::REMINDER_MINUTE, &settings.minute.to_string())?;
        tx.commit()?;
        Ok(())
    }
}
