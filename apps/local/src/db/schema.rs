//! SQLite schema definitions and additive migrations.

use crate::db::error::DbError;
use rusqlite::{params, Connection};

/// Schema version recorded in `PRAGMA user_version` after initialization.
pub const SCHEMA_VERSION: i32 = 2;

/// Base tables for the local database.
pub const SCHEMA: &str = r#"
-- Named groups of cards
CREATE TABLE IF NOT EXISTS collections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Cards; collection_id is maintained by the application, not a constraint
CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    collection_id INTEGER NOT NULL,
    front TEXT NOT NULL,
    back TEXT NOT NULL,
    mastered INTEGER DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Key/value settings and streak bookkeeping
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT
);

-- Study answers per calendar day
CREATE TABLE IF NOT EXISTS study_log (
    day TEXT PRIMARY KEY,
    count INTEGER DEFAULT 0
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_cards_collection ON cards(collection_id);
"#;

/// One additive schema change.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Append-only. Each step may already be present in an existing database.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "cards_add_tags",
        sql: "ALTER TABLE cards ADD COLUMN tags TEXT",
    },
    Migration {
        name: "cards_add_image_uri",
        sql: "ALTER TABLE cards ADD COLUMN image_uri TEXT",
    },
];

/// Keys of the meta table.
pub mod meta_keys {
    pub const STREAK: &str = "streak";
    pub const LAST_STUDY_DATE: &str = "last_study_date";
    pub const REMINDER_ENABLED: &str = "reminder_enabled";
    pub const REMINDER_HOUR: &str = "reminder_hour";
    pub const REMINDER_MINUTE: &str = "reminder_minute";
}

/// Seeded only when the key is absent.
pub const META_DEFAULTS: &[(&str, &str)] = &[
    (meta_keys::STREAK, "0"),
    (meta_keys::LAST_STUDY_DATE, ""),
    (meta_keys::REMINDER_ENABLED, "1"),
    (meta_keys::REMINDER_HOUR, "20"),
    (meta_keys::REMINDER_MINUTE, "0"),
];

/// Create missing tables, apply migrations and seed meta defaults.
///
/// Safe to call on every startup. Table creation failures are fatal; a
/// migration whose column or table already exists is skipped.
pub fn initialize(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;

    for migration in MIGRATIONS {
        apply_migration(conn, migration)?;
    }

    for (key, value) in META_DEFAULTS {
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

fn apply_migration(conn: &Connection, migration: &Migration) -> Result<(), DbError> {
    match conn.execute_batch(migration.sql) {
        Ok(()) => {
            tracing::info!(migration = migration.name, "applied migration");
            Ok(())
        }
        Err(e) if is_already_applied(&e) => {
            tracing::debug!(migration = migration.name, "migration already present");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn is_already_applied(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            message.contains("duplicate column name") || message.contains("already exists")
        }
        _ => false,
    }
}
