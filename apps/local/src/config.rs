//! Runtime configuration from the environment.

use std::path::PathBuf;

/// Overrides the database location.
pub const DB_PATH_VAR: &str = "FLASHCARDS_DB_PATH";
/// Standard tracing filter variable.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    /// Load `.env` if present, then read the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(
            std::env::var(DB_PATH_VAR).ok(),
            std::env::var(LOG_FILTER_VAR).ok(),
        )
    }

    fn from_vars(db_path: Option<String>, log_filter: Option<String>) -> Self {
        Self {
            db_path: db_path
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_filter: log_filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Create the database's parent directory if needed.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// App data directory for production, falling back to the current directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pocket-flashcards")
        .join("flashcards.db")
}
