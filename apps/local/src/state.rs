//! Application state.

use crate::commands::CommandError;
use crate::db::SqliteRepository;
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-wide application state, constructed once at startup and passed to
/// every command.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<Mutex<SqliteRepository>>,
}

impl AppState {
    pub fn new(repository: SqliteRepository) -> Self {
        Self {
            repository: Arc::new(Mutex::new(repository)),
        }
    }

    /// Lock the repository for one command.
    pub fn repository(&self) -> Result<MutexGuard<'_, SqliteRepository>, CommandError> {
        self.repository
            .lock()
            .map_err(|_| CommandError::internal("repository lock poisoned"))
    }
}
