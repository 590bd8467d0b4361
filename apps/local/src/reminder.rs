//! Daily reminder scheduling seam.
//!
//! The platform notification scheduler lives outside this crate; it receives
//! the persisted settings and replaces the single recurring alert.

use flashcard_core::types::ReminderSettings;
use thiserror::Error;

/// Identifier of the one recurring daily alert.
pub const DAILY_REMINDER_ID: &str = "daily-reminder";

#[derive(Debug, Error)]
#[error("reminder scheduling failed: {0}")]
pub struct ReminderError(pub String);

/// Platform scheduler for the daily study reminder.
pub trait ReminderScheduler: Send + Sync {
    /// Cancel the alert named `id`, then schedule it again at the given time
    /// when `settings.enabled` is set.
    fn apply(&self, id: &str, settings: &ReminderSettings) -> Result<(), ReminderError>;
}

/// Scheduler for headless use: records the request in the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogScheduler;

impl ReminderScheduler for LogScheduler {
    fn apply(&self, id: &str, settings: &ReminderSettings) -> Result<(), ReminderError> {
        if settings.enabled {
            tracing::info!(id, hour = settings.hour, minute = settings.minute, "daily reminder scheduled");
        } else {
            tracing::info!(id, "daily reminder cancelled");
        }
        Ok(())
    }
}
