//! Reminder preference commands.

use crate::db::PreferenceRepository;
use crate::reminder::{ReminderScheduler, DAILY_REMINDER_ID};
use crate::state::AppState;
use flashcard_core::types::ReminderSettings;

use super::CommandError;

pub fn get_reminder_settings(state: &AppState) -> Result<ReminderSettings, CommandError> {
    let repo = state.repository()?;
    repo.get_reminder_settings().map_err(Into::into)
}

/// Clamp, persist, then reschedule the daily reminder.
///
/// The settings are stored before the scheduler runs, so a scheduling failure
/// leaves the new preferences saved.
pub fn save_reminder_settings(
    state: &AppState,
    settings: ReminderSettings,
    scheduler: &dyn ReminderScheduler,
) -> Result<ReminderSettings, CommandError> {
    let settings = settings.clamped();
    {
        let repo = state.repository()?;
        repo.save_reminder_settings(&settings)?;
    }

    scheduler.apply(DAILY_REMINDER_ID, &settings)?;
    Ok(settings)
}
