//! Streak and activity commands.

use crate::db::ActivityRepository;
use crate::state::AppState;
use flashcard_core::types::{DayActivity, StreakState};

use super::{CommandError, ErrorKind};

/// Window shown by the activity chart when none is requested.
pub const DEFAULT_ACTIVITY_DAYS: usize = 14;

/// Largest window a caller may request.
pub const MAX_ACTIVITY_DAYS: usize = 3660;

pub fn get_streak(state: &AppState) -> Result<StreakState, CommandError> {
    let repo = state.repository()?;
    repo.streak_state().map_err(Into::into)
}

/// Per-day answer counts ending today, oldest first.
pub fn get_activity(
    state: &AppState,
    days: Option<usize>,
) -> Result<Vec<DayActivity>, CommandError> {
    let days = days.unwrap_or(DEFAULT_ACTIVITY_DAYS);
    if days > MAX_ACTIVITY_DAYS {
        return Err(CommandError::new(
            ErrorKind::Validation,
            format!("activity window must be at most {} days", MAX_ACTIVITY_DAYS),
        ));
    }

    let repo = state.repository()?;
    repo.activity_last_n_days(days).map_err(Into::into)
}
