//! Calendar-day helpers for the meta and study_log tables.

use chrono::{Days, NaiveDate};

/// Storage format of a study day.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Format a day as YYYY-MM-DD.
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a stored day. Empty or malformed values yield `None`.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).ok()
}

/// The `n` days ending at `today` (inclusive), oldest first.
///
/// The window stops at the earliest representable date.
pub fn last_n_days(today: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = (0..n as u64)
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .collect();
    days.reverse();
    days
}
