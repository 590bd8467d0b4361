//! Consecutive-day streak transition.

use crate::types::StreakState;
use chrono::NaiveDate;

/// Apply one study answer made on `today` to the previous streak state.
///
/// Same day leaves the streak unchanged, the following day extends it, and
/// anything else (no prior date, a gap, or a date after `today`) restarts it
/// at 1. The last study date always becomes `today`.
pub fn next_streak(previous: StreakState, today: NaiveDate) -> StreakState {
    let streak = match previous.last_study_date {
        Some(last) if last == today => previous.streak,
        Some(last) if last.succ_opt() == Some(today) => previous.streak.saturating_add(1),
        _ => 1,
    };

    StreakState {
        streak,
        last_study_date: Some(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn state(streak: u32, last: Option<&str>) -> StreakState {
        StreakState {
            streak,
            last_study_date: last.map(date),
        }
    }

    #[test]
    fn first_activity_starts_streak() {
        let next = next_streak(StreakState::default(), date("2024-03-10"));
        assert_eq!(next, state(1, Some("2024-03-10")));
    }

    #[test]
    fn same_day_is_idempotent() {
        let next = next_streak(state(4, Some("2024-03-10")), date("2024-03-10"));
        assert_eq!(next, state(4, Some("2024-03-10")));
    }

    #[test]
    fn next_day_extends() {
        let next = next_streak(state(5, Some("2024-03-09")), date("2024-03-10"));
        assert_eq!(next.streak, 6);
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let next = next_streak(state(2, Some("2024-02-29")), date("2024-03-01"));
        assert_eq!(next.streak, 3);
        let next = next_streak(state(9, Some("2023-12-31")), date("2024-01-01"));
        assert_eq!(next.streak, 10);
    }

    #[test]
    fn gap_resets() {
        let next = next_streak(state(5, Some("2024-03-07")), date("2024-03-10"));
        assert_eq!(next, state(1, Some("2024-03-10")));
    }

    #[test]
    fn future_last_date_resets() {
        let next = next_streak(state(5, Some("2024-03-12")), date("2024-03-10"));
        assert_eq!(next, state(1, Some("2024-03-10")));
    }
}
