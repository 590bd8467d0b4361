//! Study session commands.

use crate::db::{ActivityRepository, CardRepository};
use crate::state::AppState;
use flashcard_core::study::{StudyOrder, StudySession};
use flashcard_core::types::StreakState;

use super::{CommandError, ErrorKind};

/// Build the study session for a collection using the given ordering.
pub fn get_study_queue(
    state: &AppState,
    collection_id: i64,
    order: &mut dyn StudyOrder,
) -> Result<StudySession, CommandError> {
    let repo = state.repository()?;
    let cards = repo.get_cards_by_collection(collection_id)?;
    tracing::debug!(collection_id, cards = cards.len(), order = order.name(), "study queue");
    Ok(StudySession::arranged(cards, order))
}

/// Record a hit (mastered) or miss on a card and count it towards today's
/// activity. Returns the updated streak.
///
/// An unknown card is `not_found` and leaves the streak and activity log alone.
pub fn record_answer(
    state: &AppState,
    card_id: i64,
    hit: bool,
) -> Result<StreakState, CommandError> {
    let repo = state.repository()?;
    if repo.get_card(card_id)?.is_none() {
        return Err(CommandError::new(
            ErrorKind::NotFound,
            format!("card not found: {}", card_id),
        ));
    }
    repo.set_mastered(card_id, hit)?;
    repo.register_activity().map_err(Into::into)
}
