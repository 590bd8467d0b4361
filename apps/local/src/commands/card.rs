//! Card commands.

use crate::db::CardRepository;
use crate::state::AppState;
use flashcard_core::types::{Card, CardPatch, RawCard, SearchQuery};

use super::{CommandError, ErrorKind};

/// Create a card from form input.
pub fn create_card(
    state: &AppState,
    collection_id: i64,
    card: &RawCard,
) -> Result<Card, CommandError> {
    let repo = state.repository()?;
    repo.create_card(collection_id, card).map_err(Into::into)
}

pub fn get_card(state: &AppState, card_id: i64) -> Result<Option<Card>, CommandError> {
    let repo = state.repository()?;
    repo.get_card(card_id).map_err(Into::into)
}

/// Apply a typed partial update.
pub fn update_card(state: &AppState, card_id: i64, patch: &CardPatch) -> Result<(), CommandError> {
    let repo = state.repository()?;
    repo.update_card(card_id, patch).map_err(Into::into)
}

/// Apply a partial update given as a field map, e.g. `{"front": "..", "tags": ".."}`.
///
/// Only front, back, tags, image_uri and mastered are accepted; any other key
/// is a validation error and nothing is written.
pub fn update_card_fields(
    state: &AppState,
    card_id: i64,
    fields: serde_json::Value,
) -> Result<(), CommandError> {
    let patch: CardPatch = serde_json::from_value(fields)
        .map_err(|e| CommandError::new(ErrorKind::Validation, e.to_string()))?;
    update_card(state, card_id, &patch)
}

pub fn set_card_mastered(
    state: &AppState,
    card_id: i64,
    mastered: bool,
) -> Result<(), CommandError> {
    let repo = state.repository()?;
    repo.set_mastered(card_id, mastered).map_err(Into::into)
}

pub fn delete_card(state: &AppState, card_id: i64) -> Result<(), CommandError> {
    let repo = state.repository()?;
    repo.delete_card(card_id).map_err(Into::into)
}

/// Filtered card listing for one collection.
pub fn search_cards(state: &AppState, query: &SearchQuery) -> Result<Vec<Card>, CommandError> {
    let repo = state.repository()?;
    repo.search_cards(query).map_err(Into::into)
}
