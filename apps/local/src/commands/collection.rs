//! Collection commands.

use crate::db::CollectionRepository;
use crate::state::AppState;
use flashcard_core::types::{Collection, CollectionStats, CollectionWithStats};

use super::CommandError;

/// List all collections with mastery stats, newest first.
pub fn list_collections(state: &AppState) -> Result<Vec<CollectionWithStats>, CommandError> {
    let repo = state.repository()?;
    repo.list_collections_with_stats().map_err(Into::into)
}

/// Create a collection. The name is trimmed and must not be empty.
pub fn create_collection(state: &AppState, name: &str) -> Result<Collection, CommandError> {
    let repo = state.repository()?;
    repo.create_collection(name).map_err(Into::into)
}

/// Delete a collection and all of its cards.
pub fn delete_collection(state: &AppState, collection_id: i64) -> Result<(), CommandError> {
    let repo = state.repository()?;
    repo.delete_collection(collection_id).map_err(Into::into)
}

pub fn get_collection_stats(
    state: &AppState,
    collection_id: i64,
) -> Result<CollectionStats, CommandError> {
    let repo = state.repository()?;
    repo.collection_stats(collection_id).map_err(Into::into)
}
