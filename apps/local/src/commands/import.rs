//! Import and export commands.

use crate::db::ImportRepository;
use crate::state::AppState;
use flashcard_core::parser;
use flashcard_core::types::ImportSummary;
use std::fs;
use std::path::Path;

use super::CommandError;

/// Export ready to hand to a sharing mechanism.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExportedFile {
    pub file_name: String,
    pub json: String,
}

/// Import `front | back` lines into a collection.
///
/// Lines that cannot be used are counted in `skipped`; a file with no usable
/// line at all is rejected before anything is written.
pub fn import_text(
    state: &AppState,
    collection_id: i64,
    content: &str,
) -> Result<ImportSummary, CommandError> {
    let parsed = parser::parse_text(content)?;

    let repo = state.repository()?;
    let summary = repo.bulk_create(collection_id, &parsed.cards)?;
    Ok(summary.with_parse_skips(parsed.skipped))
}

/// Import the `cards` array of a JSON document (an export works as-is).
pub fn import_json(
    state: &AppState,
    collection_id: i64,
    content: &str,
) -> Result<ImportSummary, CommandError> {
    let value = parser::parse_json(content)?;

    let repo = state.repository()?;
    repo.import_from_json(collection_id, &value)
        .map_err(Into::into)
}

/// Import a file, choosing the JSON reader for `.json` files and the text
/// reader otherwise.
pub fn import_file(
    state: &AppState,
    collection_id: i64,
    file_path: &Path,
) -> Result<ImportSummary, CommandError> {
    let content = fs::read_to_string(file_path)?;
    let is_json = file_path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    tracing::info!(path = %file_path.display(), collection_id, is_json, "importing file");
    if is_json {
        import_json(state, collection_id, &content)
    } else {
        import_text(state, collection_id, &content)
    }
}

/// Serialize a collection and its cards for sharing.
pub fn export_collection(
    state: &AppState,
    collection_id: i64,
) -> Result<ExportedFile, CommandError> {
    let bundle = {
        let repo = state.repository()?;
        repo.export_collection(collection_id)?
    };

    let json = bundle
        .to_json_pretty()
        .map_err(|e| CommandError::internal(e.to_string()))?;
    Ok(ExportedFile {
        file_name: bundle.suggested_file_name(),
        json,
    })
}
