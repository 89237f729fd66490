//! Locale fragment input: JSON text and files turned into locale trees.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::types::LocaleTree;

/// Parses a JSON object into a locale tree.
///
/// # Errors
/// Returns error if the text is not valid JSON or its root is not an object.
pub fn parse_fragment(json_text: &str) -> Result<LocaleTree, LoadError> {
    let json: Value = serde_json::from_str(json_text)?;
    if !json.is_object() {
        return Err(LoadError::NotAnObject);
    }
    LocaleTree::from_json(&json).ok_or(LoadError::NotAnObject)
}

/// Loads a fragment file whose top-level keys are locale identifiers.
///
/// # Errors
/// Returns error if file read or JSON parse fails.
pub fn load_fragment_file(file_path: &Path) -> Result<LocaleTree, LoadError> {
    tracing::debug!("Loading locale fragment: {:?}", file_path);

    let content = std::fs::read_to_string(file_path)?;
    parse_fragment(&content)
}

/// Loads a single-locale file, keyed by the file stem.
///
/// `locales/it.json` holding `{"voc": {...}}` yields `{"it": {"voc": {...}}}`,
/// ready for [`crate::store::LocaleStore::add`].
///
/// # Errors
/// Returns error if the locale cannot be taken from the file name, or if file
/// read or JSON parse fails.
pub fn load_locale_file(file_path: &Path) -> Result<LocaleTree, LoadError> {
    let locale = file_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| LoadError::UnknownLocale(file_path.to_path_buf()))?;

    let bag = load_fragment_file(file_path)?;
    Ok([(locale, bag)].into_iter().collect())
}
