use serde::{
    Deserialize,
    Serialize,
};

use crate::error::ValidationError;
use crate::store::{
    DEFAULT_KEY_SEPARATOR,
    DEFAULT_LOCALE,
};

/// Settings read from [`super::CONFIG_FILE_NAME`]; missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Locale active when a store is created.
    pub default_locale: String,

    /// Separator between the segments of a dotted key.
    pub key_separator: String,
}

impl StoreSettings {
    /// Checks that the settings can drive a store.
    ///
    /// A blank locale would never match a registered bag, and an empty
    /// separator cannot split a key.
    ///
    /// # Errors
    /// Every rejected setting, in declaration order.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let rejected: Vec<ValidationError> = [
            self.default_locale
                .trim()
                .is_empty()
                .then(|| blank("defaultLocale", "a locale identifier such as \"en\"")),
            self.key_separator
                .is_empty()
                .then(|| blank("keySeparator", "a separator such as \".\"")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if rejected.is_empty() { Ok(()) } else { Err(rejected) }
    }
}

/// Rejection for a setting left empty.
fn blank(field: &'static str, expected: &str) -> ValidationError {
    ValidationError { field, problem: format!("must not be empty, expected {expected}") }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
        }
    }
}
