//! Error and marker types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a lookup produced no translation.
///
/// Lookups never fail hard for absent data; these values are returned to the
/// caller as part of a [`crate::store::Resolution`]. The display strings are
/// the markers shown to end users in place of the missing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// No bag is registered for the active locale.
    #[error("Missing regional for: {locale}")]
    Regional {
        /// The active locale.
        locale: String,
    },

    /// Descent hit an absent node before the key was fully consumed.
    #[error("Missing translation for: {key}")]
    Translation {
        /// The full key as requested.
        key: String,
    },

    /// The key was fully consumed but nothing usable is stored there.
    #[error("Missing translation for: {locale}.{key}")]
    TranslationForLocale {
        /// The active locale.
        locale: String,
        /// The full key as requested.
        key: String,
    },
}

/// Placeholder substitution failure; the only hard error a lookup can raise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder has no value in the supplied arguments.
    #[error("Missing property {property}, for template: {key}")]
    MissingProperty {
        /// Placeholder name between the braces.
        property: String,
        /// Key the template was resolved from.
        key: String,
    },
}

/// Conflicts found while merging locale fragments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Keys already present in the target, in the order they were met.
    #[error("Found {} duplicated keys. {}", .0.len(), format_duplicates(.0))]
    DuplicateKeys(Vec<String>),
}

/// Renders keys as `` `a`; `b` ``.
fn format_duplicates(keys: &[String]) -> String {
    keys.iter().map(|key| format!("`{key}`")).collect::<Vec<_>>().join("; ")
}

/// Failure while reading a locale fragment.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read locale file: {0}")]
    Io(#[from] io::Error),

    /// The contents are not valid JSON.
    #[error("Failed to parse locale JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Valid JSON, but the root is not an object.
    #[error("Locale fragment must be a JSON object")]
    NotAnObject,

    /// The file name has no stem to use as the locale identifier.
    #[error("Cannot infer locale from file path: {0:?}")]
    UnknownLocale(PathBuf),
}

/// A store setting rejected by [`crate::config::StoreSettings::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{field}` {problem}")]
pub struct ValidationError {
    /// Setting name as written in the settings file, e.g. `keySeparator`.
    pub field: &'static str,
    /// What is wrong with the value.
    pub problem: String,
}

/// Failure while loading store settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings parsed but some values are unusable.
    #[error("Invalid store settings: {}", format_rejected(.0))]
    Invalid(Vec<ValidationError>),

    /// The settings file exists but could not be read.
    #[error("Failed to read settings file {path:?}: {source}")]
    Read {
        /// Settings file location.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The settings file is not valid JSON for [`crate::config::StoreSettings`].
    #[error("Failed to parse settings file {path:?}: {source}")]
    Parse {
        /// Settings file location.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
}

/// Joins every rejected setting into one line.
fn format_rejected(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
