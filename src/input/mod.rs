//! Loading locale data from JSON.
/// JSON fragments and locale files.
pub mod fragment;
