//! `{{name}}` placeholder substitution.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};

use crate::error::TemplateError;

/// Values substituted for placeholders, keyed by placeholder name.
pub type TemplateArgs = HashMap<String, String>;

/// Matches the shortest run of characters between `{{` and `}}`.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.+?)\}\}").expect("placeholder pattern is valid"));

/// Builds [`TemplateArgs`] from name/value pairs.
#[must_use]
pub fn args<I, K, V>(pairs: I) -> TemplateArgs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().map(|(name, value)| (name.into(), value.into())).collect()
}

/// Lists placeholder names in order of appearance, repeats included.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .collect()
}

/// Replaces every placeholder in `template` with its value from `args`.
///
/// Substitution is all-or-nothing: if any placeholder has no value the whole
/// call fails and nothing is rendered. `key` only labels the error.
///
/// # Errors
/// Returns [`TemplateError::MissingProperty`] for the first placeholder
/// without a value in `args`.
pub fn render<'a>(
    template: &'a str,
    args: &TemplateArgs,
    key: &str,
) -> Result<Cow<'a, str>, TemplateError> {
    let missing = placeholders(template).into_iter().find(|name| !args.contains_key(*name));
    if let Some(property) = missing {
        return Err(TemplateError::MissingProperty {
            property: property.to_string(),
            key: key.to_string(),
        });
    }

    Ok(PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        caps.get(1).and_then(|name| args.get(name.as_str())).cloned().unwrap_or_default()
    }))
}
