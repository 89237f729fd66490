//! The locale store: active locale plus every registered translation bag.

pub mod template;

use std::borrow::Cow;
use std::sync::Arc;

pub use template::TemplateArgs;

use crate::config::StoreSettings;
use crate::error::{
    Missing,
    TemplateError,
};
use crate::merge::merge;
use crate::observer::LocaleObserver;
use crate::types::{
    LocaleNode,
    LocaleTree,
};

/// Locale active in a freshly created store.
pub const DEFAULT_LOCALE: &str = "en";

/// Separator between the segments of a dotted key.
pub const DEFAULT_KEY_SEPARATOR: &str = ".";

/// Outcome of resolving a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A leaf string, rendered when template arguments were supplied.
    Text(Cow<'a, str>),
    /// A whole sub-tree.
    Tree(Cow<'a, LocaleTree>),
    /// Nothing usable at the key; carries the marker to show instead.
    Missing(Missing),
}

impl Resolution<'_> {
    /// The resolved string, if the key led to a leaf.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// The resolved sub-tree, if the key led to one.
    #[must_use]
    pub fn as_tree(&self) -> Option<&LocaleTree> {
        match self {
            Self::Tree(tree) => Some(tree.as_ref()),
            _ => None,
        }
    }

    /// Why nothing was resolved.
    #[must_use]
    pub const fn as_missing(&self) -> Option<&Missing> {
        match self {
            Self::Missing(missing) => Some(missing),
            _ => None,
        }
    }

    /// Whether the resolution carries a missing marker.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    /// Detaches the resolution from the store it borrows from.
    #[must_use]
    pub fn into_owned(self) -> Resolution<'static> {
        match self {
            Self::Text(text) => Resolution::Text(Cow::Owned(text.into_owned())),
            Self::Tree(tree) => Resolution::Tree(Cow::Owned(tree.into_owned())),
            Self::Missing(missing) => Resolution::Missing(missing),
        }
    }

    /// Text to display: the translation, or the missing marker.
    ///
    /// Returns `None` for sub-trees.
    #[must_use]
    pub fn display_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text.as_ref())),
            Self::Tree(_) => None,
            Self::Missing(missing) => Some(Cow::Owned(missing.to_string())),
        }
    }
}

/// Where a key's descent through a bag ended.
enum Descent<'a> {
    /// Every segment was consumed; the node may still be absent.
    Reached(Option<&'a LocaleNode>),
    /// An absent or blank node was hit with segments left to consume.
    Interrupted,
}

/// A locale switch whose observers have not been told yet.
#[must_use = "observers are only notified by `LocaleChange::notify`"]
pub struct LocaleChange {
    /// The newly active locale.
    locale: String,
    /// Locales registered at the time of the switch.
    known_locales: Vec<String>,
    /// Observers subscribed at the time of the switch.
    observers: Vec<Arc<dyn LocaleObserver>>,
}

impl LocaleChange {
    /// The newly active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Calls [`LocaleObserver::locale_changed`] on every captured observer.
    pub fn notify(self) {
        if self.observers.is_empty() {
            return;
        }
        let known: Vec<&str> = self.known_locales.iter().map(String::as_str).collect();
        for observer in &self.observers {
            observer.locale_changed(&self.locale, &known);
        }
    }
}

impl std::fmt::Debug for LocaleChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleChange")
            .field("locale", &self.locale)
            .field("known_locales", &self.known_locales)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Holds the active locale and the regional bag keyed by locale identifier.
///
/// `regional` only grows, through [`LocaleStore::add`]. Every read goes
/// against the live locale, so a locale switch takes effect on the next call.
pub struct LocaleStore {
    /// Active locale identifier.
    locale: String,
    /// Locale identifier to translation bag.
    regional: LocaleTree,
    /// Separator between dotted key segments.
    key_separator: String,
    /// Notified on every locale change.
    observers: Vec<Arc<dyn LocaleObserver>>,
}

impl Default for LocaleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleStore")
            .field("locale", &self.locale)
            .field("regional", &self.regional)
            .field("key_separator", &self.key_separator)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LocaleStore {
    /// An empty store on [`DEFAULT_LOCALE`] with [`DEFAULT_KEY_SEPARATOR`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            regional: LocaleTree::new(),
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            observers: Vec::new(),
        }
    }

    /// Creates an empty store using the locale and separator from `settings`.
    #[must_use]
    pub fn with_settings(settings: &StoreSettings) -> Self {
        Self {
            locale: settings.default_locale.clone(),
            key_separator: settings.key_separator.clone(),
            ..Self::new()
        }
    }

    /// The active locale identifier.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Every registered bag, keyed by locale identifier.
    #[must_use]
    pub const fn regional(&self) -> &LocaleTree {
        &self.regional
    }

    /// Registers an observer notified on every locale switch.
    pub fn subscribe(&mut self, observer: Arc<dyn LocaleObserver>) {
        self.observers.push(observer);
    }

    /// Switches the active locale and notifies observers.
    ///
    /// The locale does not need to be registered; lookups against it report
    /// [`Missing::Regional`] until a bag is added.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.switch_locale(locale).notify();
    }

    /// Switches the active locale, leaving observer notification to the caller.
    ///
    /// The returned [`LocaleChange`] owns everything observers need, so it can
    /// be delivered after any lock around the store has been released.
    pub fn switch_locale(&mut self, locale: impl Into<String>) -> LocaleChange {
        self.locale = locale.into();
        tracing::debug!(locale = %self.locale, "Locale changed");

        LocaleChange {
            locale: self.locale.clone(),
            known_locales: self.regional.keys().map(str::to_string).collect(),
            observers: self.observers.clone(),
        }
    }

    /// The bag registered for the active locale.
    #[must_use]
    pub fn current(&self) -> Option<&LocaleNode> {
        self.regional.get(&self.locale)
    }

    /// Resolves a dotted key against the active locale.
    ///
    /// Sub-trees are returned whole. Leaf strings are rendered only when
    /// `options` is given; without it placeholders are left untouched.
    /// Absent locales and keys come back as [`Resolution::Missing`].
    ///
    /// # Errors
    /// Returns [`TemplateError::MissingProperty`] when `options` lacks a value
    /// for a placeholder in the resolved string.
    ///
    /// # Examples
    /// ```
    /// use locale_store::store::LocaleStore;
    /// use locale_store::types::LocaleTree;
    /// use serde_json::json;
    ///
    /// let mut store = LocaleStore::new();
    /// store.add(LocaleTree::from_json(&json!({ "it": { "voc": { "Hi": "Ciao" } } })).unwrap());
    /// store.set_locale("it");
    ///
    /// assert_eq!(store.resolve("voc.Hi", None).unwrap().as_text(), Some("Ciao"));
    /// ```
    pub fn resolve(
        &self,
        key: &str,
        options: Option<&TemplateArgs>,
    ) -> Result<Resolution<'_>, TemplateError> {
        let Some(bag) = self.current().filter(|bag| !bag.is_blank()) else {
            return Ok(Resolution::Missing(Missing::Regional { locale: self.locale.clone() }));
        };

        let node = match self.descend(bag, key) {
            Descent::Reached(node) => node,
            Descent::Interrupted => {
                return Ok(Resolution::Missing(Missing::Translation { key: key.to_string() }));
            }
        };

        match node {
            Some(LocaleNode::Tree(tree)) => Ok(Resolution::Tree(Cow::Borrowed(tree))),
            Some(LocaleNode::Text(text)) if !text.is_empty() => match options {
                Some(args) => template::render(text, args, key).map(Resolution::Text),
                None => Ok(Resolution::Text(Cow::Borrowed(text.as_str()))),
            },
            _ => Ok(Resolution::Missing(Missing::TranslationForLocale {
                locale: self.locale.clone(),
                key: key.to_string(),
            })),
        }
    }

    /// Returns true if `key` is defined in the active locale's bag.
    ///
    /// Definedness, not content: an empty string still exists.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        let Some(bag) = self.current().filter(|bag| !bag.is_blank()) else {
            return false;
        };
        matches!(self.descend(bag, key), Descent::Reached(Some(_)))
    }

    /// Resolves `key` without template arguments, or `None` if it does not exist.
    #[must_use]
    pub fn try_resolve(&self, key: &str) -> Option<Resolution<'_>> {
        if !self.exists(key) {
            return None;
        }
        self.resolve(key, None).ok()
    }

    /// Merges a fragment keyed by locale identifier into the regional bag.
    ///
    /// Locales already registered are kept; the fragment's bags for them are
    /// discarded and reported as duplicates.
    pub fn add(&mut self, fragment: LocaleTree) -> &LocaleTree {
        let report = merge(&mut self.regional, [fragment]);
        tracing::debug!(
            locales = self.regional.len(),
            duplicates = report.duplicates().len(),
            "Added locale fragment"
        );
        &self.regional
    }

    /// Registers `bag` under `locale`, as [`LocaleStore::add`] would.
    pub fn add_locale(&mut self, locale: impl Into<String>, bag: LocaleTree) -> &LocaleTree {
        let locale: String = locale.into();
        self.add([(locale, bag)].into_iter().collect())
    }

    /// Walks `key` segment by segment, stopping at the first empty segment.
    fn descend<'a>(&self, bag: &'a LocaleNode, key: &str) -> Descent<'a> {
        let mut node = Some(bag);
        for segment in key.split(self.key_separator.as_str()).take_while(|s| !s.is_empty()) {
            let Some(current) = node.filter(|current| !current.is_blank()) else {
                return Descent::Interrupted;
            };
            node = current.as_tree().and_then(|tree| tree.get(segment));
        }
        Descent::Reached(node)
    }
}
