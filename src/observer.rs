//! Locale change notifications for presentation layers.

use std::collections::BTreeSet;
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError,
};

/// Receives the active locale whenever it changes.
///
/// `known_locales` lists every locale registered in the store at the time of
/// the change, so implementations can clear state tied to other locales.
pub trait LocaleObserver: Send + Sync {
    /// Called after `active` became the current locale.
    fn locale_changed(&self, active: &str, known_locales: &[&str]);
}

/// Class-list style set of markers named after the lowercased active locale.
///
/// On each change every known locale's marker is removed before the active
/// one is added, so at most one locale marker is present at a time. Markers
/// unrelated to locales are left alone.
#[derive(Debug, Default)]
pub struct MarkerSet {
    /// Current markers, kept sorted.
    markers: Mutex<BTreeSet<String>>,
}

impl MarkerSet {
    /// An empty marker set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary marker.
    pub fn insert(&self, marker: impl Into<String>) {
        self.lock().insert(marker.into());
    }

    /// Whether `marker` is currently set.
    #[must_use]
    pub fn contains(&self, marker: &str) -> bool {
        self.lock().contains(marker)
    }

    /// Returns a sorted snapshot of the current markers.
    #[must_use]
    pub fn markers(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// Poison-tolerant access to the markers.
    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.markers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocaleObserver for MarkerSet {
    fn locale_changed(&self, active: &str, known_locales: &[&str]) {
        let mut markers = self.lock();
        for locale in known_locales {
            markers.remove(&locale.to_lowercase());
        }
        markers.insert(active.to_lowercase());
    }
}
