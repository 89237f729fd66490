//! Shared handle to a locale store.

use std::sync::{
    Arc,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use crate::error::TemplateError;
use crate::store::{
    LocaleStore,
    Resolution,
    TemplateArgs,
};
use crate::types::LocaleTree;

/// Cloneable handle giving every consumer the same [`LocaleStore`].
///
/// Reads take a shared lock and writes an exclusive one, so locale switches
/// and merges are serialized against lookups. Lookups through the handle
/// return owned values since the lock is released on return.
#[derive(Clone, Default)]
pub struct SharedStore {
    /// The store behind the handle
    inner: Arc<RwLock<LocaleStore>>,
}

impl SharedStore {
    /// Wraps `store` in a fresh handle.
    #[must_use]
    pub fn new(store: LocaleStore) -> Self {
        Self { inner: Arc::new(RwLock::new(store)) }
    }

    /// Read access to the store.
    pub fn read(&self) -> RwLockReadGuard<'_, LocaleStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the store.
    pub fn write(&self) -> RwLockWriteGuard<'_, LocaleStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The active locale identifier.
    #[must_use]
    pub fn locale(&self) -> String {
        self.read().locale().to_string()
    }

    /// Switches the active locale for every clone of the handle.
    ///
    /// Observers run after the write lock is released, so they may read
    /// through the handle themselves.
    pub fn set_locale(&self, locale: impl Into<String>) {
        let change = self.write().switch_locale(locale);
        change.notify();
    }

    /// Merges `fragment` into the regional bag; see [`LocaleStore::add`].
    pub fn add(&self, fragment: LocaleTree) {
        self.write().add(fragment);
    }

    /// Resolves `key` against the active locale; see [`LocaleStore::resolve`].
    ///
    /// # Errors
    /// Returns [`TemplateError::MissingProperty`] as [`LocaleStore::resolve`] does.
    pub fn resolve(
        &self,
        key: &str,
        options: Option<&TemplateArgs>,
    ) -> Result<Resolution<'static>, TemplateError> {
        self.read().resolve(key, options).map(Resolution::into_owned)
    }

    /// See [`LocaleStore::exists`].
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.read().exists(key)
    }

    /// See [`LocaleStore::try_resolve`].
    #[must_use]
    pub fn try_resolve(&self, key: &str) -> Option<Resolution<'static>> {
        self.read().try_resolve(key).map(Resolution::into_owned)
    }
}

impl From<LocaleStore> for SharedStore {
    fn from(store: LocaleStore) -> Self {
        Self::new(store)
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore").field("inner", &"<RwLock<LocaleStore>>").finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{
        Mutex,
        mpsc,
    };
    use std::thread;
    use std::time::Duration;

    use googletest::prelude::*;

    use super::*;
    use crate::observer::LocaleObserver;
    use crate::test_utils::{
        sample_store,
        tree,
    };

    #[googletest::test]
    fn clone_shares_state() {
        let handle = SharedStore::new(sample_store());
        let other = handle.clone();

        expect_that!(Arc::strong_count(&handle.inner), eq(2));
        expect_that!(Arc::ptr_eq(&handle.inner, &other.inner), eq(true));

        other.set_locale("it");

        expect_that!(handle.locale(), eq("it"));
        expect_that!(handle.resolve("voc.Hi", None).unwrap().as_text(), some(eq("Ciao")));
    }

    #[googletest::test]
    fn add_through_handle_is_visible_to_clones() {
        let handle = SharedStore::default();
        let reader = handle.clone();

        handle.add(tree(&serde_json::json!({ "en": { "Hi": "Hi" } })));

        expect_that!(reader.exists("Hi"), eq(true));
        expect_that!(reader.try_resolve("Hi").unwrap().as_text(), some(eq("Hi")));
    }

    #[googletest::test]
    fn concurrent_reads_after_population() {
        let handle = SharedStore::from(sample_store());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || handle.resolve("voc.Hi", None).unwrap())
            })
            .collect();

        for reader in readers {
            expect_that!(reader.join().unwrap().as_text(), some(eq("Hi")));
        }
    }

    /// Re-renders through the handle whenever the locale changes.
    struct Rerender {
        /// Handle the observer reads from.
        handle: SharedStore,
        /// Text rendered on each change.
        rendered: Mutex<Vec<String>>,
    }

    impl LocaleObserver for Rerender {
        fn locale_changed(&self, _active: &str, _known_locales: &[&str]) {
            let text = self.handle.resolve("voc.Hi", None).unwrap();
            self.rendered.lock().unwrap().push(text.as_text().unwrap_or_default().to_string());
        }
    }

    #[googletest::test]
    fn observers_may_read_through_the_handle() {
        let handle = SharedStore::new(sample_store());
        let observer =
            Arc::new(Rerender { handle: handle.clone(), rendered: Mutex::new(Vec::new()) });
        handle.write().subscribe(observer.clone());

        let (done, finished) = mpsc::channel();
        let switcher = handle.clone();
        thread::spawn(move || {
            switcher.set_locale("it");
            let _ = done.send(());
        });

        expect_that!(finished.recv_timeout(Duration::from_secs(5)).is_ok(), eq(true));
        expect_that!(*observer.rendered.lock().unwrap(), elements_are![eq("Ciao")]);
    }

    #[googletest::test]
    fn debug_impl_works() {
        let handle = SharedStore::default();

        let debug_str = format!("{handle:?}");

        expect_that!(debug_str, contains_substring("SharedStore"));
    }
}
