//! Duplicate-safe merging of locale fragments.

use crate::error::MergeError;
use crate::types::LocaleTree;

/// Keys rejected by a [`merge`] because the target already held them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct MergeReport {
    /// Conflicting keys: sources in order, each source's keys sorted.
    duplicates: Vec<String>,
}

impl MergeReport {
    /// Every rejected key, in the order it was met.
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Whether the merge had no conflicts.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// Turns the report into an error when anything conflicted.
    ///
    /// # Errors
    /// Returns [`MergeError::DuplicateKeys`] if any key conflicted.
    pub fn into_result(self) -> Result<(), MergeError> {
        if self.is_clean() { Ok(()) } else { Err(MergeError::DuplicateKeys(self.duplicates)) }
    }
}

/// Adds the top-level entries of each source to `target`, left to right.
///
/// Only one level deep: a key already present in `target` keeps its value,
/// and the source's value is dropped and recorded as a duplicate. `None`
/// sources are skipped. Each source's keys are applied in lexical order, so
/// the reported duplicates do not depend on hash order. Duplicates are logged
/// once after every source has been applied; they never abort the merge.
///
/// # Examples
/// ```
/// use locale_store::merge::merge;
/// use locale_store::types::LocaleTree;
///
/// let mut target: LocaleTree = [("a", "1")].into_iter().collect();
/// let source: LocaleTree = [("a", "2"), ("b", "3")].into_iter().collect();
///
/// let report = merge(&mut target, [source]);
///
/// assert_eq!(report.duplicates(), ["a"]);
/// assert_eq!(target.get("a").and_then(|node| node.as_text()), Some("1"));
/// assert_eq!(target.get("b").and_then(|node| node.as_text()), Some("3"));
/// ```
pub fn merge<I>(target: &mut LocaleTree, sources: I) -> MergeReport
where
    I: IntoIterator,
    I::Item: Into<Option<LocaleTree>>,
{
    let mut report = MergeReport::default();

    for source in sources.into_iter().filter_map(Into::<Option<LocaleTree>>::into) {
        let mut entries: Vec<_> = source.into_iter().collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));

        for (key, node) in entries {
            if target.contains_key(&key) {
                report.duplicates.push(key);
            } else {
                target.insert(key, node);
            }
        }
    }

    if let Err(err) = report.clone().into_result() {
        tracing::error!("{err}");
    }

    report
}
