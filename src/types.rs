//! Locale data model: nested trees of translated strings.

use std::collections::HashMap;
use std::num::FpCategory;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// A node inside a locale tree: a translated string or a nested tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleNode {
    /// Leaf string. Empty text is defined but never yields a translation.
    Text(String),
    /// Nested mapping of segment to node.
    Tree(LocaleTree),
}

impl LocaleNode {
    /// Converts arbitrary JSON into a node.
    ///
    /// Arrays become trees keyed by element index. Falsy scalars (`null`,
    /// `false` and any zero number) become an empty string, so they are
    /// defined but never resolve to a translation. Other numbers and `true`
    /// keep their JSON text.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::Tree(
                map.iter().map(|(key, value)| (key.clone(), Self::from_json(value))).collect(),
            ),
            Value::Array(arr) => Self::Tree(
                arr.iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), Self::from_json(value)))
                    .collect(),
            ),
            Value::String(s) => Self::Text(s.clone()),
            scalar if is_falsy(scalar) => Self::Text(String::new()),
            scalar => Self::Text(scalar.to_string()),
        }
    }

    /// The leaf string, or `None` for a tree.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Tree(_) => None,
        }
    }

    /// The nested tree, or `None` for a leaf.
    #[must_use]
    pub const fn as_tree(&self) -> Option<&LocaleTree> {
        match self {
            Self::Text(_) => None,
            Self::Tree(tree) => Some(tree),
        }
    }

    /// Returns true for nodes that cannot yield a translation.
    ///
    /// Only empty text is blank; falsy JSON scalars are stored as empty text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

/// `null`, `false`, `0`, `-0` and `0.0`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => {
            number.as_f64().is_some_and(|n| n.classify() == FpCategory::Zero)
        }
        _ => false,
    }
}

impl From<&str> for LocaleNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for LocaleNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<LocaleTree> for LocaleNode {
    fn from(tree: LocaleTree) -> Self {
        Self::Tree(tree)
    }
}

/// String-keyed mapping of locale nodes.
///
/// Used both for a single locale bag and for the regional bag keyed by
/// locale identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTree {
    /// Segment to node.
    entries: HashMap<String, LocaleNode>,
}

impl LocaleTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from a JSON object or array; other values yield `None`.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use locale_store::types::LocaleTree;
    ///
    /// let tree = LocaleTree::from_json(&json!({ "voc": { "Hi": "Ciao" } })).unwrap();
    /// assert!(tree.contains_key("voc"));
    /// assert!(LocaleTree::from_json(&json!("Ciao")).is_none());
    /// ```
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match LocaleNode::from_json(value) {
            LocaleNode::Tree(tree) => Some(tree),
            LocaleNode::Text(_) => None,
        }
    }

    /// The node stored directly under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LocaleNode> {
        self.entries.get(key)
    }

    /// Whether `key` is defined at this level, blank or not.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a node, returning the one previously stored under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        node: impl Into<LocaleNode>,
    ) -> Option<LocaleNode> {
        self.entries.insert(key.into(), node.into())
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct child keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Direct children, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Flattens the tree into a map of joined keys to leaf strings.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use locale_store::types::LocaleTree;
    ///
    /// let tree = LocaleTree::from_json(&json!({
    ///     "common": {
    ///         "hello": "Hello",
    ///         "goodbye": "Goodbye"
    ///     }
    /// }))
    /// .unwrap();
    ///
    /// let flattened = tree.flatten(".");
    /// assert_eq!(flattened.get("common.hello"), Some(&"Hello".to_string()));
    /// assert_eq!(flattened.get("common.goodbye"), Some(&"Goodbye".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> HashMap<String, String> {
        let mut result = HashMap::new();
        flatten_tree(self, separator, None, &mut result);
        result
    }
}

/// Depth-first walk behind [`LocaleTree::flatten`]; `prefix` is the joined
/// key of `tree` itself.
fn flatten_tree(
    tree: &LocaleTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    for (key, node) in tree.iter() {
        let full_key = prefix.map_or_else(|| key.to_string(), |p| format!("{p}{separator}{key}"));
        match node {
            LocaleNode::Tree(subtree) => flatten_tree(subtree, separator, Some(&full_key), result),
            LocaleNode::Text(text) => {
                result.insert(full_key, text.clone());
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for LocaleTree
where
    K: Into<String>,
    V: Into<LocaleNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(key, node)| (key.into(), node.into())).collect() }
    }
}

impl IntoIterator for LocaleTree {
    type Item = (String, LocaleNode);
    type IntoIter = std::collections::hash_map::IntoIter<String, LocaleNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn from_json_nested_objects() {
        let tree = LocaleTree::from_json(&json!({
            "voc": {
                "Hi": "Hi",
                "Bye": "Bye"
            }
        }))
        .unwrap();

        let voc = tree.get("voc").and_then(LocaleNode::as_tree).unwrap();
        expect_that!(voc.len(), eq(2));
        expect_that!(voc.get("Hi").and_then(LocaleNode::as_text), some(eq("Hi")));
    }

    #[googletest::test]
    fn from_json_arrays_are_keyed_by_index() {
        let tree = LocaleTree::from_json(&json!({ "days": ["Mon", "Tue"] })).unwrap();

        let days = tree.get("days").and_then(LocaleNode::as_tree).unwrap();
        expect_that!(days.get("0").and_then(LocaleNode::as_text), some(eq("Mon")));
        expect_that!(days.get("1").and_then(LocaleNode::as_text), some(eq("Tue")));
    }

    #[rstest]
    #[case::number(json!(42), "42")]
    #[case::boolean(json!(true), "true")]
    #[case::null(json!(null), "")]
    #[case::zero(json!(0), "")]
    #[case::negative_zero(json!(-0.0), "")]
    #[case::float_zero(json!(0.0), "")]
    #[case::falsy_boolean(json!(false), "")]
    #[case::negative(json!(-1), "-1")]
    #[case::fraction(json!(0.5), "0.5")]
    #[case::string(json!("plain"), "plain")]
    fn from_json_scalars(#[case] value: Value, #[case] expected: &str) {
        assert_that!(LocaleNode::from_json(&value), eq(&LocaleNode::Text(expected.to_string())));
    }

    #[googletest::test]
    fn from_json_rejects_scalar_root() {
        expect_that!(LocaleTree::from_json(&json!("text")).is_none(), eq(true));
        expect_that!(LocaleTree::from_json(&json!(1)).is_none(), eq(true));
    }

    #[rstest]
    #[case::empty_text(LocaleNode::from(""), true)]
    #[case::text(LocaleNode::from("x"), false)]
    #[case::empty_tree(LocaleNode::from(LocaleTree::new()), false)]
    fn is_blank(#[case] node: LocaleNode, #[case] expected: bool) {
        assert_that!(node.is_blank(), eq(expected));
    }

    #[googletest::test]
    fn flatten_deep_nested() {
        let tree = LocaleTree::from_json(&json!({
            "a": { "b": { "c": "Deep value" } },
            "top": "Top"
        }))
        .unwrap();

        let result = tree.flatten(".");

        expect_that!(result.get("a.b.c"), some(eq(&"Deep value".to_string())));
        expect_that!(result.get("top"), some(eq(&"Top".to_string())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn flatten_custom_separator() {
        let tree = LocaleTree::from_json(&json!({ "common": { "hello": "Hello" } })).unwrap();

        expect_that!(tree.flatten("_").get("common_hello"), some(eq(&"Hello".to_string())));
    }

    #[googletest::test]
    fn deserializes_from_json_text() {
        let tree: LocaleTree = serde_json::from_str(r#"{"voc": {"Hi": "Ciao"}}"#).unwrap();

        let expected = LocaleTree::from_json(&json!({ "voc": { "Hi": "Ciao" } })).unwrap();
        expect_that!(tree, eq(&expected));
    }

    #[googletest::test]
    fn collects_from_pairs() {
        let tree: LocaleTree = [("a", "1"), ("b", "2")].into_iter().collect();

        expect_that!(tree.len(), eq(2));
        expect_that!(tree.get("b").and_then(LocaleNode::as_text), some(eq("2")));
    }
}
