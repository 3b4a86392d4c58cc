//! Ordered map type for query documents.
//!
//! [`DocumentMap`] wraps an [`IndexMap`] so that output keys come out in the
//! order the schema listed them. Re-inserting a key keeps its original position
//! and replaces the value, which is how two selectors aliased to the same
//! display name resolve: the later one wins.
//!
//! ## Examples
//!
//! ```rust
//! use page_query::{DocumentMap, Value};
//!
//! let mut map = DocumentMap::new();
//! map.insert("title".to_string(), Value::from("Home"));
//! map.insert("id".to_string(), Value::from(1));
//! map.insert("title".to_string(), Value::from("Start"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["title", "id"]);
//! assert_eq!(map.get("title").and_then(|v| v.as_str()), Some("Start"));
//! ```

use indexmap::IndexMap;

/// An insertion-ordered map of string keys to document values.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMap(IndexMap<String, crate::Value>);

impl DocumentMap {
    /// Creates an empty `DocumentMap`.
    #[must_use]
    pub fn new() -> Self {
        DocumentMap(IndexMap::new())
    }

    /// Creates an empty `DocumentMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DocumentMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the key keeps its position and
    /// the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use page_query::{DocumentMap, Value};
    ///
    /// let mut map = DocumentMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl Default for DocumentMap {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for DocumentMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for DocumentMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        DocumentMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = DocumentMap::new();
        map.insert("a".to_string(), Value::from(1));
        map.insert("b".to_string(), Value::from(2));
        map.insert("a".to_string(), Value::from(3));

        let pairs: Vec<_> = map.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), Value::from(3)),
                ("b".to_string(), Value::from(2)),
            ]
        );
    }
}
