//! The flat output mapping.
//!
//! [`FlatMap`] wraps an [`IndexMap`] from dotted keys to [`Value`]s. Entries
//! iterate in the order they were first written, which keeps output stable
//! for tests and logs; callers should not otherwise rely on it.
//!
//! Writing an existing key replaces its value in place. Two fields that render
//! to the same dotted key therefore collide silently and the last write wins.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotted::{FlatMap, Value};
//!
//! let mut map = FlatMap::new();
//! map.insert("user.name".to_string(), Value::from("Alice"));
//! map.insert("user.age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("user.name").and_then(Value::as_str), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A mapping from dotted keys to leaf values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatMap(IndexMap<String, Value>);

impl FlatMap {
    /// Creates an empty `FlatMap`.
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }

    /// Creates an empty `FlatMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FlatMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{FlatMap, Value};
    ///
    /// let mut map = FlatMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// assert_eq!(map.get("key").and_then(Value::as_i64), Some(43));
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in first-write order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in first-write order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in first-write order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns the keys sorted lexicographically.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Serialize for FlatMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

impl From<HashMap<String, Value>> for FlatMap {
    fn from(map: HashMap<String, Value>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl From<FlatMap> for HashMap<String, Value> {
    fn from(map: FlatMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        FlatMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for FlatMap {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
