//! Ordered map type for dump documents.
//!
//! This module provides [`DumpMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for document entries. Read order is preserved
//! so the `Insertion` write-ordering policy can reproduce it; the default
//! `Sorted` policy orders keys at write time without disturbing the map.
//!
//! ## Examples
//!
//! ```rust
//! use fielddump::{DumpMap, Value};
//!
//! let mut map = DumpMap::new();
//! map.insert("/0/data/unit-z".to_string(), Value::from("m"));
//! map.insert("/0/data/xres".to_string(), Value::from(128));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(
//!     map.get("/0/data/unit-z").and_then(|v| v.as_str()),
//!     Some("m")
//! );
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An ordered map of string keys to dump values.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion
/// order, which is what makes the insertion-order serialization policy and
/// deterministic iteration possible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DumpMap(IndexMap<String, Value>);

impl DumpMap {
    /// Creates an empty `DumpMap`.
    #[must_use]
    pub fn new() -> Self {
        DumpMap(IndexMap::new())
    }

    /// Creates an empty `DumpMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DumpMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position. This is also how a data field
    /// silently replaces an earlier scalar that happened to use its base
    /// key.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Removes a key from the map, preserving the order of the remaining
    /// entries. Returns the removed value, if any.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterates over `(key, value)` pairs with mutable values.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }
}

impl FromIterator<(String, Value)> for DumpMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        DumpMap(iter.into_iter().collect())
    }
}

impl Extend<(String, Value)> for DumpMap {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for DumpMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DumpMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
