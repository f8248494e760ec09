//! Insertion-ordered record type.
//!
//! [`LuaMap`] backs [`LuaValue::Object`](crate::LuaValue::Object), the record
//! shape a table takes when it is read with [`DictType::Object`](crate::DictType)
//! or built from a Rust struct. Fields serialize in the order they were
//! inserted.
//!
//! ## Examples
//!
//! ```rust
//! use serde_luadata::{LuaMap, LuaValue};
//!
//! let mut map = LuaMap::new();
//! map.insert("name".to_string(), LuaValue::from("Alice"));
//! map.insert("age".to_string(), LuaValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to luadata values.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{LuaMap, LuaValue};
///
/// let mut map = LuaMap::new();
/// map.insert("first".to_string(), LuaValue::from(1));
/// map.insert("second".to_string(), LuaValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LuaMap(IndexMap<String, crate::LuaValue>);

impl LuaMap {
    #[must_use]
    pub fn new() -> Self {
        LuaMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        LuaMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, returning the previous value under that name.
    ///
    /// A replaced field keeps its original position.
    pub fn insert(&mut self, key: String, value: crate::LuaValue) -> Option<crate::LuaValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::LuaValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a field, shifting later fields down to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<crate::LuaValue> {
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

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::LuaValue> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::LuaValue> {
        self.0.values()
    }

    /// Returns an iterator over the fields, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::LuaValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::LuaValue>> for LuaMap {
    fn from(map: HashMap<String, crate::LuaValue>) -> Self {
        LuaMap(map.into_iter().collect())
    }
}

impl IntoIterator for LuaMap {
    type Item = (String, crate::LuaValue);
    type IntoIter = indexmap::map::IntoIter<String, crate::LuaValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LuaMap {
    type Item = (&'a String, &'a crate::LuaValue);
    type IntoIter = indexmap::map::Iter<'a, String, crate::LuaValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::LuaValue)> for LuaMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::LuaValue)>>(iter: T) -> Self {
        LuaMap(IndexMap::from_iter(iter))
    }
}
