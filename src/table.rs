//! Sorted Lua table container.
//!
//! [`LuaTable`] is the map-like shape of a Lua table. Keys may be any
//! [`LuaValue`] and entries are kept in the canonical key order on every
//! insertion: numbers ascending first, then every other key by its text form.
//! The table also tracks its Lua length, the largest `n` such that keys
//! `1..=n` are all present.
//!
//! ## Examples
//!
//! ```rust
//! use serde_luadata::{LuaTable, LuaValue};
//!
//! let mut table = LuaTable::new();
//! table.insert(LuaValue::from("b"), LuaValue::from(2));
//! table.insert(LuaValue::from(1), LuaValue::from("one"));
//! table.insert(LuaValue::from("a"), LuaValue::from(1));
//!
//! let keys: Vec<_> = table.keys().cloned().collect();
//! assert_eq!(keys, vec![LuaValue::from(1), LuaValue::from("a"), LuaValue::from("b")]);
//! assert_eq!(table.lua_length(), 1);
//! ```

use crate::value::{compare_keys, same_key};
use crate::{LuaMap, LuaValue};
use std::cmp::Ordering;

/// A table with arbitrary keys, kept in canonical key order.
#[derive(Debug, Clone, Default)]
pub struct LuaTable {
    entries: Vec<(LuaValue, LuaValue)>,
    lua_length: usize,
}

impl LuaTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        LuaTable {
            entries: Vec::with_capacity(capacity),
            lua_length: 0,
        }
    }

    /// Inserts an entry at its sorted position.
    ///
    /// If the table already holds the same key, the value is replaced in place
    /// and the old value is returned. Keys that merely compare equal, such as
    /// two nested tables, are kept side by side in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::{LuaTable, LuaValue};
    ///
    /// let mut table = LuaTable::new();
    /// assert!(table.insert(LuaValue::from(1), LuaValue::from("a")).is_none());
    /// assert_eq!(
    ///     table.insert(LuaValue::from(1.0), LuaValue::from("b")),
    ///     Some(LuaValue::from("a"))
    /// );
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: LuaValue, value: LuaValue) -> Option<LuaValue> {
        let lower = self
            .entries
            .partition_point(|(k, _)| compare_keys(k, &key) == Ordering::Less);
        let upper = lower
            + self.entries[lower..]
                .partition_point(|(k, _)| compare_keys(k, &key) == Ordering::Equal);

        if let Some((_, slot)) = self.entries[lower..upper]
            .iter_mut()
            .find(|(k, _)| same_key(k, &key))
        {
            return Some(std::mem::replace(slot, value));
        }

        let extends_sequence = key.as_i64() == Some(self.lua_length as i64 + 1);
        self.entries.insert(upper, (key, value));
        if extends_sequence {
            self.lua_length += 1;
            while self.contains_key(&LuaValue::from(self.lua_length as i64 + 1)) {
                self.lua_length += 1;
            }
        }
        None
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &LuaValue) -> Option<&LuaValue> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &LuaValue) -> bool {
        self.position(key).is_some()
    }

    fn position(&self, key: &LuaValue) -> Option<usize> {
        let lower = self
            .entries
            .partition_point(|(k, _)| compare_keys(k, key) == Ordering::Less);
        self.entries[lower..]
            .iter()
            .take_while(|(k, _)| compare_keys(k, key) == Ordering::Equal)
            .position(|(k, _)| same_key(k, key))
            .map(|offset| lower + offset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The Lua length operator: the largest `n` with keys `1..=n` all present.
    #[must_use]
    pub fn lua_length(&self) -> usize {
        self.lua_length
    }

    /// Whether the keys are exactly `1..=len()`.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        self.lua_length == self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (LuaValue, LuaValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &LuaValue> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &LuaValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Converts the table into its values when it is a sequence.
    pub fn into_sequence(self) -> Result<Vec<LuaValue>, LuaTable> {
        if self.is_sequence() {
            Ok(self.entries.into_iter().map(|(_, v)| v).collect())
        } else {
            Err(self)
        }
    }

    /// Converts the table into a record, stringifying every key.
    ///
    /// Later keys whose text collides with an earlier one overwrite it.
    #[must_use]
    pub fn into_record(self) -> LuaMap {
        self.entries
            .into_iter()
            .map(|(k, v)| (k.key_text().into_owned(), v))
            .collect()
    }

    /// The value a freshly closed table becomes: an array when it is a
    /// sequence, the table itself otherwise.
    #[must_use]
    pub fn into_value(self) -> LuaValue {
        match self.into_sequence() {
            Ok(items) => LuaValue::Array(items),
            Err(table) => LuaValue::Table(table),
        }
    }
}

impl PartialEq for LuaTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl FromIterator<(LuaValue, LuaValue)> for LuaTable {
    fn from_iter<T: IntoIterator<Item = (LuaValue, LuaValue)>>(iter: T) -> Self {
        let mut table = LuaTable::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

impl IntoIterator for LuaTable {
    type Item = (LuaValue, LuaValue);
    type IntoIter = std::vec::IntoIter<(LuaValue, LuaValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LuaTable {
    type Item = &'a (LuaValue, LuaValue);
    type IntoIter = std::slice::Iter<'a, (LuaValue, LuaValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
