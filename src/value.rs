//! Dynamic value representation for luadata.
//!
//! This module provides the [`LuaValue`] enum which represents any value the
//! codec can read or write, and [`Number`], the numeric domain shared by both
//! directions.
//!
//! ## Containers
//!
//! Lua has a single container type, the table. The codec distinguishes three
//! shapes of it:
//!
//! - [`LuaValue::Array`]: an array-shaped table, keys exactly `1..n`
//! - [`LuaValue::Table`]: any other table, keys of any type, kept sorted
//! - [`LuaValue::Object`]: a record with string keys, in insertion order
//!
//! ## Examples
//!
//! ```rust
//! use serde_luadata::{lua, LuaValue, Number};
//!
//! let value = lua!({ "name": "Alice", "tags": ["a", "b"] });
//! assert!(value.is_table());
//! assert_eq!(value.get(&LuaValue::from("name")).and_then(|v| v.as_str()), Some("Alice"));
//!
//! // Integers and integral floats are the same number.
//! assert_eq!(LuaValue::from(100), LuaValue::from(100.0));
//! assert_eq!(Number::Integer(1), Number::Float(1.0));
//! ```

use crate::{LuaMap, LuaTable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A dynamically-typed luadata value.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{LuaValue, Number};
///
/// let nil = LuaValue::Nil;
/// let num = LuaValue::Number(Number::Integer(42));
/// let text = LuaValue::String("hello".to_string());
///
/// assert!(nil.is_nil());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum LuaValue {
    #[default]
    Nil,
    Boolean(bool),
    Number(Number),
    String(String),
    Array(Vec<LuaValue>),
    Table(LuaTable),
    Object(LuaMap),
}

/// A luadata number.
///
/// Integer literals parse to [`Number::Integer`] and literals with a dot parse
/// to [`Number::Float`]. Equality is numeric, so `Integer(1) == Float(1.0)`.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
/// assert_eq!(Number::Float(0.5).as_i64(), None);
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(f64::INFINITY).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// Total order used for table keys: by numeric value, NaN last.
    pub(crate) fn total_cmp(&self, other: &Number) -> Ordering {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    /// Writes the shortest decimal text that reads back to the same number.
    ///
    /// Non-finite floats use the Lua spellings `math.huge`, `-math.huge` and `0/0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => write!(f, "0/0"),
            Number::Float(fl) if fl.is_infinite() => {
                write!(f, "{}math.huge", if *fl < 0.0 { "-" } else { "" })
            }
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(value as i64)
                }
            }

            impl From<$ty> for LuaValue {
                fn from(value: $ty) -> Self {
                    LuaValue::Number(Number::Integer(value as i64))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl LuaValue {
    /// Returns `true` if the value is nil.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, LuaValue::Nil)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, LuaValue::Boolean(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, LuaValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, LuaValue::String(_))
    }

    /// Returns `true` if the value is an array-shaped table.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, LuaValue::Array(_))
    }

    /// Returns `true` if the value is a map-like table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, LuaValue::Table(_))
    }

    /// Returns `true` if the value is a record.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, LuaValue::Object(_))
    }

    /// Returns `true` for any of the three table shapes.
    #[inline]
    #[must_use]
    pub const fn is_indexable(&self) -> bool {
        matches!(
            self,
            LuaValue::Array(_) | LuaValue::Table(_) | LuaValue::Object(_)
        )
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LuaValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a number, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            LuaValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::LuaValue;
    ///
    /// assert_eq!(LuaValue::from(42).as_i64(), Some(42));
    /// assert_eq!(LuaValue::from(42.0).as_i64(), Some(42));
    /// assert_eq!(LuaValue::from(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LuaValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LuaValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LuaValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array-shaped table, returns its elements.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<LuaValue>> {
        match self {
            LuaValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a map-like table, returns it.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&LuaTable> {
        match self {
            LuaValue::Table(table) => Some(table),
            _ => None,
        }
    }

    /// If the value is a record, returns it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&LuaMap> {
        match self {
            LuaValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up `key` the way a Lua field or index access would.
    ///
    /// Arrays are indexed from 1. Records match string keys, and numeric keys
    /// by their decimal text. Any non-table value yields `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::{lua, LuaValue};
    ///
    /// let list = lua!(["a", "b"]);
    /// assert_eq!(list.get(&LuaValue::from(2)), Some(&LuaValue::from("b")));
    /// assert_eq!(list.get(&LuaValue::from(0)), None);
    /// assert_eq!(list.get(&LuaValue::from("x")), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &LuaValue) -> Option<&LuaValue> {
        match self {
            LuaValue::Array(arr) => {
                let index = key.as_i64()?;
                if index < 1 {
                    return None;
                }
                arr.get(usize::try_from(index - 1).ok()?)
            }
            LuaValue::Table(table) => table.get(key),
            LuaValue::Object(obj) => match key {
                LuaValue::String(name) => obj.get(name),
                LuaValue::Number(n) => obj.get(&n.to_string()),
                _ => None,
            },
            _ => None,
        }
    }

    /// The text used to order non-numeric table keys.
    pub(crate) fn key_text(&self) -> std::borrow::Cow<'_, str> {
        use std::borrow::Cow;

        match self {
            LuaValue::Nil => Cow::Borrowed("nil"),
            LuaValue::Boolean(true) => Cow::Borrowed("true"),
            LuaValue::Boolean(false) => Cow::Borrowed("false"),
            LuaValue::Number(n) => Cow::Owned(n.to_string()),
            LuaValue::String(s) => Cow::Borrowed(s),
            LuaValue::Array(_) | LuaValue::Table(_) | LuaValue::Object(_) => {
                Cow::Borrowed("table")
            }
        }
    }
}

/// Orders table keys: numbers first by value, then everything else by text.
pub(crate) fn compare_keys(a: &LuaValue, b: &LuaValue) -> Ordering {
    match (a, b) {
        (LuaValue::Number(x), LuaValue::Number(y)) => x.total_cmp(y),
        (LuaValue::Number(_), _) => Ordering::Less,
        (_, LuaValue::Number(_)) => Ordering::Greater,
        _ => a.key_text().cmp(&b.key_text()),
    }
}

/// Whether two keys address the same table slot.
///
/// Containers are never the same slot, matching Lua's identity semantics.
pub(crate) fn same_key(a: &LuaValue, b: &LuaValue) -> bool {
    match (a, b) {
        (LuaValue::Nil, LuaValue::Nil) => true,
        (LuaValue::Boolean(x), LuaValue::Boolean(y)) => x == y,
        (LuaValue::Number(x), LuaValue::Number(y)) => x == y,
        (LuaValue::String(x), LuaValue::String(y)) => x == y,
        _ => false,
    }
}

impl fmt::Display for LuaValue {
    /// Writes the compact luadata text of the value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serialize(self, &crate::SerializeOptions::default()))
    }
}

impl Serialize for LuaValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LuaValue::Nil => serializer.serialize_unit(),
            LuaValue::Boolean(b) => serializer.serialize_bool(*b),
            LuaValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            LuaValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            LuaValue::String(s) => serializer.serialize_str(s),
            LuaValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            LuaValue::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            LuaValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for LuaValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct LuaValueVisitor;

        impl<'de> Visitor<'de> for LuaValueVisitor {
            type Value = LuaValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid luadata value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(LuaValue::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(LuaValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(LuaValue::Number(Number::Integer(i))),
                    Err(_) => Ok(LuaValue::Number(Number::Float(value as f64))),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(LuaValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(LuaValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(LuaValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(LuaValue::Nil)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(LuaValue::Nil)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(LuaValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = LuaTable::new();
                while let Some((key, value)) = map.next_entry::<LuaValue, LuaValue>()? {
                    table.insert(key, value);
                }
                Ok(table.into_value())
            }
        }

        deserializer.deserialize_any(LuaValueVisitor)
    }
}

impl TryFrom<LuaValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: LuaValue) -> crate::Result<Self> {
        match value.as_i64() {
            Some(i) => Ok(i),
            None => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<LuaValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: LuaValue) -> crate::Result<Self> {
        match value {
            LuaValue::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<LuaValue> for bool {
    type Error = crate::Error;

    fn try_from(value: LuaValue) -> crate::Result<Self> {
        match value {
            LuaValue::Boolean(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<LuaValue> for String {
    type Error = crate::Error;

    fn try_from(value: LuaValue) -> crate::Result<Self> {
        match value {
            LuaValue::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value
            ))),
        }
    }
}

impl From<bool> for LuaValue {
    fn from(value: bool) -> Self {
        LuaValue::Boolean(value)
    }
}

impl From<f32> for LuaValue {
    fn from(value: f32) -> Self {
        LuaValue::Number(Number::Float(value as f64))
    }
}

impl From<f64> for LuaValue {
    fn from(value: f64) -> Self {
        LuaValue::Number(Number::Float(value))
    }
}

impl From<Number> for LuaValue {
    fn from(value: Number) -> Self {
        LuaValue::Number(value)
    }
}

impl From<String> for LuaValue {
    fn from(value: String) -> Self {
        LuaValue::String(value)
    }
}

impl From<&str> for LuaValue {
    fn from(value: &str) -> Self {
        LuaValue::String(value.to_string())
    }
}

impl From<Vec<LuaValue>> for LuaValue {
    fn from(value: Vec<LuaValue>) -> Self {
        LuaValue::Array(value)
    }
}

impl From<LuaTable> for LuaValue {
    fn from(value: LuaTable) -> Self {
        LuaValue::Table(value)
    }
}

impl From<LuaMap> for LuaValue {
    fn from(value: LuaMap) -> Self {
        LuaValue::Object(value)
    }
}

impl<T: Into<LuaValue>> From<Option<T>> for LuaValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(LuaValue::Nil, Into::into)
    }
}
