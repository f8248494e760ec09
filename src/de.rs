//! luadata deserialization.
//!
//! This module provides the [`Deserializer`], which parses luadata text, and
//! [`ValueDeserializer`], which drives serde from an already parsed
//! [`LuaValue`].
//!
//! ## Overview
//!
//! Parsing always produces a complete [`LuaValue`] first (see
//! [`unserialize`](crate::unserialize)); serde then walks that value. This
//! keeps global resolution and error positions in one place, the parser, and
//! lets every `Deserialize` type read from text and from values the same way.
//!
//! ## Usage
//!
//! ```rust
//! use serde_luadata::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_str("{x=1,y=2}").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//!
//! let points: Vec<Point> = from_str("{{x=1,y=2},{y=4,x=3}}").unwrap();
//! assert_eq!(points[1], Point { x: 3, y: 4 });
//! ```
//!
//! ## Shapes
//!
//! - Integer targets accept floats with no fractional part
//! - Maps accept arrays (keyed `1..n`), tables and records
//! - Enums are read from a string (unit variants) or a table with a single
//!   entry `{Variant=payload}`
//! - `Option` reads `nil` as `None`

use crate::parser::Parser;
use crate::{Error, ErrorKind, LuaMap, LuaValue, Number, Result, UnserializeOptions};
use serde::de::{self, Deserializer as _, IntoDeserializer, Unexpected};

/// The luadata text deserializer.
///
/// Created via [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de> {
    input: &'de str,
    options: UnserializeOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, UnserializeOptions::default())
    }

    pub fn with_options(input: &'de str, options: UnserializeOptions) -> Self {
        Deserializer { input, options }
    }

    /// Parses every top-level value.
    pub fn parse_tuple(&self) -> Result<Vec<LuaValue>> {
        Parser::new(self.input, &self.options).parse()
    }

    /// Parses the input into one value: the first top-level value, or all of
    /// them as an array when tuple mode is on.
    pub fn parse_value(&self) -> Result<LuaValue> {
        let values = self.parse_tuple()?;
        if self.options.tuple {
            return Ok(LuaValue::Array(values));
        }
        values.into_iter().next().ok_or_else(|| {
            Error::unserialize(self.input, self.input.len(), ErrorKind::NothingToUnserialize)
        })
    }
}

macro_rules! forward_parsed_value {
    ($($method:ident($($arg:ident: $ty:ty),*))*) => {
        $(
            fn $method<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                ValueDeserializer::new(self.parse_value()?).$method($($arg,)* visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    forward_parsed_value! {
        deserialize_any()
        deserialize_bool()
        deserialize_i8()
        deserialize_i16()
        deserialize_i32()
        deserialize_i64()
        deserialize_u8()
        deserialize_u16()
        deserialize_u32()
        deserialize_u64()
        deserialize_f32()
        deserialize_f64()
        deserialize_char()
        deserialize_str()
        deserialize_string()
        deserialize_bytes()
        deserialize_byte_buf()
        deserialize_option()
        deserialize_unit()
        deserialize_unit_struct(name: &'static str)
        deserialize_newtype_struct(name: &'static str)
        deserialize_seq()
        deserialize_tuple(len: usize)
        deserialize_tuple_struct(name: &'static str, len: usize)
        deserialize_map()
        deserialize_struct(name: &'static str, fields: &'static [&'static str])
        deserialize_enum(name: &'static str, variants: &'static [&'static str])
        deserialize_identifier()
        deserialize_ignored_any()
    }
}

fn unexpected(value: &LuaValue) -> Unexpected<'_> {
    match value {
        LuaValue::Nil => Unexpected::Unit,
        LuaValue::Boolean(b) => Unexpected::Bool(*b),
        LuaValue::Number(Number::Integer(i)) => Unexpected::Signed(*i),
        LuaValue::Number(Number::Float(f)) => Unexpected::Float(*f),
        LuaValue::String(s) => Unexpected::Str(s),
        LuaValue::Array(_) => Unexpected::Seq,
        LuaValue::Table(_) | LuaValue::Object(_) => Unexpected::Map,
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<LuaValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<LuaValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Map access over entries with arbitrary keys.
struct TableDeserializer {
    iter: std::vec::IntoIter<(LuaValue, LuaValue)>,
    value: Option<LuaValue>,
}

impl TableDeserializer {
    fn new(entries: Vec<(LuaValue, LuaValue)>) -> Self {
        TableDeserializer {
            iter: entries.into_iter(),
            value: None,
        }
    }

    /// An array read as a map keyed by position.
    fn from_array(items: Vec<LuaValue>) -> Self {
        Self::new(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (LuaValue::from(index as i64 + 1), item))
                .collect(),
        )
    }
}

impl<'de> de::MapAccess<'de> for TableDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, LuaValue>,
    value: Option<LuaValue>,
}

impl MapDeserializer {
    fn new(map: LuaMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(LuaValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: LuaValue,
    value: Option<LuaValue>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(self.variant))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<LuaValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(LuaValue::Nil) | None => Ok(()),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_seq(ValueDeserializer::new(value), visitor),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_map(ValueDeserializer::new(value), visitor),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}

/// Deserializes any `T: Deserialize` from a [`LuaValue`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_luadata::{lua, ValueDeserializer};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// enum Shape { Dot, Circle(f64) }
///
/// let shape = Shape::deserialize(ValueDeserializer::new(lua!({ "Circle": 1.5 }))).unwrap();
/// assert_eq!(shape, Shape::Circle(1.5));
///
/// let dot = Shape::deserialize(ValueDeserializer::new(lua!("Dot"))).unwrap();
/// assert_eq!(dot, Shape::Dot);
/// ```
pub struct ValueDeserializer {
    value: LuaValue,
}

impl ValueDeserializer {
    pub fn new(value: LuaValue) -> Self {
        ValueDeserializer { value }
    }

    fn integer(&self, visitor: &dyn de::Expected) -> Result<i64> {
        self.value
            .as_i64()
            .ok_or_else(|| de::Error::invalid_type(unexpected(&self.value), visitor))
    }
}

macro_rules! deserialize_integer {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let i = self.integer(&visitor)?;
                visitor.visit_i64(i)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::Nil => visitor.visit_unit(),
            LuaValue::Boolean(b) => visitor.visit_bool(b),
            LuaValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            LuaValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            LuaValue::String(s) => visitor.visit_string(s),
            LuaValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            LuaValue::Table(table) => {
                visitor.visit_map(TableDeserializer::new(table.into_iter().collect()))
            }
            LuaValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::Boolean(b) => visitor.visit_bool(b),
            other => Err(de::Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    deserialize_integer! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // Values above i64::MAX are stored as floats.
        match self.value {
            LuaValue::Number(Number::Float(f))
                if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 =>
            {
                visitor.visit_u64(f as u64)
            }
            _ => {
                let i = self.integer(&visitor)?;
                visitor.visit_i64(i)
            }
        }
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::Number(n) => visitor.visit_f64(n.as_f64()),
            other => Err(de::Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let LuaValue::String(s) = &self.value {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return visitor.visit_char(c);
            }
        }
        Err(de::Error::invalid_type(unexpected(&self.value), &visitor))
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::String(s) => visitor.visit_string(s),
            other => Err(de::Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::String(s) => visitor.visit_byte_buf(s.into_bytes()),
            other => ValueDeserializer::new(other).deserialize_seq(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_nil() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::Nil => visitor.visit_unit(),
            other => Err(de::Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(de::Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::Array(arr) => visitor.visit_map(TableDeserializer::from_array(arr)),
            LuaValue::Table(table) => {
                visitor.visit_map(TableDeserializer::new(table.into_iter().collect()))
            }
            LuaValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => Err(de::Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            // `{}` reads back as an empty array.
            LuaValue::Array(arr) if arr.is_empty() => {
                visitor.visit_map(TableDeserializer::new(Vec::new()))
            }
            value @ (LuaValue::Table(_) | LuaValue::Object(_)) => {
                ValueDeserializer::new(value).deserialize_map(visitor)
            }
            other => Err(de::Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant: LuaValue::String(variant),
                value: None,
            }),
            LuaValue::Object(obj) if obj.len() == 1 => {
                let (variant, value) = obj
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::custom("enum record lost its entry"))?;
                visitor.visit_enum(EnumDeserializer {
                    variant: LuaValue::String(variant),
                    value: Some(value),
                })
            }
            LuaValue::Table(table) if table.len() == 1 => {
                let (variant, value) = table
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::custom("enum table lost its entry"))?;
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: Some(value),
                })
            }
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a string or a table with a single entry",
            )),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            LuaValue::String(s) => visitor.visit_string(s),
            LuaValue::Number(Number::Integer(i)) if i >= 0 => visitor.visit_u64(i as u64),
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

impl<'de> IntoDeserializer<'de, Error> for LuaValue {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> Self::Deserializer {
        ValueDeserializer::new(self)
    }
}
