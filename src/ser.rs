//! luadata serialization.
//!
//! This module provides the text [`Serializer`], which renders a [`LuaValue`]
//! as a Lua table literal, and [`LuaValueSerializer`], which converts any
//! `T: Serialize` into a [`LuaValue`].
//!
//! ## Layout
//!
//! - Tables whose keys run `1, 2, 3, ...` are written without keys: `{1,2,3}`
//! - Other keys are written `name=value` when the key is an identifier and
//!   `[key]=value` otherwise
//! - Table keys come out in canonical order, record fields in insertion order
//! - Compact output has no spaces and no trailing comma. Indented output puts
//!   every entry on its own line, each followed by a comma
//!
//! ## Usage
//!
//! ```rust
//! use serde_luadata::{to_string, to_string_pretty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, tags: Vec<&'static str> }
//!
//! let data = Data { x: 1, tags: vec!["a", "b"] };
//! assert_eq!(to_string(&data).unwrap(), r#"{x=1,tags={"a","b"}}"#);
//! assert_eq!(
//!     to_string_pretty(&data).unwrap(),
//!     "{\n  x = 1,\n  tags = {\n    \"a\",\n    \"b\",\n  },\n}"
//! );
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_luadata::{lua, Serializer, SerializeOptions};
//!
//! let mut serializer = Serializer::new(SerializeOptions::new());
//! serializer.serialize_value(&lua!({ "a": 1, "b c": nil }));
//! assert_eq!(serializer.into_inner(), r#"{a=1,["b c"]=nil}"#);
//! ```

use crate::{Error, LuaMap, LuaTable, LuaValue, Number, Result, SerializeOptions};
use serde::{ser, Serialize};

/// The luadata text serializer.
///
/// Writes values with [`Serializer::serialize_value`], or through serde by
/// serializing into `&mut Serializer`.
pub struct Serializer {
    output: String,
    options: SerializeOptions,
}

/// A table key as it is written.
enum Key<'v> {
    /// Position in an array, starting at 1.
    Index(usize),
    Value(&'v LuaValue),
    Name(&'v str),
}

impl Key<'_> {
    fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(index) => Some(*index as i64),
            Key::Value(value) => value.as_i64(),
            Key::Name(_) => None,
        }
    }

    fn as_identifier(&self) -> Option<&str> {
        let name = match self {
            Key::Value(LuaValue::String(name)) => name.as_str(),
            Key::Name(name) => *name,
            _ => return None,
        };
        is_identifier(name).then_some(name)
    }
}

/// Whether `s` can be written as a bare table key.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the literal text of `value`.
    ///
    /// With tuple mode on, a top-level array is written as its elements
    /// joined by commas instead of as one table.
    pub fn serialize_value(&mut self, value: &LuaValue) {
        let level = self.options.indent_level;
        match value {
            LuaValue::Array(items) if self.options.tuple => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                        if let Some(indent) = &self.options.indent {
                            self.output.push('\n');
                            self.output.push_str(&indent.repeat(level));
                        }
                    }
                    self.write_value(item, level);
                }
            }
            _ => self.write_value(value, level),
        }
    }

    fn write_value(&mut self, value: &LuaValue, level: usize) {
        match value {
            LuaValue::Nil => self.output.push_str("nil"),
            LuaValue::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            LuaValue::Number(n) => self.output.push_str(&n.to_string()),
            LuaValue::String(s) => self.write_string(s),
            LuaValue::Array(items) => self.write_table(
                items.iter().enumerate().map(|(i, v)| (Key::Index(i + 1), v)),
                level,
            ),
            LuaValue::Table(table) => {
                self.write_table(table.iter().map(|(k, v)| (Key::Value(k), v)), level)
            }
            LuaValue::Object(map) => {
                self.write_table(map.iter().map(|(k, v)| (Key::Name(k.as_str()), v)), level)
            }
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '\\' => self.output.push_str("\\\\"),
                '"' => self.output.push_str("\\\""),
                '\n' => self.output.push_str("\\\n"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    fn write_table<'v, I>(&mut self, entries: I, level: usize)
    where
        I: Iterator<Item = (Key<'v>, &'v LuaValue)>,
    {
        let indent = self.options.indent.clone();
        let equals = if indent.is_some() { " = " } else { "=" };

        self.output.push('{');
        let mut no_hash = true;
        let mut last_index = 0;
        let mut empty = true;
        for (key, value) in entries {
            if empty {
                if indent.is_some() {
                    self.output.push('\n');
                }
                empty = false;
            } else if indent.is_none() {
                self.output.push(',');
            }

            if no_hash {
                match key.as_index() {
                    Some(index) if index == last_index + 1 => last_index = index,
                    _ => no_hash = false,
                }
            }

            if let Some(indent) = &indent {
                self.output.push_str(&indent.repeat(level + 1));
            }
            if !no_hash {
                if let Some(name) = key.as_identifier() {
                    self.output.push_str(name);
                } else {
                    self.output.push('[');
                    match key {
                        Key::Index(index) => self.output.push_str(&index.to_string()),
                        Key::Value(key) => self.write_value(key, level + 1),
                        Key::Name(name) => self.write_string(name),
                    }
                    self.output.push(']');
                }
                self.output.push_str(equals);
            }
            self.write_value(value, level + 1);
            if indent.is_some() {
                self.output.push_str(",\n");
            }
        }

        if let (Some(indent), false) = (&indent, empty) {
            self.output.push_str(&indent.repeat(level));
        }
        self.output.push('}');
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a, SerializeVec>;
    type SerializeTuple = Compound<'a, SerializeVec>;
    type SerializeTupleStruct = Compound<'a, SerializeVec>;
    type SerializeTupleVariant = Compound<'a, SerializeTupleVariant>;
    type SerializeMap = Compound<'a, SerializeMap>;
    type SerializeStruct = Compound<'a, SerializeStruct>;
    type SerializeStructVariant = Compound<'a, SerializeStructVariant>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        let value = LuaValueSerializer.serialize_u64(v)?;
        self.serialize_value(&value);
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.output.push_str(&Number::Float(v).to_string());
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.write_string(v.encode_utf8(&mut [0; 4]));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write_string(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        let value = LuaValueSerializer.serialize_bytes(v)?;
        self.serialize_value(&value);
        Ok(())
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str("nil");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        let value =
            LuaValueSerializer.serialize_newtype_variant(name, variant_index, variant, value)?;
        self.serialize_value(&value);
        Ok(())
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(Compound {
            inner: LuaValueSerializer.serialize_seq(len)?,
            ser: self,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(Compound {
            inner: LuaValueSerializer.serialize_tuple_variant(name, variant_index, variant, len)?,
            ser: self,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(Compound {
            inner: LuaValueSerializer.serialize_map(len)?,
            ser: self,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(Compound {
            inner: LuaValueSerializer.serialize_struct(name, len)?,
            ser: self,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(Compound {
            inner: LuaValueSerializer.serialize_struct_variant(name, variant_index, variant, len)?,
            ser: self,
        })
    }
}

/// Collects a compound value, then writes it once complete.
///
/// The collected value decides the layout, so the whole compound is built
/// before any of it is written.
pub struct Compound<'a, C> {
    ser: &'a mut Serializer,
    inner: C,
}

impl<'a, C> ser::SerializeSeq for Compound<'a, C>
where
    C: ser::SerializeSeq<Ok = LuaValue, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_element(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.serialize_value(&value);
        Ok(())
    }
}

impl<'a, C> ser::SerializeTuple for Compound<'a, C>
where
    C: ser::SerializeTuple<Ok = LuaValue, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_element(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.serialize_value(&value);
        Ok(())
    }
}

impl<'a, C> ser::SerializeTupleStruct for Compound<'a, C>
where
    C: ser::SerializeTupleStruct<Ok = LuaValue, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.serialize_value(&value);
        Ok(())
    }
}

impl<'a, C> ser::SerializeTupleVariant for Compound<'a, C>
where
    C: ser::SerializeTupleVariant<Ok = LuaValue, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.serialize_value(&value);
        Ok(())
    }
}

impl<'a, C> ser::SerializeMap for Compound<'a, C>
where
    C: ser::SerializeMap<Ok = LuaValue, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_key(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_value(value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.serialize_value(&value);
        Ok(())
    }
}

impl<'a, C> ser::SerializeStruct for Compound<'a, C>
where
    C: ser::SerializeStruct<Ok = LuaValue, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(key, value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.serialize_value(&value);
        Ok(())
    }
}

impl<'a, C> ser::SerializeStructVariant for Compound<'a, C>
where
    C: ser::SerializeStructVariant<Ok = LuaValue, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.serialize_field(key, value)
    }

    fn end(self) -> Result<()> {
        let value = self.inner.end()?;
        self.ser.serialize_value(&value);
        Ok(())
    }
}

/// Converts any `T: Serialize` into a [`LuaValue`].
///
/// Sequences become arrays, maps become tables, structs become records and
/// enum variants carrying data become one-field records keyed by the variant
/// name.
pub struct LuaValueSerializer;

pub struct SerializeVec {
    vec: Vec<LuaValue>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<LuaValue>,
}

pub struct SerializeMap {
    table: LuaTable,
    current_key: Option<LuaValue>,
}

pub struct SerializeStruct {
    map: LuaMap,
}

pub struct SerializeStructVariant {
    name: String,
    map: LuaMap,
}

fn variant_record(name: String, value: LuaValue) -> LuaValue {
    let mut record = LuaMap::with_capacity(1);
    record.insert(name, value);
    LuaValue::Object(record)
}

impl ser::Serializer for LuaValueSerializer {
    type Ok = LuaValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<LuaValue> {
        Ok(LuaValue::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<LuaValue> {
        match i64::try_from(v) {
            Ok(i) => Ok(LuaValue::Number(Number::Integer(i))),
            Err(_) => Ok(LuaValue::Number(Number::Float(v as f64))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<LuaValue> {
        Ok(LuaValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<LuaValue> {
        Ok(LuaValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<LuaValue> {
        Ok(LuaValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<LuaValue> {
        Ok(LuaValue::Array(v.iter().map(|&b| LuaValue::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<LuaValue> {
        Ok(LuaValue::Nil)
    }

    fn serialize_some<T>(self, value: &T) -> Result<LuaValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<LuaValue> {
        Ok(LuaValue::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<LuaValue> {
        Ok(LuaValue::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<LuaValue> {
        Ok(LuaValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<LuaValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<LuaValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(variant_record(variant.to_string(), to_lua_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_string(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            table: LuaTable::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeStruct> {
        Ok(SerializeStruct {
            map: LuaMap::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_string(),
            map: LuaMap::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = LuaValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_lua_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<LuaValue> {
        Ok(LuaValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = LuaValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<LuaValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = LuaValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<LuaValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = LuaValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_lua_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<LuaValue> {
        Ok(variant_record(self.name, LuaValue::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = LuaValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_lua_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.table.insert(key, to_lua_value(value)?);
        Ok(())
    }

    /// Maps keyed `1..n` become arrays, as they would when read back.
    fn end(self) -> Result<LuaValue> {
        Ok(self.table.into_value())
    }
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = LuaValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_lua_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<LuaValue> {
        Ok(LuaValue::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = LuaValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_lua_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<LuaValue> {
        Ok(variant_record(self.name, LuaValue::Object(self.map)))
    }
}

fn to_lua_value<T: Serialize + ?Sized>(value: &T) -> Result<LuaValue> {
    value.serialize(LuaValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua;

    fn compact(value: &LuaValue) -> String {
        let mut serializer = Serializer::new(SerializeOptions::new());
        serializer.serialize_value(value);
        serializer.into_inner()
    }

    fn pretty(value: &LuaValue, level: usize) -> String {
        let mut serializer =
            Serializer::new(SerializeOptions::pretty().with_indent_level(level));
        serializer.serialize_value(value);
        serializer.into_inner()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(compact(&LuaValue::Nil), "nil");
        assert_eq!(compact(&LuaValue::Boolean(false)), "false");
        assert_eq!(compact(&LuaValue::from(0.1)), "0.1");
        assert_eq!(compact(&LuaValue::from(100)), "100");
        assert_eq!(compact(&LuaValue::from("str")), "\"str\"");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            compact(&LuaValue::from("a\\b\"c\nd")),
            "\"a\\\\b\\\"c\\\nd\""
        );
        assert_eq!(compact(&LuaValue::from("tab\there")), "\"tab\there\"");
    }

    #[test]
    fn test_arrays() {
        assert_eq!(compact(&lua!([])), "{}");
        assert_eq!(pretty(&lua!([]), 0), "{}");
        assert_eq!(compact(&lua!([1, 0.2, "3", true])), r#"{1,0.2,"3",true}"#);
        assert_eq!(compact(&lua!([1, 2, "3", [4]])), r#"{1,2,"3",{4}}"#);
        assert_eq!(
            pretty(&lua!([1, 2, "3", [4]]), 0),
            "{\n  1,\n  2,\n  \"3\",\n  {\n    4,\n  },\n}"
        );
    }

    #[test]
    fn test_record_keys() {
        let mut record = LuaMap::new();
        record.insert("a".to_string(), LuaValue::from(1));
        record.insert("3".to_string(), LuaValue::from("3"));
        let record = LuaValue::Object(record);

        assert_eq!(compact(&record), r#"{a=1,["3"]="3"}"#);
        assert_eq!(pretty(&record, 0), "{\n  a = 1,\n  [\"3\"] = \"3\",\n}");
        assert_eq!(
            pretty(&record, 1),
            "{\n    a = 1,\n    [\"3\"] = \"3\",\n  }"
        );
    }

    #[test]
    fn test_table_keys() {
        let table: LuaTable = vec![
            (LuaValue::from(1), LuaValue::from(1)),
            (LuaValue::from(2), LuaValue::from(2)),
            (LuaValue::from("3"), LuaValue::from("3")),
        ]
        .into_iter()
        .collect();
        assert_eq!(compact(&LuaValue::Table(table)), r#"{1,2,["3"]="3"}"#);

        let sparse: LuaTable = vec![
            (LuaValue::from(1), LuaValue::from("a")),
            (LuaValue::from(3), LuaValue::from("c")),
            (LuaValue::Boolean(true), LuaValue::from("t")),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            compact(&LuaValue::Table(sparse)),
            r#"{"a",[3]="c",[true]="t"}"#
        );
    }

    #[test]
    fn test_table_key_not_starting_at_one() {
        let table: LuaTable = vec![(LuaValue::from(2), LuaValue::from("b"))]
            .into_iter()
            .collect();
        assert_eq!(compact(&LuaValue::Table(table)), r#"{[2]="b"}"#);
    }

    #[test]
    fn test_nested_key_is_indented_one_level_deeper() {
        let table: LuaTable = vec![(lua!([1]), LuaValue::from(true))]
            .into_iter()
            .collect();
        assert_eq!(
            pretty(&LuaValue::Table(table), 0),
            "{\n  [{\n    1,\n  }] = true,\n}"
        );
    }

    #[test]
    fn test_tuple() {
        let value = lua!([1, 2, { "a": 1 }]);
        let mut serializer = Serializer::new(SerializeOptions::new().with_tuple(true));
        serializer.serialize_value(&value);
        assert_eq!(serializer.into_inner(), "1,2,{a=1}");

        let mut serializer = Serializer::new(SerializeOptions::pretty().with_tuple(true));
        serializer.serialize_value(&value);
        assert_eq!(serializer.into_inner(), "1,\n2,\n{\n  a = 1,\n}");
    }

    #[test]
    fn test_tuple_ignores_non_arrays() {
        let mut serializer = Serializer::new(SerializeOptions::new().with_tuple(true));
        serializer.serialize_value(&LuaValue::from(1));
        assert_eq!(serializer.into_inner(), "1");
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("_a1"));
        assert!(is_identifier("end"));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("é"));
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect(u32, u32),
        Named { label: String },
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_lua_value(&Shape::Empty).unwrap(), LuaValue::from("Empty"));
        assert_eq!(
            compact(&to_lua_value(&Shape::Circle(1.5)).unwrap()),
            "{Circle=1.5}"
        );
        assert_eq!(
            compact(&to_lua_value(&Shape::Rect(2, 3)).unwrap()),
            "{Rect={2,3}}"
        );
        assert_eq!(
            compact(
                &to_lua_value(&Shape::Named {
                    label: "x".to_string()
                })
                .unwrap()
            ),
            r#"{Named={label="x"}}"#
        );
    }

    #[test]
    fn test_serde_path_matches_value_path() {
        let shapes = vec![Shape::Circle(2.0), Shape::Empty];
        let mut serializer = Serializer::new(SerializeOptions::new());
        shapes.serialize(&mut serializer).unwrap();
        assert_eq!(serializer.into_inner(), r#"{{Circle=2},"Empty"}"#);
    }

    #[test]
    fn test_u64_above_i64_is_float() {
        let value = to_lua_value(&u64::MAX).unwrap();
        assert!(matches!(value, LuaValue::Number(Number::Float(_))));
    }
}
