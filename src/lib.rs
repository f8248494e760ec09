//! # serde_luadata
//!
//! A Serde-compatible codec for luadata: values written as Lua table
//! literals.
//!
//! ## What is luadata?
//!
//! luadata is the subset of Lua's table constructor syntax used to exchange
//! configuration and data with a Lua runtime without running an
//! interpreter:
//!
//! ```lua
//! {
//!   name = "Alice",
//!   tags = { "admin", "user" },
//!   [10] = true, -- any key type
//!   limit = math.huge,
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Deterministic output**: table keys are written in one canonical order
//! - **Array detection**: tables keyed `1..n` are read and written as arrays
//! - **Global references**: bare identifiers such as `math.pi` or
//!   `config["port"]` resolve against a caller-supplied [`Environment`]
//! - **Comments**: `--` and `--[[ ]]` comments are skipped
//! - **Positioned errors**: every parse error names the byte offset, a snippet
//!   of the input and a caret under the failing byte
//! - **No recursion in the parser**: nesting is tracked on an explicit stack
//!   with a configurable limit
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_luadata::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, r#"{id=123,name="Alice",active=true}"#);
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Working with Values
//!
//! ```rust
//! use serde_luadata::{lua, serialize, unserialize, LuaValue, SerializeOptions, UnserializeOptions};
//!
//! let value = unserialize("{1, 2, x = 'y'}", &UnserializeOptions::new()).unwrap();
//! assert_eq!(value.get(&LuaValue::from("x")), Some(&LuaValue::from("y")));
//! assert_eq!(value, lua!({ 1: 1, 2: 2, "x": "y" }));
//!
//! assert_eq!(serialize(&value, &SerializeOptions::new()), r#"{1,2,x="y"}"#);
//! ```
//!
//! ### Errors
//!
//! ```rust
//! use serde_luadata::{unserialize, UnserializeOptions};
//!
//! let err = unserialize("\"str", &UnserializeOptions::new()).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Unserialize luadata failed on pos 4:\n    \"str\n        ^\n    unexpected string ending: missing close quote."
//! );
//! ```

pub mod de;
pub mod error;
pub mod global;
pub mod macros;
pub mod map;
pub mod options;
mod parser;
pub mod ser;
pub mod table;
pub mod value;

pub use de::{Deserializer, ValueDeserializer};
pub use error::{Error, ErrorKind, Result};
pub use global::Environment;
pub use map::LuaMap;
pub use options::{DictType, SerializeOptions, UnserializeOptions, DEFAULT_MAX_DEPTH};
pub use ser::{LuaValueSerializer, Serializer};
pub use table::LuaTable;
pub use value::{LuaValue, Number};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Renders a value as luadata text.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{lua, serialize, SerializeOptions};
///
/// let value = lua!({ "a": 1, "b c": [true, nil] });
/// assert_eq!(serialize(&value, &SerializeOptions::new()), r#"{a=1,["b c"]={true,nil}}"#);
/// ```
#[must_use]
pub fn serialize(value: &LuaValue, options: &SerializeOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_value(value);
    serializer.into_inner()
}

/// Parses luadata text into a value.
///
/// Returns the first top-level value, or every top-level value as an
/// [`LuaValue::Array`] when `options.tuple` is set.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{lua, unserialize, UnserializeOptions};
///
/// let options = UnserializeOptions::new();
/// assert_eq!(unserialize("1,2,3", &options).unwrap(), lua!(1));
///
/// let options = UnserializeOptions::new().with_tuple(true);
/// assert_eq!(unserialize("1,2,3", &options).unwrap(), lua!([1, 2, 3]));
/// ```
///
/// # Errors
///
/// Returns [`Error::Unserialize`] for malformed input, unresolved globals
/// and inputs nested deeper than `options.max_depth`.
pub fn unserialize(input: &str, options: &UnserializeOptions) -> Result<LuaValue> {
    let mut values = unserialize_tuple(input, options)?;
    if options.tuple {
        return Ok(LuaValue::Array(values));
    }
    if values.is_empty() {
        return Err(Error::unserialize(
            input,
            input.len(),
            ErrorKind::NothingToUnserialize,
        ));
    }
    Ok(values.swap_remove(0))
}

/// Parses every top-level value, ignoring `options.tuple`.
///
/// # Errors
///
/// Same as [`unserialize`].
pub fn unserialize_tuple(input: &str, options: &UnserializeOptions) -> Result<Vec<LuaValue>> {
    parser::Parser::new(input, options).parse()
}

/// Serialize any `T: Serialize` to a compact luadata string.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "{x=1,y=2}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, SerializeOptions::default())
}

/// Serialize any `T: Serialize` to luadata indented with two spaces.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::to_string_pretty;
///
/// assert_eq!(to_string_pretty(&vec![1, 2]).unwrap(), "{\n  1,\n  2,\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, SerializeOptions::pretty())
}

/// Serialize any `T: Serialize` to luadata with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{to_string_with_options, SerializeOptions};
///
/// let options = SerializeOptions::new().with_tuple(true);
/// assert_eq!(to_string_with_options(&("a", 1), options).unwrap(), r#""a",1"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: SerializeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`LuaValue`].
///
/// # Examples
///
/// ```rust
/// use serde_luadata::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<LuaValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(LuaValueSerializer)
}

/// Serialize any `T: Serialize` to a writer as compact luadata.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
/// assert_eq!(buffer, br#"{"a","b"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, SerializeOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: SerializeOptions,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from luadata text.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{ x = 1, y = 2 } -- origin offset").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid luadata or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from luadata text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{from_str_with_options, Environment, LuaValue, UnserializeOptions};
///
/// let mut env = Environment::new();
/// env.insert("PORT", LuaValue::from(8080));
/// let options = UnserializeOptions::new().with_global(env).with_tuple(true);
///
/// let values: (u16, String) = from_str_with_options("PORT, 'localhost'", options).unwrap();
/// assert_eq!(values, (8080, "localhost".to_string()));
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid luadata or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'a, T>(s: &'a str, options: UnserializeOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::with_options(s, options);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of luadata.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::from_reader;
/// use std::io::Cursor;
///
/// let numbers: Vec<i32> = from_reader(Cursor::new(b"{1,2,3}")).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// luadata, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of luadata text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid luadata, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from a [`LuaValue`].
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{from_value, lua};
/// use std::collections::BTreeMap;
///
/// let map: BTreeMap<String, i32> = from_value(lua!({ "a": 1, "b": 2 })).unwrap();
/// assert_eq!(map["b"], 2);
/// ```
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: LuaValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&user()).unwrap();
        assert_eq!(
            text,
            r#"{id=123,name="Alice",active=true,tags={"admin","user"}}"#
        );
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let text = to_string_pretty(&user()).unwrap();
        assert!(text.contains("\n  name = \"Alice\",\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();

        match value {
            LuaValue::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&LuaValue::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&LuaValue::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "{1,2,3,4,5}");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_custom_options() {
        let options = SerializeOptions::new().with_indent("\t").with_indent_level(1);
        let text = to_string_with_options(&Point { x: 1, y: 2 }, options).unwrap();
        assert_eq!(text, "{\n\t\tx = 1,\n\t\ty = 2,\n\t}");
        let point: Point = from_str(&text).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_unserialize_first_and_tuple() {
        let options = UnserializeOptions::new();
        assert_eq!(unserialize("1,2", &options).unwrap(), LuaValue::from(1));
        assert_eq!(unserialize_tuple("1,2", &options).unwrap().len(), 2);
    }

    #[test]
    fn test_from_value_round_trip() {
        let value = to_value(&user()).unwrap();
        let back: User = from_value(value).unwrap();
        assert_eq!(back, user());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<i32>(&[0xff]).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }
}
