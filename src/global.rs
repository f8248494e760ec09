//! Global environment for identifier resolution.
//!
//! When the parser meets a bare word where a value is expected, it reads a
//! reference such as `a`, `a.b` or `a["b"][1]` and resolves it against an
//! [`Environment`]. The environment is read-only for the whole parse.
//!
//! Every environment starts with a few bindings:
//!
//! - `true`, `false` and `nil`, which cannot be overridden
//! - a `math` table holding `pi`, `huge`, `maxinteger` and `mininteger`
//! - `_G`, the environment itself, unless the caller binds `_G`
//!
//! ## Examples
//!
//! ```rust
//! use serde_luadata::{lua, unserialize, Environment, LuaValue, UnserializeOptions};
//!
//! let mut env = Environment::new();
//! env.insert("config", lua!({ "port": 8080 }));
//!
//! let options = UnserializeOptions::new().with_global(env);
//! let value = unserialize("{ port = config.port }", &options).unwrap();
//! assert_eq!(value.get(&LuaValue::from("port")), Some(&LuaValue::from(8080)));
//! ```

use crate::{Error, LuaTable, LuaValue, Number, Result};

static TRUE: LuaValue = LuaValue::Boolean(true);
static FALSE: LuaValue = LuaValue::Boolean(false);
static NIL: LuaValue = LuaValue::Nil;

const GLOBAL_NAME: &str = "_G";

/// A read-only table of global bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    entries: LuaTable,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the built-in bindings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::{Environment, LuaValue};
    ///
    /// let env = Environment::new();
    /// assert!(env.get("math").is_some());
    /// assert_eq!(env.get("true"), Some(&LuaValue::Boolean(true)));
    /// assert_eq!(env.get("missing"), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let math: LuaTable = vec![
            (
                LuaValue::from("huge"),
                LuaValue::Number(Number::Float(f64::INFINITY)),
            ),
            (
                LuaValue::from("maxinteger"),
                LuaValue::Number(Number::Integer(i64::MAX)),
            ),
            (
                LuaValue::from("mininteger"),
                LuaValue::Number(Number::Integer(i64::MIN)),
            ),
            (
                LuaValue::from("pi"),
                LuaValue::Number(Number::Float(std::f64::consts::PI)),
            ),
        ]
        .into_iter()
        .collect();

        let mut entries = LuaTable::new();
        entries.insert(LuaValue::from("math"), LuaValue::Table(math));
        Environment { entries }
    }

    /// Builds an environment from a table value.
    ///
    /// Arrays bind their elements under the keys `1..n`, tables keep their
    /// keys as they are and records bind string keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvironment`] when `value` is not a table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::{lua, Environment, LuaValue};
    ///
    /// let env = Environment::from_value(lua!({ "a": 1 })).unwrap();
    /// assert_eq!(env.get("a"), Some(&LuaValue::from(1)));
    ///
    /// assert!(Environment::from_value(LuaValue::from(1)).is_err());
    /// ```
    pub fn from_value(value: LuaValue) -> Result<Self> {
        let mut env = Environment::new();
        match value {
            LuaValue::Array(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    env.entries.insert(LuaValue::from(index as i64 + 1), item);
                }
            }
            LuaValue::Table(table) => {
                for (key, item) in table {
                    env.entries.insert(key, item);
                }
            }
            LuaValue::Object(map) => {
                for (key, item) in map {
                    env.entries.insert(LuaValue::String(key), item);
                }
            }
            other => {
                return Err(Error::InvalidEnvironment(format!(
                    "expected a table, found {}",
                    other
                )))
            }
        }
        Ok(env)
    }

    /// Binds `name` to `value`, returning the previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: LuaValue) -> Option<LuaValue> {
        self.entries.insert(LuaValue::String(name.into()), value)
    }

    /// Looks up a top-level name.
    ///
    /// `true`, `false` and `nil` always resolve to their constants.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LuaValue> {
        match name {
            "true" => Some(&TRUE),
            "false" => Some(&FALSE),
            "nil" => Some(&NIL),
            _ => self.entries.get(&LuaValue::from(name)),
        }
    }

    /// Resolves a top-level name, including the implicit `_G` binding.
    pub(crate) fn lookup(&self, name: &str) -> Option<Cursor<'_>> {
        match self.get(name) {
            Some(value) => Some(Cursor::Value(value)),
            None if name == GLOBAL_NAME => Some(Cursor::Global),
            None => None,
        }
    }

    /// A snapshot of the user bindings as a table value.
    #[must_use]
    pub fn to_value(&self) -> LuaValue {
        LuaValue::Table(self.entries.clone())
    }
}

impl<K: Into<String>> FromIterator<(K, LuaValue)> for Environment {
    fn from_iter<T: IntoIterator<Item = (K, LuaValue)>>(iter: T) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.insert(name, value);
        }
        env
    }
}

/// Where a reference currently points while it is being resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Cursor<'a> {
    /// The environment itself, reached at the start or through `_G`.
    Global,
    Value(&'a LuaValue),
}

impl<'a> Cursor<'a> {
    pub(crate) fn is_indexable(&self) -> bool {
        match self {
            Cursor::Global => true,
            Cursor::Value(value) => value.is_indexable(),
        }
    }

    /// Indexes the cursor with `key`. Misses resolve to nil.
    pub(crate) fn index(self, env: &'a Environment, key: &LuaValue) -> Cursor<'a> {
        let found = match self {
            Cursor::Global => match key {
                LuaValue::String(name) => return env.lookup(name).unwrap_or(Cursor::Value(&NIL)),
                _ => env.entries.get(key),
            },
            Cursor::Value(value) => value.get(key),
        };
        Cursor::Value(found.unwrap_or(&NIL))
    }

    pub(crate) fn to_value(self, env: &Environment) -> LuaValue {
        match self {
            Cursor::Global => env.to_value(),
            Cursor::Value(value) => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_win_over_user_bindings() {
        let mut env = Environment::new();
        env.insert("true", LuaValue::from(0));
        assert_eq!(env.get("true"), Some(&LuaValue::Boolean(true)));
    }

    #[test]
    fn test_user_binding_shadows_math() {
        let mut env = Environment::new();
        env.insert("math", LuaValue::from(1));
        assert_eq!(env.get("math"), Some(&LuaValue::from(1)));
    }

    #[test]
    fn test_global_alias() {
        let env = Environment::new();
        let cursor = env.lookup("_G").unwrap();
        assert!(matches!(cursor, Cursor::Global));

        let math = cursor.index(&env, &LuaValue::from("math"));
        let pi = math.index(&env, &LuaValue::from("pi"));
        assert_eq!(pi.to_value(&env), LuaValue::from(std::f64::consts::PI));
    }

    #[test]
    fn test_bound_global_alias_is_plain_value() {
        let mut env = Environment::new();
        env.insert("_G", LuaValue::Array(vec![]));
        assert!(matches!(env.lookup("_G"), Some(Cursor::Value(_))));
    }

    #[test]
    fn test_index_miss_is_nil() {
        let env = Environment::new();
        let cursor = Cursor::Value(&TRUE);
        assert!(!cursor.is_indexable());

        let math = env.lookup("math").unwrap();
        let miss = math.index(&env, &LuaValue::from("tau"));
        assert!(miss.to_value(&env).is_nil());
        assert!(!miss.is_indexable());
    }

    #[test]
    fn test_from_array_binds_positions() {
        let env = Environment::from_value(LuaValue::Array(vec![LuaValue::from("x")])).unwrap();
        let first = Cursor::Global.index(&env, &LuaValue::from(1));
        assert_eq!(first.to_value(&env), LuaValue::from("x"));
    }

    #[test]
    fn test_from_scalar_is_rejected() {
        let err = Environment::from_value(LuaValue::from("x")).unwrap_err();
        assert!(matches!(err, Error::InvalidEnvironment(_)));
    }

    #[test]
    fn test_from_iterator() {
        let env: Environment = vec![("a", LuaValue::from(1)), ("b", LuaValue::from(2))]
            .into_iter()
            .collect();
        assert_eq!(env.get("b"), Some(&LuaValue::from(2)));
    }
}
