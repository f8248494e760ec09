//! Configuration options for serializing and unserializing luadata.
//!
//! - [`SerializeOptions`]: output layout (compact or indented, tuple mode)
//! - [`UnserializeOptions`]: parser behavior (tuple mode, table shape,
//!   global environment, nesting limit)
//! - [`DictType`]: the shape non-array tables take when read
//!
//! ## Examples
//!
//! ```rust
//! use serde_luadata::{serialize, lua, SerializeOptions};
//!
//! let value = lua!([1, 2, { "a": 1 }]);
//!
//! let options = SerializeOptions::new().with_tuple(true);
//! assert_eq!(serialize(&value, &options), "1,2,{a=1}");
//!
//! let options = SerializeOptions::pretty().with_tuple(true);
//! assert_eq!(serialize(&value, &options), "1,\n2,\n{\n  a = 1,\n}");
//! ```

use crate::Environment;

/// Output layout for [`serialize`](crate::serialize).
///
/// # Examples
///
/// ```rust
/// use serde_luadata::SerializeOptions;
///
/// let compact = SerializeOptions::new();
/// assert!(compact.indent.is_none());
///
/// let pretty = SerializeOptions::pretty().with_indent_level(1);
/// assert_eq!(pretty.indent.as_deref(), Some("  "));
/// assert_eq!(pretty.indent_level, 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Write a top-level array as comma separated values instead of one table.
    pub tuple: bool,
    /// Indent unit for pretty output. `None` writes everything on one line.
    pub indent: Option<String>,
    /// Nesting depth the output starts at, for embedding in larger text.
    pub indent_level: usize,
}

impl SerializeOptions {
    /// Compact output, no tuple mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty output indented with two spaces per level.
    #[must_use]
    pub fn pretty() -> Self {
        SerializeOptions {
            indent: Some("  ".to_string()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    #[must_use]
    pub fn with_indent_level(mut self, indent_level: usize) -> Self {
        self.indent_level = indent_level;
        self
    }

    #[must_use]
    pub fn with_tuple(mut self, tuple: bool) -> Self {
        self.tuple = tuple;
        self
    }
}

/// The container a non-array table is read into.
///
/// # Examples
///
/// ```rust
/// use serde_luadata::{unserialize, DictType, UnserializeOptions};
///
/// let text = "{[1]=true,[3]=false}";
///
/// let map = unserialize(text, &UnserializeOptions::new()).unwrap();
/// assert!(map.is_table());
///
/// let options = UnserializeOptions::new().with_dict_type(DictType::Object);
/// let record = unserialize(text, &options).unwrap();
/// assert!(record.is_object());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DictType {
    /// [`LuaValue::Table`](crate::LuaValue::Table), key types preserved.
    #[default]
    Map,
    /// [`LuaValue::Object`](crate::LuaValue::Object), keys converted to strings.
    Object,
}

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parser behavior for [`unserialize`](crate::unserialize).
#[derive(Clone, Debug, PartialEq)]
pub struct UnserializeOptions {
    /// Return every top-level value as an array instead of only the first.
    pub tuple: bool,
    /// Log every automaton step at debug level.
    pub verbose: bool,
    pub dict_type: DictType,
    /// Bindings available to bare identifiers.
    pub global: Environment,
    /// Fail on top-level identifiers missing from `global`.
    pub strict_global: bool,
    /// Read bare words as references into `global`. When off, only the
    /// literals `true`, `false` and `nil` are accepted.
    pub resolve_globals: bool,
    /// Maximum number of tables and key expressions open at once.
    pub max_depth: usize,
}

impl Default for UnserializeOptions {
    fn default() -> Self {
        UnserializeOptions {
            tuple: false,
            verbose: false,
            dict_type: DictType::default(),
            global: Environment::new(),
            strict_global: true,
            resolve_globals: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl UnserializeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tuple(mut self, tuple: bool) -> Self {
        self.tuple = tuple;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_dict_type(mut self, dict_type: DictType) -> Self {
        self.dict_type = dict_type;
        self
    }

    #[must_use]
    pub fn with_global(mut self, global: Environment) -> Self {
        self.global = global;
        self
    }

    #[must_use]
    pub fn with_strict_global(mut self, strict_global: bool) -> Self {
        self.strict_global = strict_global;
        self
    }

    #[must_use]
    pub fn with_resolve_globals(mut self, resolve_globals: bool) -> Self {
        self.resolve_globals = resolve_globals;
        self
    }

    /// Sets the nesting limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::{unserialize, ErrorKind, UnserializeOptions};
    ///
    /// let options = UnserializeOptions::new().with_max_depth(2);
    /// assert!(unserialize("{{}}", &options).is_ok());
    ///
    /// let err = unserialize("{{{}}}", &options).unwrap_err();
    /// assert_eq!(err.kind(), Some(&ErrorKind::TooDeeplyNested(2)));
    /// assert_eq!(err.position(), Some(2));
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
