//! Error types for luadata serialization and unserialization.
//!
//! Parse failures carry a positioned diagnostic whose text is a fixed,
//! byte-for-byte format shared with other luadata implementations:
//!
//! ```text
//! Unserialize luadata failed on pos 4:
//!     "str
//!         ^
//!     unexpected string ending: missing close quote.
//! ```
//!
//! The first line names the byte offset of the failure. The second line is a
//! window of up to 4 bytes before and 10 bytes after that offset, with
//! newlines written as `\n`. The caret line points at the offset inside the
//! window and the last line is the human-readable cause.
//!
//! ## Examples
//!
//! ```rust
//! use serde_luadata::{unserialize, ErrorKind, UnserializeOptions};
//!
//! let err = unserialize("{1,,}", &UnserializeOptions::default()).unwrap_err();
//! assert_eq!(err.position(), Some(3));
//! assert_eq!(err.kind(), Some(&ErrorKind::UnexpectedEmptyValue));
//! ```

use std::fmt;
use thiserror::Error;

/// Bytes of context shown before the failing offset.
const SNIPPET_BEFORE: usize = 4;
/// Bytes of context shown after the failing offset.
const SNIPPET_AFTER: usize = 10;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed literal text, reported with its position and surrounding text.
    #[error("Unserialize luadata failed on pos {pos}:\n    {snippet}\n    {caret}^\n    {kind}.")]
    Unserialize {
        pos: usize,
        snippet: String,
        caret: String,
        kind: ErrorKind,
    },

    /// The value handed over as a global environment is not a table.
    #[error("Invalid global environment: {0}")]
    InvalidEnvironment(String),

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised through serde
    #[error("{0}")]
    Custom(String),
}

/// The cause of an unserialize failure.
///
/// The `Display` text is the last line of the diagnostic, without the
/// trailing period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unexpected character")]
    UnexpectedCharacter,

    #[error("unexpected character, \"]\" expected")]
    ExpectedCloseBracket,

    #[error("unexpected character, \"=\" expected")]
    ExpectedEquals,

    #[error("unexpected character, variable name expected")]
    ExpectedVariableName,

    #[error("unexpected empty value")]
    UnexpectedEmptyValue,

    #[error("unexpected dot")]
    UnexpectedDot,

    #[error("malformed number")]
    MalformedNumber,

    #[error("unexpected string ending: missing close quote")]
    UnterminatedString,

    #[error("unexpected end of table, \"}}\" expected")]
    UnterminatedTable,

    #[error("unexpected end of table key expression, \"]\" expected")]
    UnterminatedKeyExpression,

    #[error("unexpected end of multiline comment, \"]]\" expected")]
    UnterminatedComment,

    #[error("attempt to refer a non-exists global variable")]
    UndefinedGlobal,

    #[error("attempt to index a non-table value")]
    IndexNonTable,

    #[error("nothing can be unserialized from input string")]
    NothingToUnserialize,

    #[error("too deeply nested, nesting limit of {0} exceeded")]
    TooDeeplyNested(usize),

    /// An invariant of the parsing automaton was broken.
    #[error("{0}, this should never occur")]
    Internal(&'static str),
}

impl Error {
    /// Builds the positioned diagnostic for a failure at byte offset `pos` of `input`.
    ///
    /// Offsets past the end are clamped to the input length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::{Error, ErrorKind};
    ///
    /// let err = Error::unserialize("1..", 2, ErrorKind::UnexpectedCharacter);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Unserialize luadata failed on pos 2:\n    1..\n      ^\n    unexpected character."
    /// );
    /// ```
    pub fn unserialize(input: &str, pos: usize, kind: ErrorKind) -> Self {
        let pos = floor_boundary(input, pos.min(input.len()));
        let start = floor_boundary(input, pos.saturating_sub(SNIPPET_BEFORE));
        let end = ceil_boundary(input, (pos + SNIPPET_AFTER).min(input.len()));

        Error::Unserialize {
            pos,
            snippet: input[start..end].replace('\n', "\\n"),
            caret: " ".repeat(input[start..pos].chars().count()),
            kind,
        }
    }

    /// Creates an unsupported type error for values that have no luadata form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_luadata::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The byte offset of an unserialize failure.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Unserialize { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// The cause of an unserialize failure.
    #[must_use]
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Error::Unserialize { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

fn floor_boundary(input: &str, mut index: usize) -> usize {
    while !input.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_boundary(input: &str, mut index: usize) -> usize {
    while !input.is_char_boundary(index) {
        index += 1;
    }
    index
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format() {
        let err = Error::unserialize("\"str", 4, ErrorKind::UnterminatedString);
        assert_eq!(
            err.to_string(),
            "Unserialize luadata failed on pos 4:\n    \"str\n        ^\n    unexpected string ending: missing close quote."
        );
    }

    #[test]
    fn test_report_window_is_clipped() {
        let input = "{1,2,[\"3\"]=\"3\",a=1,b=2,c=3}";
        let err = Error::unserialize(input, 8, ErrorKind::UnexpectedCharacter);
        match err {
            Error::Unserialize { snippet, caret, .. } => {
                assert_eq!(snippet, ",[\"3\"]=\"3\",a=1");
                assert_eq!(caret, "    ");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_report_escapes_every_newline() {
        let err = Error::unserialize("a\nb\nc", 2, ErrorKind::UnexpectedCharacter);
        match err {
            Error::Unserialize { snippet, caret, .. } => {
                assert_eq!(snippet, "a\\nb\\nc");
                assert_eq!(caret, "  ");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_report_clamps_position() {
        let err = Error::unserialize("{1", 10, ErrorKind::UnterminatedTable);
        assert_eq!(err.position(), Some(2));
        assert_eq!(err.kind(), Some(&ErrorKind::UnterminatedTable));
    }

    #[test]
    fn test_report_respects_char_boundaries() {
        // "é" is two bytes; a window starting inside it must widen.
        let err = Error::unserialize("xé123", 6, ErrorKind::UnexpectedCharacter);
        match err {
            Error::Unserialize { snippet, caret, .. } => {
                assert_eq!(snippet, "é123");
                assert_eq!(caret, "    ");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_internal_message() {
        let kind = ErrorKind::Internal("table frame parent is not a value");
        assert_eq!(
            kind.to_string(),
            "table frame parent is not a value, this should never occur"
        );
    }
}
