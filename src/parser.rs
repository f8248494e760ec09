//! The luadata parsing automaton.
//!
//! The parser walks the input one byte at a time and keeps every open
//! construct on an explicit stack of [`Frame`]s. The frame on top of the stack
//! decides what the current byte means and answers with a [`Step`] telling the
//! loop where to go next. A frame may ask to see the same byte again, which is
//! how a construct hands the byte that ended it back to its parent.
//!
//! Completed values travel upwards through a [`Frame::Value`] placeholder.
//! Whoever needs a value (the root, a table entry, a key expression) pushes a
//! placeholder, the literal inside fills it, and the placeholder passes the
//! value to the frame below once it is popped.

use crate::global::Cursor;
use crate::{DictType, Environment, Error, ErrorKind, LuaTable, LuaValue, Number, UnserializeOptions};

/// Where the cursor goes after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Move to the next byte.
    Next,
    /// Look at the same byte again, usually with a different frame on top.
    Again,
    /// Skip `n` bytes past the next one.
    Skip(usize),
    /// Jump back to an absolute offset.
    Goto(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootState {
    SeekValue,
    WaitValue,
    ValueEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    SeekChild,
    KeySimple,
    KeySimpleEnd,
    KeyExpressionOpen,
    KeyExpressionFinish,
    KeyExpressionClose,
    WaitValue,
    ValueEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    Int,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentKind {
    Inline,
    Multiline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VariableState {
    SimpleKeyStart,
    SimpleKeyMiddle,
    WaitNext,
    KeyExpressionOpen,
    KeyExpressionFinish,
}

#[derive(Debug)]
enum Frame<'a> {
    Root {
        state: RootState,
        entries: Vec<LuaValue>,
    },
    /// A slot for one value. `Some` once the value is complete.
    Value { data: Option<LuaValue> },
    Table {
        state: TableState,
        entries: LuaTable,
        key: Option<LuaValue>,
        key_start: usize,
    },
    Text {
        start: usize,
        quote: u8,
        escaping: bool,
    },
    Number { start: usize, kind: NumberKind },
    Comment { kind: CommentKind },
    /// A reference into the global environment, such as `a.b["c"]`.
    Variable {
        state: VariableState,
        cursor: Cursor<'a>,
        at_global: bool,
        start: usize,
    },
}

impl Frame<'_> {
    fn describe(&self) -> String {
        match self {
            Frame::Root { state, entries } => format!("root {:?} ({} values)", state, entries.len()),
            Frame::Value { data } => format!("value (fulfilled: {})", data.is_some()),
            Frame::Table { state, entries, .. } => {
                format!("table {:?} ({} entries)", state, entries.len())
            }
            Frame::Text { start, .. } => format!("text from {}", start),
            Frame::Number { start, kind } => format!("number {:?} from {}", kind, start),
            Frame::Comment { kind } => format!("comment {:?}", kind),
            Frame::Variable { state, .. } => format!("variable {:?}", state),
        }
    }
}

fn is_space(byte: Option<u8>) -> bool {
    matches!(byte, Some(b' ' | b'\r' | b'\n' | b'\t'))
}

fn is_name_start(byte: Option<u8>) -> bool {
    matches!(byte, Some(b) if b.is_ascii_alphabetic() || b == b'_')
}

fn is_name_char(byte: Option<u8>) -> bool {
    matches!(byte, Some(b) if b.is_ascii_alphanumeric() || b == b'_')
}

fn is_digit(byte: Option<u8>) -> bool {
    matches!(byte, Some(b) if b.is_ascii_digit())
}

/// Decodes the escapes a string literal may carry.
///
/// `\\`, `\"` and a backslash before a line break are decoded everywhere in
/// the literal. Any other backslash sequence is kept as written.
fn decode_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('\\' | '"' | '\n')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

pub(crate) struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    options: &'a UnserializeOptions,
    env: &'a Environment,
    stack: Vec<Frame<'a>>,
    /// A completed value waiting for the frame below its placeholder.
    child: Option<LuaValue>,
    /// Open tables and key expressions.
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, options: &'a UnserializeOptions) -> Self {
        Parser {
            input,
            bytes: input.as_bytes(),
            options,
            env: &options.global,
            stack: Vec::new(),
            child: None,
            depth: 0,
        }
    }

    /// Runs the automaton over the whole input and returns every top-level
    /// value in order.
    pub(crate) fn parse(mut self) -> crate::Result<Vec<LuaValue>> {
        let len = self.bytes.len();
        // Every byte is visited a bounded number of times; the budget only
        // trips if a frame stops making progress.
        let mut budget = (len + 1).saturating_mul(16).saturating_add(16);
        let mut pos = 0;

        self.stack.push(Frame::Root {
            state: RootState::SeekValue,
            entries: Vec::new(),
        });

        while pos <= len {
            let byte = self.bytes.get(pos).copied();
            if self.options.verbose {
                log::debug!(
                    "[step] pos {} byte {:?} frame {} depth {}",
                    pos,
                    byte.map(char::from),
                    self.stack.last().map_or_else(String::new, Frame::describe),
                    self.stack.len()
                );
            }

            budget = match budget.checked_sub(1) {
                Some(left) => left,
                None => return Err(self.error(pos, ErrorKind::Internal("too many steps"))),
            };

            match self.step(pos, byte) {
                Ok(Step::Next) => pos += 1,
                Ok(Step::Again) => {}
                Ok(Step::Skip(n)) => pos += n + 1,
                Ok(Step::Goto(target)) => pos = target,
                Err(kind) => return Err(self.error(pos, kind)),
            }
        }

        if self.stack.len() != 1 {
            return Err(self.error(pos, ErrorKind::Internal("parser stack is not empty")));
        }
        match self.stack.pop() {
            Some(Frame::Root { entries, .. }) if !entries.is_empty() => Ok(entries),
            Some(Frame::Root { .. }) => Err(self.error(pos, ErrorKind::NothingToUnserialize)),
            _ => Err(self.error(pos, ErrorKind::Internal("root frame is missing"))),
        }
    }

    fn error(&self, pos: usize, kind: ErrorKind) -> Error {
        if self.options.verbose {
            log::debug!("[error] pos {} {}", pos, kind);
        }
        Error::unserialize(self.input, pos, kind)
    }

    fn step(&mut self, pos: usize, byte: Option<u8>) -> Result<Step, ErrorKind> {
        let frame = self
            .stack
            .pop()
            .ok_or(ErrorKind::Internal("parser stack is empty"))?;

        match frame {
            Frame::Root { state, entries } => self.step_root(pos, byte, state, entries),
            Frame::Value { data } => self.step_value(pos, byte, data),
            Frame::Table {
                state,
                entries,
                key,
                key_start,
            } => self.step_table(pos, byte, state, entries, key, key_start),
            Frame::Text {
                start,
                quote,
                escaping,
            } => self.step_text(pos, byte, start, quote, escaping),
            Frame::Number { start, kind } => self.step_number(pos, byte, start, kind),
            Frame::Comment { kind } => self.step_comment(pos, byte, kind),
            Frame::Variable {
                state,
                cursor,
                at_global,
                start,
            } => self.step_variable(pos, byte, state, cursor, at_global, start),
        }
    }

    /// Recognizes `--[[` and `--` at `pos`.
    fn comment_at(&self, pos: usize) -> Option<(Frame<'a>, Step)> {
        let rest = self.bytes.get(pos..)?;
        if rest.starts_with(b"--[[") {
            Some((
                Frame::Comment {
                    kind: CommentKind::Multiline,
                },
                Step::Skip(3),
            ))
        } else if rest.starts_with(b"--") {
            Some((
                Frame::Comment {
                    kind: CommentKind::Inline,
                },
                Step::Skip(1),
            ))
        } else {
            None
        }
    }

    /// Enters a comment on top of `frame` if one starts at `pos`, otherwise
    /// hands `frame` back.
    fn enter_comment(&mut self, pos: usize, frame: Frame<'a>) -> Result<Step, Frame<'a>> {
        match self.comment_at(pos) {
            Some((comment, step)) => {
                self.stack.push(frame);
                self.stack.push(comment);
                Ok(step)
            }
            None => Err(frame),
        }
    }

    fn open_nested(&mut self) -> Result<(), ErrorKind> {
        if self.depth >= self.options.max_depth {
            return Err(ErrorKind::TooDeeplyNested(self.options.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn close_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn push_placeholder(&mut self) {
        self.stack.push(Frame::Value { data: None });
    }

    /// Fills the placeholder on top of the stack.
    fn fulfil(&mut self, value: LuaValue) -> Result<(), ErrorKind> {
        match self.stack.last_mut() {
            Some(Frame::Value { data: data @ None }) => {
                *data = Some(value);
                Ok(())
            }
            _ => Err(ErrorKind::Internal("completed value has no placeholder")),
        }
    }

    fn take_child(&mut self) -> Result<LuaValue, ErrorKind> {
        self.child
            .take()
            .ok_or(ErrorKind::Internal("expected a completed value"))
    }

    fn step_root(
        &mut self,
        pos: usize,
        byte: Option<u8>,
        state: RootState,
        mut entries: Vec<LuaValue>,
    ) -> Result<Step, ErrorKind> {
        match state {
            RootState::SeekValue => {
                let frame = Frame::Root { state, entries };
                let frame = match self.enter_comment(pos, frame) {
                    Ok(step) => return Ok(step),
                    Err(frame) => frame,
                };
                if is_space(byte) {
                    self.stack.push(frame);
                    return Ok(Step::Next);
                }
                let Frame::Root { entries, .. } = frame else {
                    return Err(ErrorKind::Internal("root frame changed kind"));
                };
                if byte.is_none() && entries.is_empty() {
                    return Err(ErrorKind::NothingToUnserialize);
                }
                self.stack.push(Frame::Root {
                    state: RootState::WaitValue,
                    entries,
                });
                self.push_placeholder();
                Ok(Step::Again)
            }
            RootState::WaitValue => {
                entries.push(self.take_child()?);
                self.stack.push(Frame::Root {
                    state: RootState::ValueEnd,
                    entries,
                });
                Ok(Step::Again)
            }
            RootState::ValueEnd => {
                let frame = Frame::Root { state, entries };
                let frame = match self.enter_comment(pos, frame) {
                    Ok(step) => return Ok(step),
                    Err(frame) => frame,
                };
                match byte {
                    None => {
                        self.stack.push(frame);
                        Ok(Step::Next)
                    }
                    Some(b',') => {
                        let Frame::Root { entries, .. } = frame else {
                            return Err(ErrorKind::Internal("root frame changed kind"));
                        };
                        self.stack.push(Frame::Root {
                            state: RootState::SeekValue,
                            entries,
                        });
                        Ok(Step::Next)
                    }
                    _ if is_space(byte) => {
                        self.stack.push(frame);
                        Ok(Step::Next)
                    }
                    _ => Err(ErrorKind::UnexpectedCharacter),
                }
            }
        }
    }

    fn step_value(
        &mut self,
        pos: usize,
        byte: Option<u8>,
        data: Option<LuaValue>,
    ) -> Result<Step, ErrorKind> {
        if let Some(value) = data {
            self.child = Some(value);
            return Ok(Step::Again);
        }

        let frame = match self.enter_comment(pos, Frame::Value { data: None }) {
            Ok(step) => return Ok(step),
            Err(frame) => frame,
        };

        match byte {
            _ if is_space(byte) => {
                self.stack.push(frame);
                Ok(Step::Next)
            }
            Some(quote @ (b'"' | b'\'')) => {
                self.stack.push(frame);
                self.stack.push(Frame::Text {
                    start: pos + 1,
                    quote,
                    escaping: false,
                });
                Ok(Step::Next)
            }
            Some(b'-' | b'0'..=b'9') => {
                self.stack.push(frame);
                self.stack.push(Frame::Number {
                    start: pos,
                    kind: NumberKind::Int,
                });
                Ok(Step::Next)
            }
            Some(b'.') => {
                self.stack.push(frame);
                self.stack.push(Frame::Number {
                    start: pos,
                    kind: NumberKind::Float,
                });
                Ok(Step::Next)
            }
            Some(b'{') => {
                self.open_nested()?;
                self.stack.push(frame);
                self.stack.push(Frame::Table {
                    state: TableState::SeekChild,
                    entries: LuaTable::new(),
                    key: None,
                    key_start: pos,
                });
                Ok(Step::Next)
            }
            _ if is_name_start(byte) && self.options.resolve_globals => {
                self.stack.push(frame);
                self.stack.push(Frame::Variable {
                    state: VariableState::SimpleKeyStart,
                    cursor: Cursor::Global,
                    at_global: true,
                    start: pos,
                });
                Ok(Step::Again)
            }
            _ if is_name_start(byte) => {
                let rest = &self.bytes[pos..];
                let literals: [(&[u8], LuaValue); 3] = [
                    (b"true", LuaValue::Boolean(true)),
                    (b"false", LuaValue::Boolean(false)),
                    (b"nil", LuaValue::Nil),
                ];
                for (word, value) in literals {
                    if rest.starts_with(word) {
                        self.stack.push(Frame::Value { data: Some(value) });
                        return Ok(Step::Skip(word.len() - 1));
                    }
                }
                Err(ErrorKind::UnexpectedEmptyValue)
            }
            _ => Err(ErrorKind::UnexpectedEmptyValue),
        }
    }

    fn step_text(
        &mut self,
        pos: usize,
        byte: Option<u8>,
        start: usize,
        quote: u8,
        escaping: bool,
    ) -> Result<Step, ErrorKind> {
        let Some(b) = byte else {
            return Err(ErrorKind::UnterminatedString);
        };
        if escaping || b != quote {
            self.stack.push(Frame::Text {
                start,
                quote,
                escaping: !escaping && b == b'\\',
            });
            return Ok(Step::Next);
        }
        self.fulfil(LuaValue::String(decode_text(&self.input[start..pos])))?;
        Ok(Step::Next)
    }

    fn step_number(
        &mut self,
        pos: usize,
        byte: Option<u8>,
        start: usize,
        kind: NumberKind,
    ) -> Result<Step, ErrorKind> {
        if is_digit(byte) {
            self.stack.push(Frame::Number { start, kind });
            return Ok(Step::Next);
        }

        let text = &self.input[start..pos];
        let number = match kind {
            NumberKind::Int if byte == Some(b'.') => {
                self.stack.push(Frame::Number {
                    start,
                    kind: NumberKind::Float,
                });
                return Ok(Step::Next);
            }
            NumberKind::Int => match text.parse::<i64>() {
                Ok(i) => Number::Integer(i),
                Err(_) => text
                    .parse::<f64>()
                    .map(Number::Float)
                    .map_err(|_| ErrorKind::MalformedNumber)?,
            },
            NumberKind::Float if text == "." => return Err(ErrorKind::UnexpectedDot),
            NumberKind::Float => text
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| ErrorKind::MalformedNumber)?,
        };

        self.fulfil(LuaValue::Number(number))?;
        Ok(Step::Again)
    }

    fn step_comment(
        &mut self,
        pos: usize,
        byte: Option<u8>,
        kind: CommentKind,
    ) -> Result<Step, ErrorKind> {
        match kind {
            CommentKind::Multiline => match byte {
                None => Err(ErrorKind::UnterminatedComment),
                Some(b']') if self.bytes[pos..].starts_with(b"]]") => Ok(Step::Skip(1)),
                Some(_) => {
                    self.stack.push(Frame::Comment { kind });
                    Ok(Step::Next)
                }
            },
            CommentKind::Inline => match byte {
                None => Ok(Step::Again),
                Some(b'\n') => Ok(Step::Next),
                Some(_) => {
                    self.stack.push(Frame::Comment { kind });
                    Ok(Step::Next)
                }
            },
        }
    }

    /// Converts the entries of a closed table into its final value.
    fn close_table(&self, entries: LuaTable) -> LuaValue {
        match entries.into_sequence() {
            Ok(items) => LuaValue::Array(items),
            Err(table) => match self.options.dict_type {
                DictType::Map => LuaValue::Table(table),
                DictType::Object => LuaValue::Object(table.into_record()),
            },
        }
    }

    fn step_table(
        &mut self,
        pos: usize,
        byte: Option<u8>,
        mut state: TableState,
        mut entries: LuaTable,
        mut key: Option<LuaValue>,
        mut key_start: usize,
    ) -> Result<Step, ErrorKind> {
        let accepts_comment = matches!(
            state,
            TableState::SeekChild
                | TableState::KeySimpleEnd
                | TableState::KeyExpressionFinish
                | TableState::KeyExpressionClose
                | TableState::ValueEnd
        );
        if accepts_comment {
            if let Some((comment, step)) = self.comment_at(pos) {
                self.stack.push(Frame::Table {
                    state,
                    entries,
                    key,
                    key_start,
                });
                self.stack.push(comment);
                return Ok(step);
            }
        }

        let step = match state {
            TableState::SeekChild => match byte {
                None => return Err(ErrorKind::UnterminatedTable),
                _ if is_name_start(byte) => {
                    state = TableState::KeySimple;
                    key_start = pos;
                    Step::Next
                }
                Some(b'[') => {
                    self.open_nested()?;
                    self.stack.push(Frame::Table {
                        state: TableState::KeyExpressionOpen,
                        entries,
                        key,
                        key_start,
                    });
                    self.push_placeholder();
                    return Ok(Step::Next);
                }
                Some(b'}') => {
                    self.close_nested();
                    let value = self.close_table(entries);
                    self.fulfil(value)?;
                    return Ok(Step::Next);
                }
                _ if is_space(byte) => Step::Next,
                _ => {
                    self.stack.push(Frame::Table {
                        state: TableState::WaitValue,
                        key: Some(LuaValue::from(entries.lua_length() as i64 + 1)),
                        entries,
                        key_start,
                    });
                    self.push_placeholder();
                    return Ok(Step::Again);
                }
            },
            TableState::KeySimple => {
                if is_name_char(byte) {
                    Step::Next
                } else {
                    key = Some(LuaValue::from(&self.input[key_start..pos]));
                    state = TableState::KeySimpleEnd;
                    Step::Again
                }
            }
            TableState::KeySimpleEnd if is_space(byte) => Step::Next,
            TableState::KeySimpleEnd => {
                // Without `=` the word was a value, not a key: read it again
                // as a positional entry.
                let step = if byte == Some(b'=') {
                    Step::Next
                } else {
                    key = Some(LuaValue::from(entries.lua_length() as i64 + 1));
                    Step::Goto(key_start)
                };
                self.stack.push(Frame::Table {
                    state: TableState::WaitValue,
                    entries,
                    key,
                    key_start,
                });
                self.push_placeholder();
                return Ok(step);
            }
            TableState::KeyExpressionOpen => {
                key = Some(self.take_child()?);
                state = TableState::KeyExpressionFinish;
                Step::Again
            }
            TableState::KeyExpressionFinish => match byte {
                None => return Err(ErrorKind::UnterminatedKeyExpression),
                Some(b']') => {
                    self.close_nested();
                    state = TableState::KeyExpressionClose;
                    Step::Next
                }
                _ if is_space(byte) => Step::Next,
                _ => return Err(ErrorKind::ExpectedCloseBracket),
            },
            TableState::KeyExpressionClose => match byte {
                Some(b'=') => {
                    self.stack.push(Frame::Table {
                        state: TableState::WaitValue,
                        entries,
                        key,
                        key_start,
                    });
                    self.push_placeholder();
                    return Ok(Step::Next);
                }
                _ if is_space(byte) => Step::Next,
                _ => return Err(ErrorKind::ExpectedEquals),
            },
            TableState::WaitValue => {
                let value = self.take_child()?;
                let entry_key = key
                    .take()
                    .ok_or(ErrorKind::Internal("table entry has no key"))?;
                entries.insert(entry_key, value);
                state = TableState::ValueEnd;
                Step::Again
            }
            TableState::ValueEnd => match byte {
                None => return Err(ErrorKind::UnterminatedTable),
                Some(b',') => {
                    state = TableState::SeekChild;
                    Step::Next
                }
                Some(b'}') => {
                    state = TableState::SeekChild;
                    Step::Again
                }
                _ if is_space(byte) => Step::Next,
                _ => return Err(ErrorKind::UnexpectedCharacter),
            },
        };

        self.stack.push(Frame::Table {
            state,
            entries,
            key,
            key_start,
        });
        Ok(step)
    }

    fn step_variable(
        &mut self,
        pos: usize,
        byte: Option<u8>,
        mut state: VariableState,
        mut cursor: Cursor<'a>,
        mut at_global: bool,
        mut start: usize,
    ) -> Result<Step, ErrorKind> {
        if state == VariableState::KeyExpressionFinish {
            if let Some((comment, step)) = self.comment_at(pos) {
                self.stack.push(Frame::Variable {
                    state,
                    cursor,
                    at_global,
                    start,
                });
                self.stack.push(comment);
                return Ok(step);
            }
        }

        let step = match state {
            VariableState::SimpleKeyStart => {
                if !is_name_start(byte) {
                    return Err(ErrorKind::ExpectedVariableName);
                }
                state = VariableState::SimpleKeyMiddle;
                start = pos;
                Step::Next
            }
            VariableState::SimpleKeyMiddle if is_name_char(byte) => Step::Next,
            VariableState::SimpleKeyMiddle => {
                if !cursor.is_indexable() {
                    return Err(ErrorKind::IndexNonTable);
                }
                let name = &self.input[start..pos];
                if at_global && self.options.strict_global && self.env.lookup(name).is_none() {
                    return Err(ErrorKind::UndefinedGlobal);
                }
                cursor = cursor.index(self.env, &LuaValue::from(name));
                at_global = false;
                state = VariableState::WaitNext;
                Step::Again
            }
            VariableState::WaitNext => match byte {
                Some(b'.') => {
                    state = VariableState::SimpleKeyStart;
                    Step::Next
                }
                Some(b'[') => {
                    self.open_nested()?;
                    self.stack.push(Frame::Variable {
                        state: VariableState::KeyExpressionOpen,
                        cursor,
                        at_global,
                        start,
                    });
                    self.push_placeholder();
                    return Ok(Step::Next);
                }
                _ => {
                    self.fulfil(cursor.to_value(self.env))?;
                    return Ok(Step::Again);
                }
            },
            VariableState::KeyExpressionOpen => {
                if !cursor.is_indexable() {
                    return Err(ErrorKind::IndexNonTable);
                }
                let key = self.take_child()?;
                cursor = cursor.index(self.env, &key);
                state = VariableState::KeyExpressionFinish;
                Step::Again
            }
            VariableState::KeyExpressionFinish => match byte {
                None => return Err(ErrorKind::UnterminatedKeyExpression),
                Some(b']') => {
                    self.close_nested();
                    state = VariableState::WaitNext;
                    Step::Next
                }
                _ if is_space(byte) => Step::Next,
                _ => return Err(ErrorKind::ExpectedCloseBracket),
            },
        };

        self.stack.push(Frame::Variable {
            state,
            cursor,
            at_global,
            start,
        });
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> crate::Result<Vec<LuaValue>> {
        let options = UnserializeOptions::default();
        Parser::new(input, &options).parse()
    }

    #[test]
    fn test_decode_text_all_occurrences() {
        assert_eq!(decode_text(r#"a\\b\\c"#), r"a\b\c");
        assert_eq!(decode_text(r#"\"x\""#), "\"x\"");
        assert_eq!(decode_text("a\\\nb\\\nc"), "a\nb\nc");
        assert_eq!(decode_text(r"\t\x"), r"\t\x");
        assert_eq!(decode_text("end\\"), "end\\");
    }

    #[test]
    fn test_tuple_of_scalars() {
        assert_eq!(
            parse("1, 'a' ,true").unwrap(),
            vec![
                LuaValue::from(1),
                LuaValue::from("a"),
                LuaValue::Boolean(true)
            ]
        );
    }

    #[test]
    fn test_positional_after_bare_word() {
        let mut options = UnserializeOptions::default();
        options.global.insert("x", LuaValue::from(7));
        let values = Parser::new("{x, y = x}", &options).parse().unwrap();

        let mut expected = LuaTable::new();
        expected.insert(LuaValue::from(1), LuaValue::from(7));
        expected.insert(LuaValue::from("y"), LuaValue::from(7));
        assert_eq!(values, vec![LuaValue::Table(expected)]);
    }

    #[test]
    fn test_depth_is_released_after_close() {
        let options = UnserializeOptions::default().with_max_depth(1);
        let values = Parser::new("{1},{2},{3}", &options).parse().unwrap();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_key_expression_counts_towards_depth() {
        let options = UnserializeOptions::default().with_max_depth(1);
        let err = Parser::new("{[{}]=1}", &options).parse().unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::TooDeeplyNested(1)));
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 10_000;
        let input = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let options = UnserializeOptions::default().with_max_depth(depth);
        let values = Parser::new(&input, &options).parse().unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_verbose_does_not_change_result() {
        let options = UnserializeOptions::default().with_verbose(true);
        let values = Parser::new("{a=1}", &options).parse().unwrap();
        assert_eq!(values, parse("{a=1}").unwrap());
    }

    #[test]
    fn test_comment_between_key_and_equals() {
        let values = parse("{a --[[k]] = 1, [2] -- x\n = 2}").unwrap();
        let table = values[0].as_table().unwrap();
        assert_eq!(table.get(&LuaValue::from("a")), Some(&LuaValue::from(1)));
        assert_eq!(table.get(&LuaValue::from(2)), Some(&LuaValue::from(2)));
    }
}
