//! The recursive-descent JSON parser.
//!
//! A [`Parser`] owns a cursor over one input string: the byte position of the
//! next scalar plus the 1-based line and column used in diagnostics. It is
//! consumed by [`Parser::parse`], which either returns the complete [`Value`]
//! or the first [`ParseError`]; no partial result survives a failure.
//!
//! # Examples
//!
//! ```rust
//! use jsonbabel::{ParseErrorKind, Value, parse};
//!
//! let v = parse(r#"{"key": [null, true, 2.5, 7]}"#).unwrap();
//! assert_eq!(v.get("key").unwrap().get(3).unwrap(), &Value::Integer(7));
//!
//! let err = parse("[1,\n 2,]").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter(']'));
//! assert_eq!((err.line, err.column), (2, 4));
//! ```

mod error;
mod escape_buffer;
mod literal_buffer;
mod options;


use alloc::{string::String, vec::Vec};
use core::str::FromStr;

use bstr::ByteSlice;
pub use error::{ParseError, ParseErrorKind};
use escape_buffer::{UnicodeEscapeBuffer, Utf16Unit, combine_surrogates};
use literal_buffer::{ExpectedLiteralBuffer, Step};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};

use crate::{
    error::{DecodeError, Error},
    value::{Map, Value},
};

/// Parses a complete JSON document with the default [`ParserOptions`].
///
/// # Errors
///
/// Returns the first syntax error, positioned at the offending character.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    Parser::new(text).parse()
}

/// Parses a complete JSON document with explicit options.
///
/// # Errors
///
/// Returns the first syntax error, positioned at the offending character.
pub fn parse_with_options(text: &str, options: ParserOptions) -> Result<Value, ParseError> {
    Parser::with_options(text, options).parse()
}

/// Parses a complete JSON document from UTF-8 bytes.
///
/// # Errors
///
/// Bytes that are not valid UTF-8 fail with [`DecodeError::InvalidData`]
/// carrying the input; otherwise this fails exactly as [`parse`] does.
pub fn from_slice(bytes: &[u8]) -> Result<Value, Error> {
    let text = bytes.to_str().map_err(|_| DecodeError::InvalidData {
        data: bytes.to_vec(),
    })?;
    Ok(parse(text)?)
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// A single-use JSON parser over one input string.
#[derive(Debug)]
pub struct Parser<'src> {
    source: &'src str,

    /// Byte offset of the next unread character.
    pos: usize,
    line: usize,
    column: usize,

    /// Number of arrays and objects currently open.
    depth: usize,
    options: ParserOptions,
}

impl<'src> Parser<'src> {
    /// Creates a parser with the default [`ParserOptions`].
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    /// Creates a parser with explicit options.
    #[must_use]
    pub fn with_options(source: &'src str, options: ParserOptions) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            depth: 0,
            options,
        }
    }

    /// Parses the whole input as exactly one JSON value, surrounded by
    /// optional whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::EmptyInput`] for blank input,
    /// [`ParseErrorKind::ExtraToken`] when anything but whitespace follows
    /// the value, and any error raised while parsing the value itself.
    pub fn parse(mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(self.error(ParseErrorKind::EmptyInput));
        }

        let value = self.parse_value()?;

        self.skip_whitespace();
        match self.peek() {
            None => Ok(value),
            Some(c) => Err(self.error(ParseErrorKind::ExtraToken(c))),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Cursor
    // --------------------------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    #[inline]
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes `expected` if it is the next character.
    #[inline]
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a run of ASCII digits and returns how many there were.
    fn eat_digits(&mut self) -> usize {
        let run = self.source[self.pos..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        self.pos += run;
        self.column += run;
        run
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            line: self.line,
            column: self.column,
        }
    }

    fn error_at(line: usize, column: usize, kind: ParseErrorKind) -> ParseError {
        ParseError { kind, line, column }
    }

    // --------------------------------------------------------------------------------------------
    // Values
    // --------------------------------------------------------------------------------------------

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') => self.parse_string().map(Value::String),
            Some('-' | '0'..='9') => self.parse_number(),
            Some(c) => match ExpectedLiteralBuffer::new(c) {
                Some(literal) => self.parse_keyword(literal),
                None => Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
            },
        }
    }

    fn parse_keyword(&mut self, mut literal: ExpectedLiteralBuffer) -> Result<Value, ParseError> {
        self.advance();
        loop {
            let step = match self.peek() {
                Some(c) => literal.step(c),
                None => Step::Reject,
            };
            match step {
                Step::NeedMore => {
                    self.advance();
                }
                Step::Done(value) => {
                    self.advance();
                    return Ok(value);
                }
                Step::Reject => {
                    return Err(self.error(ParseErrorKind::UnexpectedKeyword(
                        literal.keyword().text(),
                    )));
                }
            }
        }
    }

    /// `-? (0 | [1-9][0-9]*) (.[0-9]+)? ([eE][+-]?[0-9]+)?`
    ///
    /// Literals without fraction or exponent must fit an `i64` and become
    /// [`Value::Integer`]; everything else becomes a correctly rounded
    /// [`Value::Double`], overflowing to infinity for huge exponents.
    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let (line, column) = (self.line, self.column);
        let mut integral = true;

        self.eat('-');
        match self.peek() {
            Some('0') => {
                self.advance();
                if matches!(self.peek(), Some('0'..='9')) {
                    return Err(self.error(ParseErrorKind::InvalidNumber));
                }
            }
            Some('1'..='9') => {
                self.eat_digits();
            }
            _ => return Err(self.error(ParseErrorKind::InvalidNumber)),
        }

        if self.eat('.') {
            integral = false;
            if self.eat_digits() == 0 {
                return Err(self.error(ParseErrorKind::InvalidNumber));
            }
        }

        if self.eat('e') || self.eat('E') {
            integral = false;
            let _ = self.eat('+') || self.eat('-');
            if self.eat_digits() == 0 {
                return Err(self.error(ParseErrorKind::InvalidNumber));
            }
        }

        let lexeme = &self.source[start..self.pos];
        let invalid = || Self::error_at(line, column, ParseErrorKind::InvalidNumber);
        if integral {
            lexeme.parse::<i64>().map(Value::Integer).map_err(|_| invalid())
        } else {
            lexeme.parse::<f64>().map(Value::Double).map_err(|_| invalid())
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.advance();
        let mut out = String::new();

        loop {
            // Copy the longest run that needs no attention in one go. The run
            // holds no control characters, so it never crosses a line.
            let rest = &self.source[self.pos..];
            let run = rest
                .find(|c: char| c == '"' || c == '\\' || c < ' ')
                .unwrap_or(rest.len());
            if run > 0 {
                let plain = &rest[..run];
                out.push_str(plain);
                self.pos += run;
                self.column += plain.chars().count();
            }

            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                Some('"') => {
                    self.advance();
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance();
                    self.parse_escape(&mut out)?;
                }
                Some(c) => return Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let unescaped = match self.peek() {
            None => return Err(self.error(ParseErrorKind::UnterminatedString)),
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{0008}',
            Some('f') => '\u{000C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => {
                self.advance();
                return self.parse_unicode_escape(out);
            }
            Some(c) => return Err(self.error(ParseErrorKind::InvalidEscape(c))),
        };
        self.advance();
        out.push(unescaped);
        Ok(())
    }

    /// Decodes the hex digits after `\u`, pulling in a second `\uXXXX` when
    /// the first one is a high surrogate.
    fn parse_unicode_escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let (line, column) = (self.line, self.column);
        let ch = match Utf16Unit::classify(self.read_code_unit()?) {
            Utf16Unit::Scalar(ch) => ch,
            Utf16Unit::Low(low) => {
                return Err(Self::error_at(
                    line,
                    column,
                    ParseErrorKind::InvalidUnicode(u32::from(low)),
                ));
            }
            Utf16Unit::High(high) => {
                if !(self.eat('\\') && self.eat('u')) {
                    return Err(self.error(ParseErrorKind::InvalidUnicode(u32::from(high))));
                }
                let (low_line, low_column) = (self.line, self.column);
                let low = self.read_code_unit()?;
                combine_surrogates(high, low).ok_or_else(|| {
                    Self::error_at(
                        low_line,
                        low_column,
                        ParseErrorKind::InvalidUnicode(u32::from(low)),
                    )
                })?
            }
        };
        out.push(ch);
        Ok(())
    }

    fn read_code_unit(&mut self) -> Result<u16, ParseError> {
        let mut digits = UnicodeEscapeBuffer::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error(ParseErrorKind::UnterminatedString));
            };
            match digits.feed(c) {
                Ok(Some(unit)) => {
                    self.advance();
                    return Ok(unit);
                }
                Ok(None) => {
                    self.advance();
                }
                Err(bad) => return Err(self.error(ParseErrorKind::UnexpectedCharacter(bad))),
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Containers
    // --------------------------------------------------------------------------------------------

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        match self.options.max_depth {
            Some(max) if self.depth > max => {
                Err(self.error(ParseErrorKind::DepthLimitExceeded(max)))
            }
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.advance();
        let mut items = Vec::new();

        self.skip_whitespace();
        if !self.eat(']') {
            loop {
                self.skip_whitespace();
                items.push(self.parse_value()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => {
                        self.advance();
                    }
                    Some(']') => {
                        self.advance();
                        break;
                    }
                    Some(c) => return Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
                    None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                }
            }
        }

        self.leave();
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.advance();
        let mut object = Map::new();

        self.skip_whitespace();
        if !self.eat('}') {
            loop {
                self.skip_whitespace();
                match self.peek() {
                    Some('"') => {}
                    Some(c) => return Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
                    None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                }
                let key = self.parse_string()?;
                self.skip_whitespace();
                self.expect(':')?;
                self.skip_whitespace();
                let value = self.parse_value()?;
                // Duplicate keys: the last occurrence wins.
                object.insert(key, value);

                self.skip_whitespace();
                match self.peek() {
                    Some(',') => {
                        self.advance();
                    }
                    Some('}') => {
                        self.advance();
                        break;
                    }
                    Some(c) => return Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
                    None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                }
            }
        }

        self.leave();
        Ok(Value::Object(object))
    }
}
