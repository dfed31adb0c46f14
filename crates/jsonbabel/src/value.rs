//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, which represents any parsed JSON
//! datum plus an opaque escape hatch for host values, and the compact and
//! pretty JSON renderings used by its `Display` impl.
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::opaque::Opaque;

/// The members of a JSON object, ordered by key.
pub type Map = BTreeMap<String, Value>;
/// The elements of a JSON array.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259], split into integer and floating
/// point numbers, plus an [`Opaque`] variant for host values that have no JSON
/// form.
///
/// Values are immutable data: every transformation produces a new `Value`.
///
/// # Examples
///
/// ```
/// use jsonbabel::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// JSON `null`.
    #[default]
    Null,
    /// JSON `true` or `false`.
    Boolean(bool),
    /// A number written without fraction or exponent.
    Integer(i64),
    /// Any other number.
    Double(f64),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Array),
    /// A JSON object.
    Object(Map),
    /// A host value carried through untouched. Renders as `null`.
    Opaque(Opaque),
}

/// Structural equality between matching variants. Two `Opaque` values never
/// compare equal, not even a value with itself.
impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

/// Values above `i64::MAX` widen to [`Value::Double`].
impl From<u64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Self::Integer(i),
            Err(_) => Self::Double(v as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Integer(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Double(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::String(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl From<Opaque> for Value {
    fn from(v: Opaque) -> Self {
        Self::Opaque(v)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Value {
    /// Wraps an arbitrary host value in the [`Opaque`] variant.
    pub fn opaque<T: core::any::Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    /// A short lowercase name for the active variant, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Opaque(_) => "opaque",
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbabel::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Double`].
    ///
    /// [`Double`]: Value::Double
    #[must_use]
    pub fn is_double(&self) -> bool {
        matches!(self, Self::Double(..))
    }

    /// Returns `true` for either numeric variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbabel::Value;
    ///
    /// assert!(Value::Integer(42).is_number());
    /// assert!(Value::Double(4.2).is_number());
    /// assert!(!Value::String("42".into()).is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Double(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns `true` if the value is [`Opaque`].
    ///
    /// [`Opaque`]: Value::Opaque
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(..))
    }

    /// The boolean, if this is a [`Value::Boolean`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is a [`Value::Integer`]. Doubles are not converted;
    /// use [`Value::require_i64`] for coercion.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The double, if this is a [`Value::Double`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The text, if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is a [`Value::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The members, if this is a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The handle, if this is a [`Value::Opaque`].
    #[must_use]
    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Self::Opaque(o) => Some(o),
            _ => None,
        }
    }
}

/// Escapes control characters in a string for inclusion in a JSON string
/// literal.
///
/// Quotes, backslashes, control characters, and the Unicode line separators
/// are written as escape sequences; everything else is copied through.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Pre-2019 JSON parsers reject raw line separators.
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_control() => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Writes a double so that it parses back as a [`Value::Double`] with the
/// same bits: integral values keep their `.0`, and non-finite values, which
/// JSON cannot express, become `null`.
fn write_double<W: fmt::Write>(d: f64, f: &mut W) -> fmt::Result {
    if d.is_finite() {
        write!(f, "{d:?}")
    } else {
        f.write_str("null")
    }
}

const INDENT: &str = "  ";

fn write_indent<W: fmt::Write>(f: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl Value {
    /// Renders the value as JSON text. `pretty` selects two-space indented
    /// output with one member per line.
    fn write_json<W: fmt::Write>(&self, f: &mut W, pretty: bool, depth: usize) -> fmt::Result {
        match self {
            // Opaque host values have no JSON form.
            Value::Null | Value::Opaque(_) => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Double(d) => write_double(*d, f),
            Value::String(s) => {
                f.write_char('"')?;
                write_escaped_string(s, f)?;
                f.write_char('"')
            }
            Value::Array(arr) => {
                if arr.is_empty() {
                    return f.write_str("[]");
                }
                f.write_char('[')?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    if pretty {
                        f.write_char('\n')?;
                        write_indent(f, depth + 1)?;
                    }
                    v.write_json(f, pretty, depth + 1)?;
                }
                if pretty {
                    f.write_char('\n')?;
                    write_indent(f, depth)?;
                }
                f.write_char(']')
            }
            Value::Object(map) => {
                if map.is_empty() {
                    return f.write_str("{}");
                }
                f.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    if pretty {
                        f.write_char('\n')?;
                        write_indent(f, depth + 1)?;
                    }
                    f.write_char('"')?;
                    write_escaped_string(k, f)?;
                    f.write_str(if pretty { "\": " } else { "\":" })?;
                    v.write_json(f, pretty, depth + 1)?;
                }
                if pretty {
                    f.write_char('\n')?;
                    write_indent(f, depth)?;
                }
                f.write_char('}')
            }
        }
    }
}

/// Compact JSON by default; the alternate flag (`{:#}`) pretty-prints.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        self.write_json(f, pretty, 0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString, vec};

    use super::*;

    #[test]
    fn opaque_is_never_equal() {
        let v = Value::opaque(5_u8);
        assert_ne!(v, v.clone());
        assert_ne!(Value::opaque(()), Value::Null);
    }

    #[test]
    fn equality_is_per_variant() {
        assert_eq!(Value::Integer(1), Value::Integer(1));
        assert_ne!(Value::Integer(1), Value::Double(1.0));
        assert_ne!(Value::String("1".into()), Value::Integer(1));
        assert_eq!(
            Value::from(vec![Value::Null, Value::from(true)]),
            Value::Array(vec![Value::Null, Value::Boolean(true)])
        );
    }

    #[test]
    fn wide_unsigned_becomes_double() {
        assert_eq!(Value::from(7_u64), Value::Integer(7));
        assert_eq!(Value::from(u64::MAX), Value::Double(1.844_674_407_370_955_2e19));
    }

    #[test]
    fn collect_into_object() {
        let v: Value = [("a", Value::from(1)), ("b", Value::Null)].into_iter().collect();
        assert_eq!(v.to_string(), r#"{"a":1,"b":null}"#);
    }

    #[test]
    fn doubles_keep_their_fraction() {
        assert_eq!(Value::Double(2.0).to_string(), "2.0");
        assert_eq!(Value::Double(-0.0).to_string(), "-0.0");
        assert_eq!(Value::Double(4.63).to_string(), "4.63");
        assert_eq!(Value::Double(f64::NAN).to_string(), "null");
        assert_eq!(Value::Integer(-12).to_string(), "-12");
    }

    #[test]
    fn strings_are_escaped() {
        let v = Value::from("a\"b\\c\nd\u{1}\u{2028}é");
        assert_eq!(v.to_string(), r#""a\"b\\c\nd\u0001\u2028é""#);
    }

    #[test]
    fn pretty_output() {
        let v = crate::value!({
            "items": [1, {"k": null}, []],
            "name": "x",
            "empty": {},
        });
        insta::assert_snapshot!(format!("{v:#}"), @r#"
        {
          "empty": {},
          "items": [
            1,
            {
              "k": null
            },
            []
          ],
          "name": "x"
        }
        "#);
    }

    #[test]
    #[deny(unused_mut)]
    fn empty_object_literal() {
        let v = crate::value!({});
        assert_eq!(v, Value::Object(Map::new()));
        assert_eq!(format!("{v:#}"), "{}");
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Double(1.0).kind(), "double");
        assert_eq!(Value::opaque(1_u8).kind(), "opaque");
    }
}
