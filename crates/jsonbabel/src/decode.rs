//! Typed decoding on top of [`Value`].
//!
//! A type opts in by implementing [`Decode::decode_value`]. Callers go through
//! the provided [`Decode::decode`], which adds two things: an [`Opaque`] that
//! already holds the target type is cloned out as-is, and every failure gets
//! a "while decoding `T`" annotation pushed onto its chain.
//!
//! [`Opaque`]: crate::Opaque
use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use core::any::type_name;

use crate::{
    error::{DecodeError, Error},
    native::Native,
    parser::{from_slice, parse},
    value::Value,
};

/// A type that can be built from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use jsonbabel::{Decode, DecodeError, Value};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// impl Decode for Point {
///     fn decode_value(value: &Value) -> Result<Self, DecodeError> {
///         Ok(Point {
///             x: value.extract("x")?,
///             y: value.extract("y")?,
///         })
///     }
/// }
///
/// let p = Point::decode_str(r#"{"x": 1, "y": "2.5"}"#).unwrap();
/// assert_eq!(p, Point { x: 1.0, y: 2.5 });
/// ```
pub trait Decode: Clone + 'static {
    /// The type-specific conversion. Call [`Decode::decode`] instead of this
    /// so failures carry their context.
    ///
    /// # Errors
    ///
    /// Returns the first conversion failure.
    fn decode_value(value: &Value) -> Result<Self, DecodeError>;

    /// Decodes `value`, annotating any failure with this type's name.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Immediate`] when `decode_value` failed with a
    /// terminal cause and [`DecodeError::Nested`] when it failed while
    /// decoding another type.
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        if let Value::Opaque(host) = value {
            if let Some(native) = host.downcast_ref::<Self>() {
                return Ok(native.clone());
            }
        }
        Self::decode_value(value).map_err(|e| e.within(type_name::<Self>()))
    }

    /// Parses `text` and decodes the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed JSON and [`Error::Decode`] when
    /// the document does not fit `Self`.
    fn decode_str(text: &str) -> Result<Self, Error> {
        let value = parse(text).inspect_err(|e| {
            tracing::debug!(error = %e, target_type = type_name::<Self>(), "failed to parse JSON text");
        })?;
        Ok(Self::decode(&value)?)
    }

    /// Parses UTF-8 `bytes` and decodes the result.
    ///
    /// # Errors
    ///
    /// As [`Decode::decode_str`], plus [`DecodeError::InvalidData`] for
    /// bytes that are not UTF-8.
    fn decode_slice(bytes: &[u8]) -> Result<Self, Error> {
        let value = from_slice(bytes).inspect_err(|e| {
            tracing::debug!(error = %e, target_type = type_name::<Self>(), "failed to parse JSON bytes");
        })?;
        Ok(Self::decode(&value)?)
    }

    /// Projects a host value with [`Value::from_native`] and decodes it.
    ///
    /// # Errors
    ///
    /// See [`Decode::decode`].
    fn decode_native(native: Option<Native>) -> Result<Self, DecodeError> {
        Self::decode(&Value::from_native(native))
    }
}

/// What collection decoding does with an element that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFailure {
    /// Stop and return the element's error.
    #[default]
    Abort,
    /// Leave the element out and carry on.
    Skip,
}

impl Value {
    /// Decodes this value as a `T`. Equivalent to `T::decode(self)`.
    ///
    /// # Errors
    ///
    /// See [`Decode::decode`].
    pub fn decode<T: Decode>(&self) -> Result<T, DecodeError> {
        T::decode(self)
    }

    /// Decodes every element of an array.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::TypeMismatch`] if this is not an array and,
    /// under [`OnFailure::Abort`], with the first element error.
    pub fn decode_array<T: Decode>(&self, on_failure: OnFailure) -> Result<Vec<T>, DecodeError> {
        let items = self.require_array()?;
        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match T::decode(item) {
                Ok(v) => decoded.push(v),
                Err(e) if on_failure == OnFailure::Skip => {
                    tracing::debug!(index, error = %e, "skipping array element that failed to decode");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(decoded)
    }

    /// Decodes every member of an object. Keys are decoded from
    /// `Value::String(key)`, so numeric and other coercible key types work.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::TypeMismatch`] if this is not an object and,
    /// under [`OnFailure::Abort`], with the first key or value error.
    pub fn decode_object<K, V>(&self, on_failure: OnFailure) -> Result<BTreeMap<K, V>, DecodeError>
    where
        K: Decode + Ord,
        V: Decode,
    {
        let members = self.require_object()?;
        let mut decoded = BTreeMap::new();
        for (key, member) in members {
            let entry = K::decode(&Value::String(key.clone()))
                .and_then(|k| V::decode(member).map(|v| (k, v)));
            match entry {
                Ok((k, v)) => {
                    decoded.insert(k, v);
                }
                Err(e) if on_failure == OnFailure::Skip => {
                    tracing::debug!(key = key.as_str(), error = %e, "skipping object member that failed to decode");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(decoded)
    }
}

macro_rules! impl_decode_via {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode_value(value: &Value) -> Result<Self, DecodeError> {
                    value.$method()
                }
            }
        )*
    };
}

impl_decode_via!(
    bool => require_bool,
    i8 => require_i8,
    i16 => require_i16,
    i32 => require_i32,
    i64 => require_i64,
    isize => require_isize,
    u8 => require_u8,
    u16 => require_u16,
    u32 => require_u32,
    u64 => require_u64,
    usize => require_usize,
    f32 => require_f32,
    f64 => require_f64,
    String => require_string,
    char => require_char,
);

impl Decode for Value {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

/// `null` decodes to `None`; anything else must decode as `T`. Adds no
/// annotation of its own.
impl<T: Decode> Decode for Option<T> {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Self::decode_value(value)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        T::decode(value).map(Box::new)
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Self::decode_value(value)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        value.decode_array(OnFailure::Abort)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        value.decode_object(OnFailure::Abort)
    }
}

#[cfg(feature = "std")]
impl<K, V> Decode for std::collections::HashMap<K, V>
where
    K: Decode + Eq + core::hash::Hash,
    V: Decode,
{
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        value
            .require_object()?
            .iter()
            .map(|(k, v)| -> Result<(K, V), DecodeError> {
                Ok((K::decode(&Value::String(k.clone()))?, V::decode(v)?))
            })
            .collect()
    }
}
