//! A JSON parser paired with a typed decoding layer.
//!
//! Text is parsed into a dynamically-typed [`Value`], and types implementing
//! [`Decode`] pull themselves out of that value with a fixed coercion policy.
//! Failures carry a chain of "while decoding `T`" annotations down to the one
//! primitive mismatch that caused them.
//!
//! ```rust
//! use jsonbabel::{Decode, DecodeError, Value};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Item {
//!     title: String,
//!     rating: i64,
//! }
//!
//! impl Decode for Item {
//!     fn decode_value(value: &Value) -> Result<Self, DecodeError> {
//!         Ok(Item {
//!             title: value.extract("title")?,
//!             rating: value.extract("rating")?,
//!         })
//!     }
//! }
//!
//! let items = Vec::<Item>::decode_str(r#"[{"title":"A","rating":4.63}]"#).unwrap();
//! assert_eq!(items, vec![Item { title: "A".into(), rating: 4 }]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod coerce;
mod decode;
mod error;
mod native;
mod opaque;
mod parser;
mod path;
mod value;

#[cfg(feature = "serde")]
mod serde_impls;

#[cfg(test)]
mod tests;

pub use decode::{Decode, OnFailure};
pub use error::{DecodeError, Error};
pub use native::Native;
pub use opaque::Opaque;
pub use parser::{
    DEFAULT_MAX_DEPTH, ParseError, ParseErrorKind, Parser, ParserOptions, from_slice, parse,
    parse_with_options,
};
pub use path::{MissingPolicy, NullPolicy, OptionalValue, PathItem, Step};
pub use value::{Array, Map, Value};

#[doc(hidden)]
pub use alloc::vec;

/// Builds a `Vec<PathItem>` from a heterogeneous list of keys and indices.
///
/// ```rust
/// use jsonbabel::{PathItem, path};
///
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         PathItem::Index(0),
///         PathItem::Key("foo".into()),
///         PathItem::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        $crate::vec![$($crate::PathItem::from($elem)),*]
    }};
}

/// Builds a [`Value`] from JSON-like literal syntax.
///
/// Nested arrays and objects are written inline; any other element is an
/// expression converted with `Value::from`.
///
/// ```rust
/// use jsonbabel::{Value, value};
///
/// let v = value!({
///     "name": "babel",
///     "tags": ["a", "b"],
///     "count": -3,
///     "extra": null,
/// });
/// assert_eq!(v.get("count").unwrap(), &Value::Integer(-3));
/// assert!(v.get("extra").unwrap().is_null());
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };
    ([ $($tt:tt)* ]) => {
        $crate::Value::Array($crate::__value_internal!(@array [] $($tt)*))
    };
    ({ $($tt:tt)* }) => {{
        #[allow(unused_mut)]
        let mut object = $crate::Map::new();
        $crate::__value_internal!(@object object; $($tt)*);
        $crate::Value::Object(object)
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __value_internal {
    (@array [$($elems:expr,)*]) => {
        $crate::vec![$($elems,)*]
    };
    (@array [$($elems:expr,)*] null $(, $($rest:tt)*)?) => {
        $crate::__value_internal!(@array [$($elems,)* $crate::Value::Null,] $($($rest)*)?)
    };
    (@array [$($elems:expr,)*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::__value_internal!(@array [$($elems,)* $crate::value!([$($inner)*]),] $($($rest)*)?)
    };
    (@array [$($elems:expr,)*] {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $crate::__value_internal!(@array [$($elems,)* $crate::value!({$($inner)*}),] $($($rest)*)?)
    };
    (@array [$($elems:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::__value_internal!(@array [$($elems,)* $crate::Value::from($next),] $($($rest)*)?)
    };

    (@object $object:ident;) => {};
    (@object $object:ident; $key:literal : null $(, $($rest:tt)*)?) => {
        $object.insert(::core::convert::Into::into($key), $crate::Value::Null);
        $crate::__value_internal!(@object $object; $($($rest)*)?);
    };
    (@object $object:ident; $key:literal : [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $object.insert(::core::convert::Into::into($key), $crate::value!([$($inner)*]));
        $crate::__value_internal!(@object $object; $($($rest)*)?);
    };
    (@object $object:ident; $key:literal : {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $object.insert(::core::convert::Into::into($key), $crate::value!({$($inner)*}));
        $crate::__value_internal!(@object $object; $($($rest)*)?);
    };
    (@object $object:ident; $key:literal : $val:expr $(, $($rest:tt)*)?) => {
        $object.insert(::core::convert::Into::into($key), $crate::Value::from($val));
        $crate::__value_internal!(@object $object; $($($rest)*)?);
    };
}
