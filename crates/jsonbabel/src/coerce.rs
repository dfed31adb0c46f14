//! The coercion policy behind the `require_*` accessors.
//!
//! Each accessor accepts the variant matching its target plus a fixed set of
//! lossless-enough conversions, and an [`Opaque`](crate::Opaque) that holds
//! exactly the target type. Anything else is a
//! [`DecodeError::TypeMismatch`] naming the target type and carrying the
//! offending value.
//!
//! | Target   | Accepted                                                         |
//! |----------|------------------------------------------------------------------|
//! | `bool`   | `Boolean`; `"true"`/`"false"`; `0`/`1`; `0.0`/`1.0`              |
//! | integers | `Integer` in range; `Double` truncated into range; numeric text  |
//! | floats   | `Double`; `Integer`; numeric text                                |
//! | `String` | `String`; rendered `Boolean`, `Integer` and `Double`             |
//! | `char`   | a `String` of exactly one scalar                                 |
//! | array    | `Array` only                                                     |
//! | object   | `Object` only                                                    |
use alloc::string::{String, ToString};
use core::any::Any;

use crate::{
    error::DecodeError,
    value::{Array, Map, Value},
};

macro_rules! require_integer {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Coerces the value to `", stringify!($ty), "`.")]
            ///
            /// Doubles are truncated toward zero and must land inside the
            /// target range; NaN and infinities are rejected. Strings must
            /// parse as the target type.
            ///
            /// # Errors
            ///
            /// Returns [`DecodeError::TypeMismatch`] when no rule applies.
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_precision_loss,
                clippy::cast_sign_loss,
                clippy::cast_lossless
            )]
            pub fn $name(&self) -> Result<$ty, DecodeError> {
                let coerced = match self {
                    Value::Integer(i) => <$ty>::try_from(*i).ok(),
                    Value::Double(d) => {
                        // `as` truncates toward zero, so the bounds are checked on
                        // the untruncated double. NaN fails both comparisons.
                        let (lo, hi) = (<$ty>::MIN as f64, <$ty>::MAX as f64 + 1.0);
                        ((*d >= lo || *d > lo - 1.0) && *d < hi).then(|| *d as $ty)
                    }
                    Value::String(s) => s.parse::<$ty>().ok(),
                    Value::Opaque(o) => o.downcast_ref::<$ty>().copied(),
                    _ => None,
                };
                coerced.ok_or_else(|| DecodeError::type_mismatch::<$ty>(self))
            }
        )*
    };
}

impl Value {
    /// Coerces the value to `bool`.
    ///
    /// Only exact literals convert: `"true"`/`"false"`, `0`/`1` and
    /// `0.0`/`1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] for anything else.
    #[allow(clippy::float_cmp)]
    pub fn require_bool(&self) -> Result<bool, DecodeError> {
        let coerced = match self {
            Value::Boolean(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Integer(0) => Some(false),
            Value::Integer(1) => Some(true),
            Value::Double(d) if *d == 0.0 => Some(false),
            Value::Double(d) if *d == 1.0 => Some(true),
            Value::Opaque(o) => o.downcast_ref::<bool>().copied(),
            _ => None,
        };
        coerced.ok_or_else(|| DecodeError::type_mismatch::<bool>(self))
    }

    require_integer!(
        require_i8 => i8,
        require_i16 => i16,
        require_i32 => i32,
        require_i64 => i64,
        require_isize => isize,
        require_u8 => u8,
        require_u16 => u16,
        require_u32 => u32,
        require_u64 => u64,
        require_usize => usize,
    );

    /// Coerces the value to `f64`. Integers widen, strings must parse.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] when no rule applies.
    #[allow(clippy::cast_precision_loss)]
    pub fn require_f64(&self) -> Result<f64, DecodeError> {
        let coerced = match self {
            Value::Double(d) => Some(*d),
            Value::Integer(i) => Some(*i as f64),
            Value::String(s) => s.parse::<f64>().ok(),
            Value::Opaque(o) => o.downcast_ref::<f64>().copied(),
            _ => None,
        };
        coerced.ok_or_else(|| DecodeError::type_mismatch::<f64>(self))
    }

    /// Coerces the value to `f32`, rounding doubles to the nearest `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] when no rule applies.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn require_f32(&self) -> Result<f32, DecodeError> {
        let coerced = match self {
            Value::Double(d) => Some(*d as f32),
            Value::Integer(i) => Some(*i as f32),
            Value::String(s) => s.parse::<f32>().ok(),
            Value::Opaque(o) => o.downcast_ref::<f32>().copied(),
            _ => None,
        };
        coerced.ok_or_else(|| DecodeError::type_mismatch::<f32>(self))
    }

    /// Coerces the value to an owned `String`.
    ///
    /// Scalars render as text: booleans as `true`/`false`, integers in
    /// decimal and doubles in their shortest round-trip form (`2.0`, `4.63`).
    /// Containers are never stringified.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] for null and containers.
    pub fn require_string(&self) -> Result<String, DecodeError> {
        let coerced = match self {
            Value::String(s) => Some(s.clone()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Double(d) => Some(alloc::format!("{d:?}")),
            Value::Opaque(o) => o.downcast_ref::<String>().cloned(),
            _ => None,
        };
        coerced.ok_or_else(|| DecodeError::type_mismatch::<String>(self))
    }

    /// Coerces a single-scalar string to `char`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] for empty or longer strings and
    /// every other variant.
    pub fn require_char(&self) -> Result<char, DecodeError> {
        let coerced = match self {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            Value::Opaque(o) => o.downcast_ref::<char>().copied(),
            _ => None,
        };
        coerced.ok_or_else(|| DecodeError::type_mismatch::<char>(self))
    }

    /// Borrows the elements of an array.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] unless the value is an array.
    pub fn require_array(&self) -> Result<&Array, DecodeError> {
        match self {
            Value::Array(a) => Ok(a),
            Value::Opaque(o) => o
                .downcast_ref::<Array>()
                .ok_or_else(|| DecodeError::type_mismatch::<Array>(self)),
            _ => Err(DecodeError::type_mismatch::<Array>(self)),
        }
    }

    /// Borrows the members of an object.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] unless the value is an object.
    pub fn require_object(&self) -> Result<&Map, DecodeError> {
        match self {
            Value::Object(o) => Ok(o),
            Value::Opaque(o) => o
                .downcast_ref::<Map>()
                .ok_or_else(|| DecodeError::type_mismatch::<Map>(self)),
            _ => Err(DecodeError::type_mismatch::<Map>(self)),
        }
    }

    /// Clones a `T` out of an [`Opaque`](crate::Opaque) value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] unless the value is an opaque
    /// holding exactly a `T`.
    pub fn require_opaque<T: Any + Clone>(&self) -> Result<T, DecodeError> {
        match self {
            Value::Opaque(o) => o.downcast::<T>(),
            _ => Err(DecodeError::type_mismatch::<T>(self)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use alloc::vec;

    use rstest::rstest;

    use super::*;
    use crate::value;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[rstest]
    #[case(Value::Boolean(true), true)]
    #[case(s("false"), false)]
    #[case(Value::Integer(1), true)]
    #[case(Value::Integer(0), false)]
    #[case(Value::Double(1.0), true)]
    #[case(Value::Double(-0.0), false)]
    #[case(Value::opaque(true), true)]
    fn bool_accepts(#[case] v: Value, #[case] expected: bool) {
        assert_eq!(v.require_bool().unwrap(), expected);
    }

    #[rstest]
    #[case(s("True"))]
    #[case(s("1"))]
    #[case(Value::Integer(2))]
    #[case(Value::Double(0.5))]
    #[case(Value::Null)]
    #[case(value!([]))]
    #[case(Value::opaque(1_u8))]
    fn bool_rejects(#[case] v: Value) {
        let DecodeError::TypeMismatch { expected, value } = v.require_bool().unwrap_err() else {
            panic!("expected a type mismatch");
        };
        assert_eq!(expected, "bool");
        assert_eq!(value.kind(), v.kind());
    }

    #[rstest]
    #[case(Value::Integer(-5), -5)]
    #[case(Value::Double(4.63), 4)]
    #[case(Value::Double(-4.63), -4)]
    #[case(Value::Double(2.0), 2)]
    #[case(s("17"), 17)]
    #[case(s("-17"), -17)]
    #[case(Value::opaque(9_i64), 9)]
    fn i64_accepts(#[case] v: Value, #[case] expected: i64) {
        assert_eq!(v.require_i64().unwrap(), expected);
    }

    #[rstest]
    #[case(Value::Double(f64::NAN))]
    #[case(Value::Double(f64::INFINITY))]
    #[case(Value::Double(9.3e18))]
    #[case(s("4.5"))]
    #[case(s(""))]
    #[case(Value::Boolean(true))]
    #[case(Value::opaque(9_i32))]
    fn i64_rejects(#[case] v: Value) {
        assert!(matches!(
            v.require_i64(),
            Err(DecodeError::TypeMismatch { expected: "i64", .. })
        ));
    }

    #[rstest]
    #[case(-9_223_372_036_854_775_808.0, Some(i64::MIN))]
    #[case(9_223_372_036_854_775_808.0, None)]
    #[case(9_223_372_036_854_774_784.0, Some(9_223_372_036_854_774_784))]
    #[case(-0.999, Some(0))]
    #[case(f64::NEG_INFINITY, None)]
    #[case(-f64::NAN, None)]
    fn i64_double_edges(#[case] d: f64, #[case] expected: Option<i64>) {
        assert_eq!(Value::Double(d).require_i64().ok(), expected);
    }

    #[test]
    fn lower_edges_truncate_toward_zero() {
        assert_eq!(Value::Double(-128.99).require_i8().unwrap(), i8::MIN);
        assert!(Value::Double(-129.0).require_i8().is_err());
        assert_eq!(Value::Double(-0.5).require_u32().unwrap(), 0);
        assert!(Value::Double(-1.0).require_u32().is_err());
        assert!(Value::Double(f64::NAN).require_u8().is_err());
    }

    #[test]
    fn narrow_integers_check_range() {
        assert_eq!(Value::Integer(127).require_i8().unwrap(), 127);
        assert!(Value::Integer(128).require_i8().is_err());
        assert_eq!(Value::Double(255.9).require_u8().unwrap(), 255);
        assert!(Value::Double(256.0).require_u8().is_err());
        assert_eq!(Value::Double(-0.9).require_u8().unwrap(), 0);
        assert!(Value::Integer(-1).require_u64().is_err());
        assert!(Value::Integer(-1).require_usize().is_err());
        assert_eq!(
            Value::Double(-2_147_483_648.5).require_i32().unwrap(),
            i32::MIN
        );
        assert!(Value::Double(2_147_483_648.0).require_i32().is_err());
        assert_eq!(
            Value::Double(1.8e19).require_u64().unwrap(),
            18_000_000_000_000_000_000
        );
        assert!(Value::Double(1.9e19).require_u64().is_err());
        assert_eq!(s("65535").require_u16().unwrap(), u16::MAX);
        assert_eq!(Value::Integer(-3).require_isize().unwrap(), -3);
        assert_eq!(Value::Integer(70_000).require_u32().unwrap(), 70_000);
        assert!(Value::Integer(70_000).require_i16().is_err());
    }

    #[rstest]
    #[case(Value::Double(2.5), 2.5)]
    #[case(Value::Integer(-3), -3.0)]
    #[case(s("2.0"), 2.0)]
    #[case(s("1e3"), 1000.0)]
    #[case(Value::opaque(0.25_f64), 0.25)]
    fn f64_accepts(#[case] v: Value, #[case] expected: f64) {
        assert_eq!(v.require_f64().unwrap(), expected);
    }

    #[test]
    fn f32_narrows() {
        assert_eq!(Value::Double(0.5).require_f32().unwrap(), 0.5_f32);
        assert_eq!(Value::Integer(3).require_f32().unwrap(), 3.0_f32);
        assert_eq!(Value::opaque(1.5_f32).require_f32().unwrap(), 1.5_f32);
        assert!(Value::opaque(1.5_f64).require_f32().is_err());
        assert!(s("x").require_f32().is_err());
    }

    #[rstest]
    #[case(s("x"), "x")]
    #[case(Value::Boolean(false), "false")]
    #[case(Value::Integer(-12), "-12")]
    #[case(Value::Double(2.0), "2.0")]
    #[case(Value::Double(4.63), "4.63")]
    #[case(Value::opaque(String::from("host")), "host")]
    fn string_accepts(#[case] v: Value, #[case] expected: &str) {
        assert_eq!(v.require_string().unwrap(), expected);
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(value!([]))]
    #[case(value!({}))]
    fn string_rejects_containers_and_null(#[case] v: Value) {
        assert!(v.require_string().is_err());
    }

    #[test]
    fn char_needs_exactly_one_scalar() {
        assert_eq!(s("é").require_char().unwrap(), 'é');
        assert!(s("").require_char().is_err());
        assert!(s("ab").require_char().is_err());
        assert!(Value::Integer(1).require_char().is_err());
        assert_eq!(Value::opaque('z').require_char().unwrap(), 'z');
    }

    #[test]
    fn containers_are_never_coerced() {
        let arr = value!([1, 2]);
        assert_eq!(arr.require_array().unwrap().len(), 2);
        assert!(arr.require_object().is_err());

        let obj = value!({"a": 1});
        assert!(obj.require_object().unwrap().contains_key("a"));
        assert!(obj.require_array().is_err());

        assert!(s("[1]").require_array().is_err());
        let host = Value::opaque(vec![Value::Null]);
        assert_eq!(host.require_array().unwrap(), &vec![Value::Null]);
    }

    #[test]
    fn opaque_requires_exact_type() {
        #[derive(Clone, Debug, PartialEq)]
        struct Handle(u8);

        let v = Value::opaque(Handle(3));
        assert_eq!(v.require_opaque::<Handle>().unwrap(), Handle(3));
        assert!(v.require_opaque::<u8>().is_err());
        assert!(Value::Integer(3).require_opaque::<Handle>().is_err());
    }

    #[test]
    fn coercion_is_idempotent() {
        for v in [
            Value::Double(4.63),
            s("12"),
            Value::Integer(1),
            Value::Boolean(true),
        ] {
            let once = v.require_string().unwrap();
            assert_eq!(Value::from(once.clone()).require_string().unwrap(), once);
        }
        let once = Value::Double(4.63).require_i64().unwrap();
        assert_eq!(Value::from(once).require_i64().unwrap(), once);
    }
}
