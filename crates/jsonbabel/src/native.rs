//! Projection between [`Value`] and loosely-typed host values.
//!
//! The host form of a JSON tree is a `Box<dyn Any>` per node: scalars box
//! their Rust type, arrays become `Vec<Option<Native>>` and objects become
//! `BTreeMap<String, Option<Native>>`. `None` stands for `null`.
use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use core::any::Any;

use crate::{opaque::Opaque, value::Value};

/// A boxed host value.
pub type Native = Box<dyn Any + Send + Sync>;

type NativeArray = Vec<Option<Native>>;
type NativeMap = BTreeMap<String, Option<Native>>;

impl Value {
    /// Recursively converts this value into host form.
    ///
    /// `Null` projects to `None`. An `Opaque` projects to its handle (boxed as
    /// [`Opaque`]), so [`Value::from_native`] gives it back unchanged.
    ///
    /// ```rust
    /// use jsonbabel::{Value, value};
    ///
    /// let native = value!([1, null]).to_native().unwrap();
    /// let items = native.downcast::<Vec<Option<jsonbabel::Native>>>().unwrap();
    /// assert_eq!(items[0].as_ref().unwrap().downcast_ref::<i64>(), Some(&1));
    /// assert!(items[1].is_none());
    /// ```
    #[must_use]
    pub fn to_native(&self) -> Option<Native> {
        Some(match self {
            Value::Null => return None,
            Value::Boolean(b) => Box::new(*b),
            Value::Integer(i) => Box::new(*i),
            Value::Double(d) => Box::new(*d),
            Value::String(s) => Box::new(s.clone()),
            Value::Array(a) => Box::new(a.iter().map(Value::to_native).collect::<NativeArray>()),
            Value::Object(o) => Box::new(
                o.iter()
                    .map(|(k, v)| (k.clone(), v.to_native()))
                    .collect::<NativeMap>(),
            ),
            Value::Opaque(o) => Box::new(o.clone()),
        })
    }

    /// Builds a value from host form, the inverse of [`Value::to_native`].
    ///
    /// Besides the shapes `to_native` produces, this recognises every
    /// built-in integer and float width, `&'static str`, `char`, `Value`,
    /// `Vec<Value>` and, with the `std` feature, `HashMap`s of native values.
    /// Anything else is kept as [`Value::Opaque`].
    #[must_use]
    pub fn from_native(native: Option<Native>) -> Value {
        let Some(native) = native else {
            return Value::Null;
        };

        macro_rules! try_scalar {
            ($native:ident, $($ty:ty),*) => {
                $(
                    let $native = match $native.downcast::<$ty>() {
                        Ok(v) => return Value::from(*v),
                        Err(other) => other,
                    };
                )*
            };
        }

        try_scalar!(
            native, bool, i64, i32, i16, i8, isize, u64, u32, u16, u8, usize, f64, f32, char,
            String, &'static str, Value, Opaque
        );

        let native = match native.downcast::<Vec<Value>>() {
            Ok(v) => return Value::Array(*v),
            Err(other) => other,
        };
        let native = match native.downcast::<NativeArray>() {
            Ok(v) => return v.into_iter().map(Value::from_native).collect(),
            Err(other) => other,
        };
        let native = match native.downcast::<NativeMap>() {
            Ok(v) => {
                return v
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_native(v)))
                    .collect();
            }
            Err(other) => other,
        };
        #[cfg(feature = "std")]
        let native = match native.downcast::<std::collections::HashMap<String, Option<Native>>>() {
            Ok(v) => {
                return v
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_native(v)))
                    .collect();
            }
            Err(other) => other,
        };

        Value::Opaque(Opaque::from_boxed(native))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::value;

    #[test]
    fn roundtrip_preserves_tree() {
        let v = value!({
            "a": [1, 2.5, "x", true, null],
            "b": {"c": {}},
        });
        assert_eq!(Value::from_native(v.to_native()), v);
    }

    #[test]
    fn null_projects_to_none() {
        assert!(Value::Null.to_native().is_none());
        assert_eq!(Value::from_native(None), Value::Null);
    }

    #[test]
    fn narrow_scalars_widen() {
        assert_eq!(Value::from_native(Some(Box::new(7_u8))), Value::Integer(7));
        assert_eq!(Value::from_native(Some(Box::new(1.5_f32))), Value::Double(1.5));
        assert_eq!(
            Value::from_native(Some(Box::new("hi"))),
            Value::String("hi".into())
        );
        assert!(matches!(
            Value::from_native(Some(Box::new(u64::MAX))),
            Value::Double(_)
        ));
    }

    #[test]
    fn opaque_survives_projection() {
        let original = Opaque::new(vec![1_u16, 2]);
        let back = Value::from_native(Value::Opaque(original.clone()).to_native());
        let Value::Opaque(o) = back else {
            panic!("expected opaque");
        };
        assert!(o.ptr_eq(&original));
    }

    #[test]
    fn unknown_types_become_opaque() {
        let back = Value::from_native(Some(Box::new(vec![1_u16, 2])));
        let Value::Opaque(o) = back else {
            panic!("expected opaque");
        };
        assert_eq!(o.downcast_ref::<Vec<u16>>(), Some(&vec![1, 2]));
    }
}
