use alloc::string::String;

use quickcheck_macros::quickcheck;

use super::arbitrary::JsonNumber;
use crate::Value;

/// Coercing the result of a coercion yields the same result.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn string_coercion_is_idempotent(value: Value) -> bool {
    match value.require_string() {
        Ok(once) => Value::String(once.clone()).require_string().as_ref() == Ok(&once),
        Err(_) => true,
    }
}

#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn integer_coercion_is_idempotent(value: Value) -> bool {
    match value.require_i64() {
        Ok(once) => Value::Integer(once).require_i64() == Ok(once),
        Err(_) => true,
    }
}

/// Integers render as text that coerces straight back.
#[quickcheck]
fn integer_text_coerces_back(i: i64) -> bool {
    let text: String = Value::Integer(i).require_string().unwrap_or_default();
    Value::String(text).require_i64() == Ok(i)
}

/// A double that truncates into `i32` range agrees with a direct cast.
#[quickcheck]
#[allow(clippy::cast_possible_truncation)]
fn truncation_matches_cast(d: f64) -> bool {
    let in_range = d > f64::from(i32::MIN) - 1.0 && d < f64::from(i32::MAX) + 1.0;
    match Value::Double(d).require_i32() {
        Ok(i) => in_range && i == d as i32,
        Err(_) => !in_range,
    }
}

/// Doubles come back from `require_f64` bit for bit.
#[quickcheck]
fn double_coercion_is_exact(d: JsonNumber) -> bool {
    Value::Double(d.0)
        .require_f64()
        .is_ok_and(|out| out.to_bits() == d.0.to_bits())
}

#[test]
fn nan_survives_double_coercion() {
    let nan = f64::from_bits(0x7FF8_0000_0000_0001);
    let out = Value::Double(nan).require_f64().unwrap();
    assert_eq!(out.to_bits(), nan.to_bits());
}
