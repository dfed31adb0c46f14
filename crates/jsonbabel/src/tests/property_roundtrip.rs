use alloc::{format, string::ToString};

use quickcheck::QuickCheck;

use crate::{Value, parse};

/// Property: the compact rendering of any value parses back to that value.
#[test]
fn display_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        parse(&value.to_string()).is_ok_and(|back| back == value)
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: pretty output differs only in whitespace.
#[test]
fn pretty_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        parse(&format!("{value:#}")).is_ok_and(|back| back == value)
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: whatever the parser accepts, `serde_json` accepts too, and the
/// two agree on the shape.
#[test]
fn serde_json_agrees_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let text = value.to_string();
        let Ok(theirs) = serde_json::from_str::<serde_json::Value>(&text) else {
            return false;
        };
        let ours = parse(&text).expect("rendered text parses");
        same_shape(&ours, &theirs)
    }

    #[allow(clippy::float_cmp)]
    fn same_shape(ours: &Value, theirs: &serde_json::Value) -> bool {
        match (ours, theirs) {
            (Value::Null, serde_json::Value::Null) => true,
            (Value::Boolean(a), serde_json::Value::Bool(b)) => a == b,
            (Value::Integer(a), serde_json::Value::Number(b)) => b.as_i64() == Some(*a),
            (Value::Double(a), serde_json::Value::Number(b)) => b.as_f64() == Some(*a),
            (Value::String(a), serde_json::Value::String(b)) => a == b,
            (Value::Array(a), serde_json::Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
            }
            (Value::Object(a), serde_json::Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| same_shape(v, w)))
            }
            _ => false,
        }
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Value) -> bool);
}
