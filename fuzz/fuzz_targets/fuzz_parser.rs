#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use jsonbabel::{ParserOptions, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    max_depth: Option<u8>,
    text: &'a [u8],
}

fn has_non_finite(value: &Value) -> bool {
    match value {
        Value::Double(d) => !d.is_finite(),
        Value::Array(items) => items.iter().any(has_non_finite),
        Value::Object(members) => members.values().any(has_non_finite),
        _ => false,
    }
}

fn depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        Value::Object(members) => 1 + members.values().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = Input::arbitrary_take_rest(Unstructured::new(data)) else {
        return;
    };
    let options = ParserOptions {
        max_depth: input.max_depth.map(usize::from),
    };

    let Ok(text) = std::str::from_utf8(input.text) else {
        assert!(jsonbabel::from_slice(input.text).is_err());
        return;
    };

    let Ok(value) = jsonbabel::parse_with_options(text, options) else {
        return;
    };
    if let Some(max) = options.max_depth {
        assert!(depth(&value) <= max);
    }

    // Overflowing doubles render as null and are rejected by serde_json, so
    // only finite trees are compared.
    if has_non_finite(&value) {
        return;
    }

    let unlimited = ParserOptions { max_depth: None };
    let compact = jsonbabel::parse_with_options(&value.to_string(), unlimited)
        .expect("compact rendering parses");
    assert_eq!(compact, value);
    let pretty = jsonbabel::parse_with_options(&format!("{value:#}"), unlimited)
        .expect("pretty rendering parses");
    assert_eq!(pretty, value);

    if depth(&value) < 128 {
        let theirs = serde_json::from_str::<serde_json::Value>(text);
        assert!(theirs.is_ok(), "serde_json rejected {text:?}: {theirs:?}");
    }
});
