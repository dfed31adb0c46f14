#![allow(missing_docs)]

use std::collections::BTreeMap;

use jsonbabel::{Decode, DecodeError, Error, OnFailure, OptionalValue, ParseErrorKind, Value};

const FEED: &str = r#"{"apiVersion":"2.0","data":{"totalItems":2,"items":[{"title":"A","rating":4.63},{"title":"B","rating":2.0}]}}"#;

#[derive(Clone, Debug, PartialEq)]
struct Item {
    title: String,
    rating: i64,
}

impl Decode for Item {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(Item {
            title: value.extract("title")?,
            rating: value.extract("rating")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Feed {
    api_version: f64,
    total_items: i64,
    items: Vec<Item>,
}

impl Decode for Feed {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        let data = value.get("data")?;
        Ok(Feed {
            api_version: value.extract("apiVersion")?,
            total_items: data.extract("totalItems")?,
            items: data.extract("items")?,
        })
    }
}

#[test]
#[allow(clippy::float_cmp)]
fn feed_decodes_with_coercions() {
    let feed = Feed::decode_str(FEED).unwrap();
    assert_eq!(feed.api_version, 2.0);
    assert_eq!(feed.total_items, 2);
    assert_eq!(
        feed.items,
        vec![
            Item {
                title: "A".into(),
                rating: 4,
            },
            Item {
                title: "B".into(),
                rating: 2,
            },
        ]
    );
}

#[test]
fn feed_decodes_from_bytes() {
    let feed = Feed::decode_slice(FEED.as_bytes()).unwrap();
    assert_eq!(feed.items.len(), 2);
}

#[derive(Clone, Debug)]
struct Inner {
    #[allow(dead_code)]
    members: usize,
}

impl Decode for Inner {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(Inner {
            members: value.require_object()?.len(),
        })
    }
}

#[derive(Clone, Debug)]
struct Outer {
    #[allow(dead_code)]
    inner: Inner,
}

impl Decode for Outer {
    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(Outer {
            inner: value.extract("inner")?,
        })
    }
}

#[test]
fn error_chain_is_outermost_first() {
    let err = Outer::decode(&jsonbabel::parse(r#"{"inner": "oops"}"#).unwrap()).unwrap_err();

    let DecodeError::Nested { type_name, cause } = &err else {
        panic!("expected a nested error, got {err:?}");
    };
    assert!(type_name.ends_with("Outer"));
    let DecodeError::Immediate { type_name, cause } = cause.as_ref() else {
        panic!("expected an immediate error, got {cause:?}");
    };
    assert!(type_name.ends_with("Inner"));
    assert!(matches!(
        cause.as_ref(),
        DecodeError::TypeMismatch { value: Value::String(s), .. } if s == "oops"
    ));

    assert_eq!(err.trail().len(), 2);
    assert!(err.to_string().contains("type mismatch"));
}

#[test]
fn missing_field_is_reported_with_object() {
    let err = Item::decode_str(r#"{"title":"A"}"#).unwrap_err();
    let Error::Decode(err) = err else {
        panic!("expected a decode error");
    };
    let DecodeError::MissingKey { key, object } = err.root_cause() else {
        panic!("expected a missing key, got {err:?}");
    };
    assert_eq!(key, "rating");
    assert!(object.contains_key("title"));
}

#[test]
fn parse_errors_pass_through() {
    let Err(Error::Parse(err)) = Feed::decode_str(r#"{"apiVersion": 2.0,}"#) else {
        panic!("expected a parse error");
    };
    assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('}'));
    assert_eq!((err.line, err.column), (1, 20));
}

#[test]
fn skipping_bad_items() {
    let value = jsonbabel::parse(
        r#"[{"title":"A","rating":1},{"title":"B"},{"title":"C","rating":"3"},{"title":[],"rating":1}]"#,
    )
    .unwrap();

    assert!(value.decode_array::<Item>(OnFailure::Abort).is_err());

    let items = value.decode_array::<Item>(OnFailure::Skip).unwrap();
    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["A", "C"]);
    assert_eq!(items[1].rating, 3);
}

#[test]
fn keyed_collections() {
    let value = jsonbabel::parse(r#"{"10": {"title":"x","rating":1}, "7": {"title":"y"}}"#).unwrap();

    let by_id: BTreeMap<u32, Item> = value.decode_object(OnFailure::Skip).unwrap();
    assert_eq!(by_id.keys().copied().collect::<Vec<_>>(), [10]);

    assert!(BTreeMap::<u32, Item>::decode(&value).is_err());
}

#[test]
fn optional_chains() {
    let value = jsonbabel::parse(r#"{"data": {"next": null, "items": []}}"#).unwrap();

    let next: Option<String> = value
        .get("data")
        .unwrap()
        .extract_or_null("next")
        .unwrap();
    assert_eq!(next, None);

    let deep: Option<i64> = value
        .get_optional("meta")
        .unwrap()
        .get_optional("page")
        .unwrap()
        .decode()
        .unwrap();
    assert_eq!(deep, None);

    let strict = value.get("data").unwrap().get_non_null("next");
    assert!(matches!(strict, Err(DecodeError::MissingKey { .. })));
}
