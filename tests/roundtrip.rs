// ABOUTME: Validates documents produced by the `bson` crate's encoder.
// ABOUTME: Anything a real encoder writes must be accepted by both engines.

use bson::spec::BinarySubtype;
use bson::{doc, Binary, Bson, DateTime, Decimal128, Document, JavaScriptCodeWithScope, Regex, Timestamp};
use bson_validate::{validate, validate_fast, validate_precise, ValidatorConfig};

fn encode(doc: &Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.to_writer(&mut bytes).unwrap();
    bytes
}

fn every_type() -> Document {
    doc! {
        "_id": bson::oid::ObjectId::new(),
        "double": 1.5,
        "string": "hello",
        "doc": { "nested": { "deeper": true } },
        "array": [1, "two", 3.0, { "four": 4 }, [5]],
        "binary": Binary { subtype: BinarySubtype::Generic, bytes: vec![1, 2, 3] },
        "uuid": Binary { subtype: BinarySubtype::Uuid, bytes: vec![0xab; 16] },
        "undefined": Bson::Undefined,
        "bool": false,
        "date": DateTime::from_millis(1_700_000_000_000),
        "null": Bson::Null,
        "regex": Regex { pattern: "^abc".to_string(), options: "i".to_string() },
        "code": Bson::JavaScriptCode("function() {}".to_string()),
        "symbol": Bson::Symbol("sym".to_string()),
        "int32": 42_i32,
        "timestamp": Timestamp { time: 1_700_000_000, increment: 7 },
        "int64": i64::MIN,
        "decimal": Decimal128::from_bytes([0x22; 16]),
        "min": Bson::MinKey,
        "max": Bson::MaxKey,
    }
}

#[test]
fn test_every_type() {
    let bytes = encode(&every_type());
    assert!(validate(&bytes).is_ok());
    assert!(validate_fast(&bytes, &ValidatorConfig::default()).is_ok());
}

#[test]
fn test_code_with_scope() {
    let code = JavaScriptCodeWithScope {
        code: "function() { return x + y; }".to_string(),
        scope: doc! { "x": 1, "y": { "z": [1, 2] } },
    };
    let bytes = encode(&doc! { "_id": 1, "fn": Bson::JavaScriptCodeWithScope(code), "after": "x" });

    assert!(validate(&bytes).is_ok());
    assert!(validate_precise(&bytes, &ValidatorConfig::default()).is_ok());
    assert!(validate_fast(&bytes, &ValidatorConfig::default()).is_err());
}

#[test]
fn test_deep_document() {
    let mut doc = doc! { "leaf": 1 };
    for _ in 0..150 {
        doc = doc! { "level": doc };
    }
    assert!(validate(&encode(&doc)).is_ok());
}

#[test]
fn test_large_array() {
    let values: Vec<Bson> = (0..10_000).map(Bson::Int32).collect();
    let bytes = encode(&doc! { "values": values });
    assert!(validate(&bytes).is_ok());
}

#[test]
fn test_corrupted_encoder_output_is_rejected() {
    let mut bytes = encode(&every_type());
    let last = bytes.len() - 1;
    bytes[last] = 0x01;
    assert!(validate(&bytes).is_err());

    let bytes = encode(&every_type());
    assert!(validate(&bytes[..bytes.len() - 1]).is_err());
}
