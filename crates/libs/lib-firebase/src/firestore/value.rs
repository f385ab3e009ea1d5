//! # Firestore Value Encoding
//!
//! Converts plain JSON into Firestore's typed `Value` representation:
//!
//! ```text
//! {"sortOrder": 1, "isActive": true}
//!   -> {"sortOrder": {"integerValue": "1"}, "isActive": {"booleanValue": true}}
//! ```
//!
//! Integers travel as decimal strings (int64 in proto3 JSON); unsigned values
//! above `i64::MAX` are rejected. Strings stay strings and ISO timestamps are
//! not promoted to `timestampValue`.

use lib_core::{AppError, Result};
use serde_json::{json, Map, Value};

/// Encode one JSON value.
pub fn encode_value(value: &Value) -> Result<Value> {
    let encoded = match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None if n.is_u64() => {
                return Err(AppError::InvalidData(format!(
                    "integer {} does not fit in a Firestore int64",
                    n
                )));
            }
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) if items.is_empty() => json!({ "arrayValue": {} }),
        Value::Array(items) => {
            let values = items.iter().map(encode_value).collect::<Result<Vec<_>>>()?;
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map)? } }),
    };
    Ok(encoded)
}

/// Encode every field of an object.
pub fn encode_fields(map: &Map<String, Value>) -> Result<Map<String, Value>> {
    map.iter()
        .map(|(name, value)| Ok((name.clone(), encode_value(value)?)))
        .collect()
}

/// Encode a document body, which must be a JSON object.
pub fn encode_document(document: &Value) -> Result<Map<String, Value>> {
    match document {
        Value::Object(map) => encode_fields(map),
        other => Err(AppError::Provider(format!(
            "document body must be a JSON object, got {}",
            other
        ))),
    }
}
