//! Canonical sign bytes: recursively key-sorted, compact JSON, UTF-8.
//!
//! The signature covers these bytes directly, so any drift from the
//! verifier's encoding (key order, whitespace, escaping) invalidates it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::MigrateResult;

/// Return a copy of `value` with every object's keys in lexicographic order.
/// Arrays keep their element order; scalars are returned unchanged.
pub fn sort_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::new();
            for (key, child) in entries {
                sorted.insert(key.clone(), sort_json(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_json).collect()),
        scalar => scalar.clone(),
    }
}

/// Serialize a JSON value to its canonical byte form.
pub fn canonicalize(value: &Value) -> MigrateResult<Vec<u8>> {
    Ok(serde_json::to_vec(&sort_json(value))?)
}

/// Canonical bytes of any serializable document.
pub fn sign_bytes<T: Serialize>(doc: &T) -> MigrateResult<Vec<u8>> {
    canonicalize(&serde_json::to_value(doc)?)
}
