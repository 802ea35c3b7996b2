//! Query-string encoding of parameter bags.
//!
//! Scalars are written as strings, arrays as repeated `key[]` pairs, nested
//! objects as `key[sub]`, and `null` values are omitted.

use orb_billing_core::RawBag;
use serde_json::Value;

/// Flatten `raw` into query pairs, in key order.
pub(crate) fn to_query_pairs(raw: &RawBag) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(raw.len());
    for (key, value) in raw.iter() {
        push_value(&mut pairs, key.to_string(), value);
    }
    pairs
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            let key = format!("{key}[]");
            for item in items {
                push_value(pairs, key.clone(), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_value(pairs, format!("{key}[{sub}]"), item);
            }
        }
    }
}
