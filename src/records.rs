//! Nested record manipulation: flattening, merging, cleaning.
//!
//! Host records are arbitrarily nested JSON-like values. Filtering operates
//! on a flattened view where nesting is kept in the key:
//!
//!   {"name": "db1", "network": {"ip": "10.0.0.5", "ports": [22, {"https": 443}]}}
//!
//! flattens (with separator `.`) to
//!
//!   {"name": "db1", "network.ip": "10.0.0.5",
//!    "network.ports": [22], "network.ports.https": 443}
//!
//! Note that records nested inside a sequence are promoted to composite keys
//! and dropped from the stored sequence, so flattening is lossy for them.

use serde_json::{Map, Value};

/// Flatten a nested record into a single-level map with composite keys.
pub fn flatten(record: &Map<String, Value>, separator: &str) -> Map<String, Value> {
    flatten_into(record, "", separator)
}

fn flatten_into(record: &Map<String, Value>, parent_key: &str, separator: &str) -> Map<String, Value> {
    let mut flattened = Map::new();
    for (key, value) in record {
        let new_key = if parent_key.is_empty() {
            key.clone()
        } else {
            format!("{parent_key}{separator}{key}")
        };
        match value {
            Value::Object(nested) => {
                flattened.extend(flatten_into(nested, &new_key, separator));
            }
            Value::Array(items) => {
                let mut kept = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(nested) => {
                            flattened.extend(flatten_into(nested, &new_key, separator));
                        }
                        other => kept.push(other.clone()),
                    }
                }
                flattened.insert(new_key, Value::Array(kept));
            }
            other => {
                flattened.insert(new_key, other.clone());
            }
        }
    }
    flattened
}

/// Drop entries whose value is null.
pub fn clean(record: &Map<String, Value>) -> Map<String, Value> {
    record
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Merge two records recursively.
///
/// Null-valued entries are dropped from both sides first. A key present in
/// both is merged again when both values are objects; otherwise the first
/// record's value wins. Anything that is not a pair of objects comes back as
/// the first operand unchanged.
pub fn merge(first: &Value, second: &Value) -> Value {
    let (Value::Object(first_map), Value::Object(second_map)) = (first, second) else {
        return first.clone();
    };
    let first_map = clean(first_map);
    let second_map = clean(second_map);
    let mut merged = Map::new();
    for (key, value) in &first_map {
        match second_map.get(key) {
            Some(other) => merged.insert(key.clone(), merge(value, other)),
            None => merged.insert(key.clone(), value.clone()),
        };
    }
    for (key, value) in &second_map {
        if !first_map.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}
