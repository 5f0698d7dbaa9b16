//! Shared test utilities for the zerosight workspace.
//!
//! Reports carry wall-clock timestamps whenever the CLI mutates them, so golden comparisons
//! replace those fields with a fixed placeholder first.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

/// Timestamp keys of reports, comments and activity entries.
const TIMESTAMP_KEYS: [&str; 6] = [
    "createdAt",
    "updatedAt",
    "submittedAt",
    "reviewedAt",
    "closedAt",
    "timestamp",
];

/// Replace every timestamp field, at any depth, with [`TIMESTAMP_PLACEHOLDER`].
///
/// Only string values are replaced; a key that holds an object or array is descended into.
pub fn normalize_timestamps(mut value: Value) -> Value {
    normalize_recursive(&mut value);
    value
}

fn normalize_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if val.is_string() && TIMESTAMP_KEYS.contains(&key.as_str()) {
                    *val = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                } else {
                    normalize_recursive(val);
                }
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val);
            }
        }
        _ => {}
    }
}
