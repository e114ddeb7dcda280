//! Flattening of nested records into dotted-path tokens.
//!
//! Only object-typed ancestors contribute to a path. Sequences are skipped
//! entirely and `null` leaves are omitted, so a marker for either remains
//! unresolved unless a fragment renderer supplies a value for it.

use crate::TokenMapping;
use serde_json::{Map, Number, Value};

/// Flattens a record into a fresh [`TokenMapping`].
pub fn flatten(record: &Value) -> TokenMapping {
    let mut tokens = TokenMapping::new();
    flatten_into(record, &mut tokens);
    tokens
}

/// Flattens a record into an existing mapping. Existing entries on the same
/// path are overwritten.
pub fn flatten_into(record: &Value, tokens: &mut TokenMapping) {
    if let Value::Object(map) = record {
        flatten_object(map, "", tokens);
    }
}

fn flatten_object(map: &Map<String, Value>, prefix: &str, tokens: &mut TokenMapping) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_object(inner, &path, tokens),
            Value::Null | Value::Array(_) => {}
            Value::String(s) => {
                tokens.insert(path, s.clone());
            }
            Value::Bool(b) => {
                tokens.insert(path, b.to_string());
            }
            Value::Number(n) => {
                tokens.insert(path, number_to_string(n));
            }
        }
    }
}

/// Stringifies a number without locale grouping. Integral floats drop their
/// trailing `.0` so `12.0` and `12` produce the same token.
fn number_to_string(n: &Number) -> String {
    if let Some(f) = n.as_f64().filter(|_| n.is_f64())
        && f.is_finite()
        && f.fract() == 0.0
        && f.abs() < 1e15
    {
        return format!("{}", f as i64);
    }
    n.to_string()
}

/// Rebuilds a nested record from a token mapping. Every leaf is a string.
///
/// A path whose prefix is already occupied by a leaf is skipped.
pub fn rehydrate(tokens: &TokenMapping) -> Value {
    let mut root = Map::new();
    'tokens: for (path, value) in tokens.iter() {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            continue;
        };
        let mut cursor = &mut root;
        for segment in segments {
            let Some(next) = cursor
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
            else {
                log::debug!("Skipping token '{}' while rehydrating: prefix is a leaf.", path);
                continue 'tokens;
            };
            cursor = next;
        }
        cursor.insert(leaf.to_string(), Value::String(value.to_string()));
    }
    Value::Object(root)
}
