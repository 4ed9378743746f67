//! Canonical re-serialization of response bodies.
//!
//! Object keys are emitted in sorted order, so two documents that differ
//! only in key order or whitespace normalize to the same string. Bodies
//! that are not valid JSON pass through untouched.

use serde_json::{Map, Value};

/// Compact canonical form used for equality checks
pub fn normalize_json(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => canonicalize(value).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Pretty-printed canonical form used for display
pub fn format_json(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => {
            serde_json::to_string_pretty(&canonicalize(value)).unwrap_or_else(|_| raw.to_string())
        }
        Err(_) => raw.to_string(),
    }
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_whitespace() {
        let raw = "{\n  \"id\": 1,\n  \"tags\": [ \"a\", \"b\" ]\n}";
        assert_eq!(normalize_json(raw), r#"{"id":1,"tags":["a","b"]}"#);
    }

    #[test]
    fn test_normalize_ignores_key_order() {
        assert_eq!(
            normalize_json(r#"{"a":1,"b":2}"#),
            normalize_json(r#"{"b":2,"a":1}"#)
        );
        assert_eq!(
            normalize_json(r#"{"outer":{"z":true,"y":null}}"#),
            r#"{"outer":{"y":null,"z":true}}"#
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            r#"{"b": [1, 2, {"d": 4, "c": 3}], "a": "x"}"#,
            "[ ]",
            "42",
            "\"text\"",
            "not json at all",
        ];

        for raw in samples {
            let once = normalize_json(raw);
            assert_eq!(normalize_json(&once), once, "input: {}", raw);
        }
    }

    #[test]
    fn test_invalid_json_is_identity() {
        for raw in ["", "<html>oops</html>", "{\"a\":", "  padded  "] {
            assert_eq!(normalize_json(raw), raw);
            assert_eq!(format_json(raw), raw);
        }
    }

    #[test]
    fn test_array_order_is_significant() {
        assert_ne!(normalize_json("[1,2]"), normalize_json("[2,1]"));
    }

    #[test]
    fn test_large_integers_keep_their_digits() {
        let a = normalize_json(r#"{"id":12345678901234567890123}"#);
        let b = normalize_json(r#"{"id":12345678901234567890124}"#);

        assert_ne!(a, b);
        assert_eq!(a, r#"{"id":12345678901234567890123}"#);
        assert_eq!(
            format_json(r#"{"id": 12345678901234567890123}"#),
            "{\n  \"id\": 12345678901234567890123\n}"
        );
    }

    #[test]
    fn test_format_json_pretty_prints() {
        let formatted = format_json(r#"{"b":2,"a":{"c":[1]}}"#);
        assert_eq!(
            formatted,
            "{\n  \"a\": {\n    \"c\": [\n      1\n    ]\n  },\n  \"b\": 2\n}"
        );
    }
}
