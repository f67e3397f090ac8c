//! Lenient deserializers for create payloads.
//!
//! Create payloads never fail to deserialize because of a field's JSON type: the
//! value is coerced (numbers and booleans become strings, numeric strings become
//! integers) or dropped, and the field validators report the problem instead.
//! Use together with `#[serde(default)]` so that missing fields behave like empty
//! ones.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn coerce_string(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Deserializes any scalar into a `String`, leaving it untouched.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_string(value))
}

/// Deserializes any scalar into a `String` with surrounding whitespace removed.
pub fn trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_string(value).trim().to_string())
}

/// Deserializes an integer given as a JSON number or a numeric string.
///
/// Anything else (fractions, words, objects) yields `None`.
pub fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "trimmed_string")]
        name: String,
        #[serde(default, deserialize_with = "lenient_string")]
        reference: String,
        #[serde(default, deserialize_with = "lenient_int")]
        age: Option<i64>,
    }

    fn parse(value: Value) -> Payload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_trims_strings() {
        let payload = parse(json!({ "name": "  Lincoln High  " }));
        assert_eq!(payload.name, "Lincoln High");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let payload = parse(json!({}));
        assert_eq!(payload.name, "");
        assert_eq!(payload.reference, "");
        assert_eq!(payload.age, None);
    }

    #[test]
    fn test_null_is_empty() {
        let payload = parse(json!({ "name": null, "age": null }));
        assert_eq!(payload.name, "");
        assert_eq!(payload.age, None);
    }

    #[test]
    fn test_numbers_become_strings() {
        let payload = parse(json!({ "name": 12345, "reference": true }));
        assert_eq!(payload.name, "12345");
        assert_eq!(payload.reference, "true");
    }

    #[test]
    fn test_reference_is_not_trimmed() {
        let payload = parse(json!({ "reference": " abc " }));
        assert_eq!(payload.reference, " abc ");
    }

    #[test]
    fn test_int_from_number_and_string() {
        assert_eq!(parse(json!({ "age": 12 })).age, Some(12));
        assert_eq!(parse(json!({ "age": "42" })).age, Some(42));
        assert_eq!(parse(json!({ "age": 7.0 })).age, Some(7));
    }

    #[test]
    fn test_int_rejects_non_integers() {
        assert_eq!(parse(json!({ "age": 7.5 })).age, None);
        assert_eq!(parse(json!({ "age": "seven" })).age, None);
        assert_eq!(parse(json!({ "age": [7] })).age, None);
    }
}
