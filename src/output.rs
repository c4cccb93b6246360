//! JSON rendering of extraction results.
//!
//! Converts [`Field`] values and result trees into `serde_json` values and
//! strings. Missing fields become `null`; records keep their keys (the
//! underlying JSON map is sorted, so output is deterministic).

use serde_json::Value;

use crate::value::{Field, ResultTree};

/// Convert a single field into a JSON value.
pub fn field_to_json(field: &Field) -> Value {
    match field {
        Field::Missing => Value::Null,
        Field::Text(text) => Value::String(text.clone()),
        Field::List(items) => Value::Array(items.iter().map(field_to_json).collect()),
        Field::Record(record) => Value::Object(
            record
                .iter()
                .map(|(key, value)| (key.clone(), field_to_json(value)))
                .collect(),
        ),
    }
}

/// Convert a whole extraction result into a JSON object.
pub fn result_to_json(result: &ResultTree) -> Value {
    Value::Object(
        result
            .iter()
            .map(|(name, fields)| {
                (
                    name.clone(),
                    Value::Array(fields.iter().map(field_to_json).collect()),
                )
            })
            .collect(),
    )
}

/// Compact JSON string for an extraction result.
pub fn to_json(result: &ResultTree) -> String {
    result_to_json(result).to_string()
}

/// Pretty-printed JSON string for an extraction result.
pub fn to_json_pretty(result: &ResultTree) -> String {
    let value = result_to_json(result);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

#[test]
fn test_field_to_json() {
    use indexmap::IndexMap;

    assert_eq!(field_to_json(&Field::Missing), Value::Null);
    assert_eq!(
        field_to_json(&Field::Text("hi".into())),
        Value::String("hi".into())
    );

    let mut record = IndexMap::new();
    record.insert("year".to_string(), Field::Text("2024".into()));
    record.insert("month".to_string(), Field::Missing);
    let json = field_to_json(&Field::Record(record));
    assert_eq!(json["year"], Value::String("2024".into()));
    assert_eq!(json["month"], Value::Null);
}
