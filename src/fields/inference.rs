//! Flat field inference from a representative record
//!
//! The first record is taken as the schema for the whole dataset. Fields that
//! only appear in later records are not reported.

use crate::fields::format::detect_format;
use crate::fields::types::{DetectedField, FieldType};
use serde_json::{Map, Value};

/// Detect the leaf fields of the first record in `records`.
///
/// Returns an empty list when there are no records or the first one is not an
/// object.
pub fn detect_fields(records: &[Value]) -> Vec<DetectedField> {
    let mut fields = Vec::new();

    if let Some(Value::Object(first)) = records.first() {
        walk_object(first, "", &mut fields);
    }

    fields
}

/// Recursively collect leaf fields below `prefix`
fn walk_object(obj: &Map<String, Value>, prefix: &str, fields: &mut Vec<DetectedField>) {
    for (key, value) in obj.iter() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(nested) => walk_object(nested, &path, fields),
            // Arrays of objects are unwrapped one level, using the first element
            Value::Array(arr) => match arr.first() {
                Some(Value::Object(element)) => walk_object(element, &path, fields),
                _ => fields.push(leaf_field(key, path, value)),
            },
            _ => fields.push(leaf_field(key, path, value)),
        }
    }
}

fn leaf_field(key: &str, path: String, value: &Value) -> DetectedField {
    let format = match value {
        Value::String(s) => detect_format(s).map(str::to_string),
        _ => None,
    };

    DetectedField {
        key: key.to_string(),
        is_nested: path.contains('.'),
        path,
        field_type: FieldType::of(value),
        sample: value.clone(),
        format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(fields: &[DetectedField]) -> Vec<&str> {
        fields.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_flat_record() {
        let records = vec![json!({"name": "Alice", "age": 30, "active": true, "nick": null})];
        let fields = detect_fields(&records);

        assert_eq!(paths(&fields), vec!["name", "age", "active", "nick"]);
        assert_eq!(fields[0].field_type, FieldType::String);
        assert_eq!(fields[1].field_type, FieldType::Number);
        assert_eq!(fields[2].field_type, FieldType::Boolean);
        assert_eq!(fields[3].field_type, FieldType::Null);
        assert!(fields.iter().all(|f| !f.is_nested));
    }

    #[test]
    fn test_nested_objects() {
        let records = vec![json!({
            "user": {"address": {"city": "Lima"}, "email": "a@b.co"}
        })];
        let fields = detect_fields(&records);

        assert_eq!(paths(&fields), vec!["user.address.city", "user.email"]);
        assert_eq!(fields[0].key, "city");
        assert!(fields[0].is_nested);
        assert_eq!(fields[0].sample, json!("Lima"));
        assert_eq!(fields[1].format.as_deref(), Some("email"));
    }

    #[test]
    fn test_first_record_only() {
        let records = vec![
            json!({"a": 1, "b": {"c": 2}}),
            json!({"a": 3, "b": {"c": 4, "d": 5}}),
        ];
        assert_eq!(paths(&detect_fields(&records)), vec!["a", "b.c"]);
    }

    #[test]
    fn test_array_of_objects_unwrapped() {
        let records = vec![json!({
            "orders": [{"id": 100, "amount": 9.5}, {"id": 101, "extra": 1}]
        })];
        let fields = detect_fields(&records);

        assert_eq!(paths(&fields), vec!["orders.id", "orders.amount"]);
        assert_eq!(fields[0].sample, json!(100));
    }

    #[test]
    fn test_arrays_that_stay_leaves() {
        let records = vec![json!({
            "tags": ["a", "b"],
            "empty": [],
            "matrix": [[{"x": 1}]]
        })];
        let fields = detect_fields(&records);

        assert_eq!(paths(&fields), vec!["tags", "empty", "matrix"]);
        assert!(fields.iter().all(|f| f.field_type == FieldType::Array));
        assert_eq!(fields[0].sample, json!(["a", "b"]));
    }

    #[test]
    fn test_empty_object_contributes_nothing() {
        let records = vec![json!({"meta": {}, "id": 1})];
        assert_eq!(paths(&detect_fields(&records)), vec!["id"]);
    }

    #[test]
    fn test_non_object_first_record() {
        assert!(detect_fields(&[]).is_empty());
        assert!(detect_fields(&[json!(1), json!({"a": 1})]).is_empty());
        assert!(detect_fields(&[json!([{"a": 1}])]).is_empty());
    }
}
