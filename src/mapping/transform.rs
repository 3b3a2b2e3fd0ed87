use crate::mapping::types::{FieldMapping, StandardizedRecord};
use serde_json::Value;

/// Resolve a dotted path inside a record.
///
/// `None` means the path is missing: a segment does not exist, or an
/// intermediate value is not an object. Arrays are not traversed.
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| match current {
            Value::Object(obj) => obj.get(segment),
            _ => None,
        })
}

/// Flatten records according to the selected mappings, in mapping order
pub fn transform_data(records: &[Value], mappings: &[FieldMapping]) -> Vec<StandardizedRecord> {
    records
        .iter()
        .map(|record| transform_record(record, mappings))
        .collect()
}

fn transform_record(record: &Value, mappings: &[FieldMapping]) -> StandardizedRecord {
    let mut row = StandardizedRecord::new();

    for mapping in mappings.iter().filter(|m| m.is_selected) {
        if let Some(value) = resolve_path(record, &mapping.original_path) {
            row.insert(mapping.standard_name.clone(), value.clone());
        }
    }

    row
}
