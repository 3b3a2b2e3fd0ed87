use crate::structure::types::{PaginationInfo, StructureType};
use serde_json::{Map, Value};
use tracing::debug;

/// Keys that conventionally hold the record array, in priority order
pub const DATA_KEYS: &[&str] = &[
    "data", "results", "items", "records", "content", "list", "objects", "rows",
];

/// Keys that conventionally hold the total record count, in priority order
pub const COUNT_KEYS: &[&str] = &[
    "total",
    "count",
    "total_count",
    "totalCount",
    "total_results",
    "totalResults",
    "total_items",
    "totalItems",
];

/// Keys that conventionally hold the current page, in priority order
pub const PAGE_KEYS: &[&str] = &["page", "current_page", "currentPage", "page_number", "pageNumber"];

/// Keys that conventionally hold the number of pages, in priority order
pub const TOTAL_PAGES_KEYS: &[&str] = &[
    "total_pages",
    "totalPages",
    "pages",
    "page_count",
    "pageCount",
    "last_page",
    "lastPage",
];

/// Classify the overall shape of a decoded response
pub fn detect_structure_type(value: &Value) -> StructureType {
    match value {
        Value::Array(_) => StructureType::Array,
        Value::Object(obj) => {
            if find_data_key(obj).is_some() {
                StructureType::Paginated
            } else {
                StructureType::SingleObject
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            StructureType::Unknown
        }
    }
}

/// Locate pagination metadata among an object's top-level keys.
///
/// Each keyword list is scanned independently and the first key in declared
/// order that is present wins. Non-object inputs are never paginated.
pub fn detect_pagination(value: &Value) -> PaginationInfo {
    let obj = match value {
        Value::Object(obj) => obj,
        _ => return PaginationInfo::default(),
    };

    let data_key = find_data_key(obj).map(str::to_string);
    let info = PaginationInfo {
        is_paginated: data_key.is_some(),
        data_key,
        count_key: first_present(obj, COUNT_KEYS),
        page_key: first_present(obj, PAGE_KEYS),
        total_pages_key: first_present(obj, TOTAL_PAGES_KEYS),
    };

    debug!(
        is_paginated = info.is_paginated,
        data_key = ?info.data_key,
        count_key = ?info.count_key,
        page_key = ?info.page_key,
        total_pages_key = ?info.total_pages_key,
        "Detected pagination envelope"
    );

    info
}

/// Pull the list of records out of a response.
///
/// A single object becomes a one-element list so callers always work on a
/// list of records.
pub fn extract_data_array(
    value: &Value,
    structure: StructureType,
    pagination: &PaginationInfo,
) -> Vec<Value> {
    match (structure, value) {
        (StructureType::Array, Value::Array(arr)) => arr.clone(),
        (StructureType::Paginated, Value::Object(obj)) => pagination
            .data_key
            .as_deref()
            .and_then(|key| obj.get(key))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        (StructureType::SingleObject, Value::Object(_)) => vec![value.clone()],
        _ => Vec::new(),
    }
}

/// First data-container key whose value is an array
fn find_data_key(obj: &Map<String, Value>) -> Option<&'static str> {
    DATA_KEYS
        .iter()
        .copied()
        .find(|key| matches!(obj.get(*key), Some(Value::Array(_))))
}

fn first_present(obj: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|key| obj.contains_key(**key))
        .map(|key| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structure_of_primitives() {
        assert_eq!(detect_structure_type(&Value::Null), StructureType::Unknown);
        assert_eq!(detect_structure_type(&json!(true)), StructureType::Unknown);
        assert_eq!(detect_structure_type(&json!(42)), StructureType::Unknown);
        assert_eq!(detect_structure_type(&json!("text")), StructureType::Unknown);
    }

    #[test]
    fn test_structure_of_array() {
        assert_eq!(detect_structure_type(&json!([])), StructureType::Array);
        assert_eq!(detect_structure_type(&json!([{"id": 1}])), StructureType::Array);
    }

    #[test]
    fn test_structure_of_envelope() {
        let value = json!({"results": [{"id": 1}], "count": 1});
        assert_eq!(detect_structure_type(&value), StructureType::Paginated);
    }

    #[test]
    fn test_data_key_must_hold_array() {
        // "data" is an object here, so this is a single record
        let value = json!({"data": {"id": 1}});
        assert_eq!(detect_structure_type(&value), StructureType::SingleObject);
        assert_eq!(detect_pagination(&value), PaginationInfo::default());
    }

    #[test]
    fn test_data_key_priority() {
        let value = json!({"results": [{"a": 1}], "data": [{"b": 2}]});
        let info = detect_pagination(&value);
        assert!(info.is_paginated);
        assert_eq!(info.data_key.as_deref(), Some("data"));

        let records = extract_data_array(&value, detect_structure_type(&value), &info);
        assert_eq!(records, vec![json!({"b": 2})]);
    }

    #[test]
    fn test_metadata_keys() {
        let value = json!({
            "items": [],
            "totalCount": 40,
            "count": 10,
            "currentPage": 2,
            "last_page": 4
        });
        let info = detect_pagination(&value);
        assert_eq!(info.data_key.as_deref(), Some("items"));
        assert_eq!(info.count_key.as_deref(), Some("count"));
        assert_eq!(info.page_key.as_deref(), Some("currentPage"));
        assert_eq!(info.total_pages_key.as_deref(), Some("last_page"));
    }

    #[test]
    fn test_metadata_without_data_key() {
        let value = json!({"total": 3, "page": 1});
        let info = detect_pagination(&value);
        assert!(!info.is_paginated);
        assert!(info.data_key.is_none());
        assert_eq!(info.count_key.as_deref(), Some("total"));
    }

    #[test]
    fn test_pagination_of_array() {
        assert_eq!(detect_pagination(&json!([1, 2])), PaginationInfo::default());
    }

    #[test]
    fn test_extract_single_object() {
        let value = json!({"id": 1, "name": "x"});
        let info = detect_pagination(&value);
        let records = extract_data_array(&value, StructureType::SingleObject, &info);
        assert_eq!(records, vec![value]);
    }

    #[test]
    fn test_extract_unknown_is_empty() {
        let value = json!("nope");
        let records = extract_data_array(&value, StructureType::Unknown, &PaginationInfo::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_extract_paginated_missing_key() {
        let value = json!({"rows": [1]});
        let info = PaginationInfo {
            is_paginated: true,
            data_key: Some("data".to_string()),
            ..Default::default()
        };
        assert!(extract_data_array(&value, StructureType::Paginated, &info).is_empty());
    }
}
