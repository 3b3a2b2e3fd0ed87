//! One analysis pass over a decoded response: detect the structure, pull out
//! the records, infer fields from the first one.

use crate::fields::{detect_fields, DetectedField};
use crate::structure::{
    detect_pagination, detect_structure_type, extract_data_array, PaginationInfo, StructureType,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub structure_type: StructureType,
    pub pagination: PaginationInfo,
    #[serde(skip)]
    pub records: Vec<Value>,
    pub detected_fields: Vec<DetectedField>,
}

/// Detect, extract and infer. Never fails; unrecognised input yields an
/// analysis with no records and no fields.
pub fn analyze(raw: &Value) -> Analysis {
    let structure_type = detect_structure_type(raw);
    let pagination = detect_pagination(raw);
    let records = extract_data_array(raw, structure_type, &pagination);
    let detected_fields = detect_fields(&records);

    debug!(
        structure = %structure_type,
        records = records.len(),
        fields = detected_fields.len(),
        "Analyzed response"
    );

    Analysis {
        structure_type,
        pagination,
        records,
        detected_fields,
    }
}
