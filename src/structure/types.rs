use serde::{Deserialize, Serialize};

/// Overall shape of an API response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// A JSON array at the root
    Array,
    /// An object wrapping the records under a data-container key
    Paginated,
    /// Any other object, treated as one record
    SingleObject,
    /// Null or a bare primitive
    #[default]
    Unknown,
}

impl StructureType {
    pub fn as_str(self) -> &'static str {
        match self {
            StructureType::Array => "array",
            StructureType::Paginated => "paginated",
            StructureType::SingleObject => "single_object",
            StructureType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StructureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination metadata located among a response object's top-level keys.
///
/// `data_key` is `Some` exactly when `is_paginated` is true, and always names
/// a key whose value is an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub is_paginated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages_key: Option<String>,
}
