use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime type of a sample value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
    /// A value that is absent altogether. No decoded JSON value has this type.
    Undefined,
}

impl FieldType {
    /// Classify a value: null first, then arrays, then objects, then primitives
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => FieldType::Null,
            Value::Array(_) => FieldType::Array,
            Value::Object(_) => FieldType::Object,
            Value::Bool(_) => FieldType::Boolean,
            Value::Number(_) => FieldType::Number,
            Value::String(_) => FieldType::String,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Null => "null",
            FieldType::Undefined => "undefined",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf field found in the representative record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedField {
    /// Final path segment, e.g. "city"
    pub key: String,

    /// Dot-joined address from the record root, e.g. "user.address.city"
    pub path: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field sits below the record root
    pub is_nested: bool,

    /// The value seen in the representative record
    pub sample: Value,

    /// Format hint for string samples (email, date, uuid, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}
