//! Field inference
//!
//! Walks one representative record and produces the flat list of leaf fields,
//! addressed by dotted path.

pub mod types;
pub mod format;
pub mod inference;

pub use types::{DetectedField, FieldType};
pub use format::detect_format;
pub use inference::detect_fields;
