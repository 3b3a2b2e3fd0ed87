//! Field mapping and transformation
//!
//! Each detected field gets a `FieldMapping` (selected, heuristically named).
//! The transform turns nested source records into flat rows keyed by standard
//! name, and the export helpers serialize those rows.

pub mod types;
pub mod naming;
pub mod transform;
pub mod export;

pub use types::{FieldMapping, MappingError, MappingSet, StandardizedRecord};
pub use naming::{generate_standard_name, to_snake_case, STANDARD_NAMES};
pub use transform::{resolve_path, transform_data};
pub use export::{csv_header, to_csv, to_json_pretty, write_csv};
