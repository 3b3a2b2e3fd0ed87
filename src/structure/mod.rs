//! Response structure detection
//!
//! Classifies a decoded API response (bare array, paginated envelope, single
//! object) and locates the record array inside it. Nothing here fails: an
//! unrecognised shape is reported as `StructureType::Unknown` and yields no
//! records.

pub mod types;
pub mod detector;

pub use types::{PaginationInfo, StructureType};
pub use detector::{
    detect_pagination, detect_structure_type, extract_data_array, COUNT_KEYS, DATA_KEYS,
    PAGE_KEYS, TOTAL_PAGES_KEYS,
};
