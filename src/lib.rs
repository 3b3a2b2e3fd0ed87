//! # Assay - API Response Explorer
//!
//! Turns an arbitrary JSON API response into a flat, renamable table without
//! any prior schema knowledge.
//!
//! ## Modules
//!
//! - **structure**: classify the response and find the record array
//! - **fields**: infer dotted-path leaf fields from the first record
//! - **mapping**: standard names, selection, transform and export
//! - **fetch**: the outbound HTTP call
//! - **session**: the stateful explorer driving all of the above
//!
//! ## Quick Start
//!
//! ### Offline analysis
//!
//! ```rust
//! use assay::{analyze, MappingSet, transform_data};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "data": [
//!         {"full_name": "Ana Gómez", "email": "ana@x.com"},
//!         {"full_name": "Luis Díaz", "email": "luis@x.com"}
//!     ],
//!     "total": 2
//! });
//!
//! let analysis = analyze(&raw);
//! let mappings = MappingSet::from_fields(&analysis.detected_fields);
//! let rows = transform_data(&analysis.records, mappings.as_slice());
//!
//! assert_eq!(rows[0]["nombre_completo"], "Ana Gómez");
//! assert_eq!(rows[1]["correo"], "luis@x.com");
//! ```
//!
//! ### Live session
//!
//! ```no_run
//! use assay::{ExplorerConfig, ExplorerSession, HttpFetcher};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ExplorerConfig::default();
//! let fetcher = HttpFetcher::new(&config)?;
//! let mut session = ExplorerSession::new(&config);
//!
//! session.set_url("https://api.example.com/users");
//! session.add_param("page", "1");
//! session.fetch(&fetcher).await;
//!
//! session.rename_field("email", "correo_electronico")?;
//! println!("{}", session.export_csv()?);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod fetch;
pub mod fields;
pub mod mapping;
pub mod session;
pub mod structure;

// Re-export commonly used types for convenience
pub use analysis::{analyze, Analysis};
pub use config::ExplorerConfig;
pub use fetch::{FetchError, FetchRequest, HttpFetcher, HttpMethod, QueryParameter};
pub use fields::{detect_fields, DetectedField, FieldType};
pub use mapping::{
    generate_standard_name, transform_data, FieldMapping, MappingError, MappingSet,
    StandardizedRecord,
};
pub use session::{Action, ExplorerSession, FetchOutcome, FetchTicket, SessionError};
pub use structure::{
    detect_pagination, detect_structure_type, extract_data_array, PaginationInfo, StructureType,
};
