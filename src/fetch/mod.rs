//! Outbound API calls
//!
//! Builds the request (URL, enabled query parameters, headers, optional POST
//! body), sends it with `reqwest`, and decodes the JSON response.

pub mod error;
pub mod request;
pub mod client;

pub use error::FetchError;
pub use request::{FetchRequest, Header, HttpMethod, QueryParameter};
pub use client::{decode_body, HttpFetcher};
