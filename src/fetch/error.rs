//! Error types for the outbound API call.

use thiserror::Error;

/// Errors that can occur while fetching and decoding an API response.
///
/// Whatever the variant, the session reports it as a single message and runs
/// no detection.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A request header name or value was rejected.
    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    /// Transport failure (connection, TLS, timeout, reading the body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The body was not valid JSON.
    #[error("Response is not valid JSON: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
