use std::time::Duration;

/// Settings for fetching and previewing an API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Whole-request timeout for the outbound call
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Number of standardized rows returned by a preview
    pub preview_rows: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            timeout: Duration::from_secs(30),
            user_agent: format!("assay/{}", env!("CARGO_PKG_VERSION")),
            preview_rows: 100,
        }
    }
}
