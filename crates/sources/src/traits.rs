//! Source adapter trait definition and shared error types.

use huntbot_core::JobRecord;

/// Errors a source adapter may report. The aggregator absorbs all of them.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// A job origin queried with a search phrase and a location.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fetch raw postings for one query/location pair.
    async fn fetch(&self, query: &str, location: &str) -> Result<Vec<JobRecord>, SourceError>;

    /// Human-readable adapter name (e.g., "linkedin", "indeed").
    fn name(&self) -> &str;
}
