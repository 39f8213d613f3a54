//! Upstream listing source trait and its failure kind.

use crate::domain::entities::ListingQuery;
use async_trait::async_trait;
use serde_json::Value;

/// The upstream could not produce a listing.
///
/// Every variant is the same failure kind as far as clients are concerned
/// (Upstream Unavailable); the variants only sharpen the log line.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream responded with status {0}")]
    Status(u16),

    #[error("Upstream body is not valid JSON: {0}")]
    Decode(String),

    #[error("Upstream payload has no `{0}`")]
    Shape(&'static str),
}

/// Source of raw listing entries.
///
/// One call performs exactly one outbound request. Implementations must not
/// cache, retry, or fall back.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::RedditClient`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches one page of the listing.
    ///
    /// # Returns
    ///
    /// The `data.children` array, each element still shaped `{ "data": { ... } }`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, non-2xx status,
    /// non-JSON body, or a body without `data.children`.
    async fn fetch_listing(&self, query: &ListingQuery) -> Result<Vec<Value>, UpstreamError>;
}
