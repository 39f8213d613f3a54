//! HTTP client for the Reddit `/top` listing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::ListingQuery;
use crate::domain::repositories::{ListingSource, UpstreamError};

const LISTING_PATH: &str = "top";

/// [`ListingSource`] backed by the public Reddit JSON API.
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct RedditClient {
    http: Client,
    base_url: Url,
}

impl RedditClient {
    /// Creates a client for `base_url` (e.g. `http://api.reddit.com`).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidUrl`] if `base_url` does not parse or is
    /// not http(s), and [`UpstreamError::Transport`] if the TLS backend fails
    /// to initialize.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, UpstreamError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| UpstreamError::InvalidUrl(format!("{base_url}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                base_url.scheme()
            )));
        }

        // `join` replaces the last segment unless the path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Origin the client talks to, for health reporting.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/top?limit=..&before=..&after=..`.
    ///
    /// All three parameters are always present; absent values render empty.
    pub fn listing_url(&self, query: &ListingQuery) -> Result<Url, UpstreamError> {
        let mut url = self
            .base_url
            .join(LISTING_PATH)
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .extend_pairs(query.query_pairs().iter().map(|(k, v)| (*k, v.as_str())));

        Ok(url)
    }
}

/// Pulls `data.children` out of a listing body.
fn extract_children(body: Value) -> Result<Vec<Value>, UpstreamError> {
    match body {
        Value::Object(mut root) => match root.remove("data") {
            Some(Value::Object(mut data)) => match data.remove("children") {
                Some(Value::Array(children)) => Ok(children),
                _ => Err(UpstreamError::Shape("data.children")),
            },
            _ => Err(UpstreamError::Shape("data")),
        },
        _ => Err(UpstreamError::Shape("data")),
    }
}

#[async_trait]
impl ListingSource for RedditClient {
    async fn fetch_listing(&self, query: &ListingQuery) -> Result<Vec<Value>, UpstreamError> {
        let url = self.listing_url(query)?;
        debug!(url = %url, "Fetching upstream listing");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Upstream request failed");
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            warn!(url = %url, error = %e, "Upstream body is not JSON");
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Decode(e.to_string())
            }
        })?;

        let children = extract_children(body)?;
        debug!(count = children.len(), "Fetched upstream listing");
        Ok(children)
    }
}
