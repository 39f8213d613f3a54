//! Root query entry point for article listings.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::ListingQuery;
use crate::domain::repositories::{ListingSource, UpstreamError};

/// Serves the `articles` root field.
///
/// Delegates straight to the listing source: no argument range checks, no
/// caching. The returned entries are raw; the executor narrows them to the
/// client's selection afterwards.
pub struct ArticleService {
    source: Arc<dyn ListingSource>,
}

impl ArticleService {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }

    /// Fetches one page of articles.
    ///
    /// # Errors
    ///
    /// Propagates [`UpstreamError`] unchanged.
    pub async fn articles(&self, query: &ListingQuery) -> Result<Vec<Value>, UpstreamError> {
        match self.source.fetch_listing(query).await {
            Ok(entries) => {
                debug!(count = entries.len(), ?query, "Fetched articles");
                Ok(entries)
            }
            Err(e) => {
                warn!(error = %e, ?query, "Upstream listing unavailable");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockListingSource;
    use mockall::predicate::eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_articles_forwards_arguments_verbatim() {
        let query = ListingQuery::new(Some(0), Some("t3_b".to_string()), None);

        let mut source = MockListingSource::new();
        source
            .expect_fetch_listing()
            .with(eq(query.clone()))
            .times(1)
            .returning(|_| Ok(vec![json!({ "data": { "id": "a" } })]));

        let service = ArticleService::new(Arc::new(source));
        let entries = service.articles(&query).await.unwrap();

        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_articles_propagates_upstream_error() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_listing()
            .times(1)
            .returning(|_| Err(UpstreamError::Status(503)));

        let service = ArticleService::new(Arc::new(source));
        let result = service.articles(&ListingQuery::default()).await;

        assert!(matches!(result, Err(UpstreamError::Status(503))));
    }
}
