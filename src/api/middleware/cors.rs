//! Cross-origin access for browser clients.

use axum::http::Method;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Creates the CORS layer for the GraphQL endpoint.
///
/// The service is read-only and unauthenticated, so any origin may call it:
/// - Any origin
/// - `GET` and `POST`
/// - Any request header
/// - 1 hour preflight max age
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}
