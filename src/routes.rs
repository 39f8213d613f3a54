//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/graphql`  - GraphQL endpoint (POST JSON, GET query string, GraphiQL)
//! - `/schema`   - SDL export
//! - `/health`   - Health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, `GET`/`POST`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::http::Uri;
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::public_routes()
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("No such endpoint", json!({ "path": uri.path() }))
}
