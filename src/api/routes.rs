//! API route configuration.

use crate::api::handlers::{
    graphql_get_handler, graphql_post_handler, health_handler, schema_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes. None require authentication.
///
/// # Endpoints
///
/// - `POST /graphql` - Execute a GraphQL request (JSON body)
/// - `GET  /graphql` - Execute a GraphQL request (query string), or GraphiQL
/// - `GET  /schema`  - Schema as SDL
/// - `GET  /health`  - Health check
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/graphql",
            get(graphql_get_handler).post(graphql_post_handler),
        )
        .route("/schema", get(schema_handler))
        .route("/health", get(health_handler))
}
