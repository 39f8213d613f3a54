//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// No upstream request is made: the upstream check reports the configured
/// origin only, so a slow upstream never makes the service look unhealthy.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "schema": { "status": "ok", "message": "5 types registered" },
///     "upstream": { "status": "ok", "message": "Configured: http://api.reddit.com/" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            schema: CheckStatus::ok(format!("{} types registered", state.schema().type_count())),
            upstream: CheckStatus::ok(format!("Configured: {}", state.upstream_origin)),
        },
    })
}
