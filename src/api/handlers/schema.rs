//! Handler for the schema endpoint.

use axum::extract::State;

use crate::state::AppState;

/// Returns the type graph as GraphQL SDL.
///
/// # Endpoint
///
/// `GET /schema`
pub async fn schema_handler(State(state): State<AppState>) -> String {
    state.schema().sdl()
}
