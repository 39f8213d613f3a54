//! Handlers for the GraphQL endpoint.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::graphql::GraphQLQueryParams;
use crate::error::AppError;
use crate::execution::{GraphQLRequest, GraphQLResponse};
use crate::state::AppState;
use crate::web::handlers::graphiql_handler;

/// Executes a GraphQL request sent as a JSON body.
///
/// # Endpoint
///
/// `POST /graphql`
///
/// # Request Body
///
/// ```json
/// {
///   "query": "query Top($n: Int) { articles(limit: $n) { id title } }",
///   "operationName": "Top",
///   "variables": { "n": 5 }
/// }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: The request was executed, or rejected by the GraphQL parser
///   or validator. Failures are listed in `errors`.
/// - **400 Bad Request**: The body is not a GraphQL request.
pub async fn graphql_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<GraphQLRequest>, JsonRejection>,
) -> Result<Json<GraphQLResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    Ok(Json(state.executor.execute(request).await))
}

/// Executes a GraphQL request sent as query parameters.
///
/// # Endpoint
///
/// `GET /graphql?query=...&operationName=...&variables=...`
///
/// `variables` is a JSON-encoded object. A browser request (`Accept:
/// text/html`) without `query` gets the GraphiQL IDE instead, unless it is
/// disabled.
///
/// # Response Codes
///
/// - **200 OK**: GraphQL response or GraphiQL page
/// - **400 Bad Request**: Missing `query` or malformed `variables`
pub async fn graphql_get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<GraphQLQueryParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;

    if params.is_empty() {
        if state.graphiql && accepts_html(&headers) {
            return Ok(graphiql_handler().await.into_response());
        }
        return Err(AppError::bad_request(
            "Missing GraphQL query",
            json!({ "parameter": "query" }),
        ));
    }

    let response = state.executor.execute(params.into_request()).await;
    Ok(Json(response).into_response())
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
