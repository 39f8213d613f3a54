//! DTOs for the GraphQL endpoint.

use serde::Deserialize;
use serde_json::{Map, Value};
use serde_with::{json::JsonString, serde_as};

use crate::execution::GraphQLRequest;

/// Query-string form of a GraphQL request (`GET /graphql`).
///
/// `variables` arrives as a JSON-encoded string and is decoded with
/// `serde_with`'s `JsonString`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLQueryParams {
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub operation_name: Option<String>,

    #[serde_as(as = "Option<JsonString>")]
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQLQueryParams {
    /// Whether the query string carries no document at all.
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().is_none_or(str::is_empty)
    }

    pub fn into_request(self) -> GraphQLRequest {
        GraphQLRequest {
            query: self.query.unwrap_or_default(),
            operation_name: self.operation_name.filter(|name| !name.is_empty()),
            variables: self.variables,
        }
    }
}
