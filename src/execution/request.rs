//! Incoming GraphQL request payload.

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

/// A GraphQL request as posted by clients.
///
/// ```json
/// { "query": "{ articles(limit: 5) { id title } }", "operationName": null, "variables": {} }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,

    #[serde(default)]
    pub operation_name: Option<String>,

    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let request: GraphQLRequest = serde_json::from_value(json!({
            "query": "query A { articles { id } }",
            "operationName": "A",
            "variables": { "limit": 3 }
        }))
        .unwrap();

        assert_eq!(request.operation_name.as_deref(), Some("A"));
        assert_eq!(request.variables.unwrap()["limit"], json!(3));
    }

    #[test]
    fn test_null_variables() {
        let request: GraphQLRequest =
            serde_json::from_value(json!({ "query": "{ articles { id } }", "variables": null }))
                .unwrap();
        assert!(request.variables.is_none());
    }

    #[test]
    fn test_empty_query_fails_validation() {
        assert!(GraphQLRequest::new("").validate().is_err());
        assert!(GraphQLRequest::new("{ articles { id } }").validate().is_ok());
    }
}
