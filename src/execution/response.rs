//! GraphQL response payload and error objects.

use async_graphql_parser::Pos;
use serde::Serialize;
use serde_json::Value;

use crate::domain::projection::ResolveError;
use crate::domain::repositories::UpstreamError;
use crate::execution::validation::ValidationError;

/// Machine-readable error category, reported in `extensions.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "UPSTREAM_UNAVAILABLE")]
    UpstreamUnavailable,
    #[serde(rename = "RESOLUTION_ERROR")]
    ResolutionError,
    #[serde(rename = "GRAPHQL_VALIDATION_FAILED")]
    ValidationFailed,
    #[serde(rename = "GRAPHQL_PARSE_FAILED")]
    ParseFailed,
}

/// One step of a response path: an object key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Field(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl From<Pos> for Location {
    fn from(pos: Pos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorExtensions {
    pub code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,

    pub extensions: ErrorExtensions,
}

impl GraphQLError {
    fn new(code: ErrorCode, message: String) -> Self {
        Self {
            message,
            locations: Vec::new(),
            path: Vec::new(),
            extensions: ErrorExtensions { code },
        }
    }

    pub fn parse(error: &async_graphql_parser::Error) -> Self {
        let mut e = Self::new(ErrorCode::ParseFailed, error.to_string());
        e.locations = error.positions().map(Location::from).collect();
        e
    }

    pub fn validation(error: &ValidationError) -> Self {
        let mut e = Self::new(ErrorCode::ValidationFailed, error.to_string());
        e.locations = error.positions().into_iter().map(Location::from).collect();
        e
    }

    pub fn upstream(error: &UpstreamError, path: Vec<PathSegment>, pos: Pos) -> Self {
        let mut e = Self::new(
            ErrorCode::UpstreamUnavailable,
            format!("Upstream unavailable: {error}"),
        );
        e.locations = vec![pos.into()];
        e.path = path;
        e
    }

    pub fn resolution(error: &ResolveError, path: Vec<PathSegment>, pos: Pos) -> Self {
        let mut e = Self::new(ErrorCode::ResolutionError, error.to_string());
        e.locations = vec![pos.into()];
        e.path = path;
        e
    }

    pub fn code(&self) -> ErrorCode {
        self.extensions.code
    }
}

/// The result of executing one request.
///
/// `data` is absent when the request never reached execution (parse or
/// validation failure).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}

impl GraphQLResponse {
    pub fn from_error(error: GraphQLError) -> Self {
        Self {
            data: None,
            errors: vec![error],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_serialization() {
        let error = GraphQLError::resolution(
            &ResolveError::missing("data.preview"),
            vec!["articles".into(), 0.into(), "preview".into()],
            Pos { line: 1, column: 20 },
        );

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "message": "Missing `data.preview` in upstream payload",
                "locations": [{ "line": 1, "column": 20 }],
                "path": ["articles", 0, "preview"],
                "extensions": { "code": "RESOLUTION_ERROR" }
            })
        );
    }

    #[test]
    fn test_response_omits_empty_parts() {
        let ok = GraphQLResponse {
            data: Some(json!({ "articles": [] })),
            errors: vec![],
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "data": { "articles": [] } })
        );

        let failed = GraphQLResponse::from_error(GraphQLError::upstream(
            &UpstreamError::Timeout,
            vec!["articles".into()],
            Pos { line: 1, column: 3 },
        ));
        let value = serde_json::to_value(&failed).unwrap();
        assert!(value.get("data").is_none());
        assert_eq!(value["errors"][0]["extensions"]["code"], "UPSTREAM_UNAVAILABLE");
    }
}
