//! Selection-driven query execution.

use std::sync::Arc;

use async_graphql_parser::parse_query;
use async_graphql_value::ConstValue;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::application::services::ArticleService;
use crate::domain::entities::ListingQuery;
use crate::domain::projection::ResolveError;
use crate::domain::repositories::ListingSource;
use crate::execution::request::GraphQLRequest;
use crate::execution::response::{GraphQLError, GraphQLResponse, PathSegment};
use crate::execution::validation::{DocumentValidator, ValidatedField};
use crate::graph::{FieldDef, Resolve, Schema, TypeRef};

/// Executes GraphQL requests against the type graph.
///
/// Per request: parse, validate (no I/O), then one upstream fetch per root
/// `articles` field, after which every remaining field is resolved
/// synchronously. Resolvers for unselected fields are never called.
pub struct Executor {
    schema: Arc<Schema>,
    articles: ArticleService,
}

impl Executor {
    pub fn new(schema: Arc<Schema>, source: Arc<dyn ListingSource>) -> Self {
        Self {
            schema,
            articles: ArticleService::new(source),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Runs one request to completion.
    ///
    /// Never fails as a whole: parse and validation failures come back as a
    /// response without `data`, execution failures as `null` fields plus
    /// entries in `errors`.
    #[instrument(
        name = "Executor::execute",
        skip_all,
        fields(operation = request.operation_name.as_deref())
    )]
    pub async fn execute(&self, request: GraphQLRequest) -> GraphQLResponse {
        let document = match parse_query(&request.query) {
            Ok(document) => document,
            Err(e) => {
                debug!(error = %e, "Rejected unparsable document");
                return GraphQLResponse::from_error(GraphQLError::parse(&e));
            }
        };

        let validator =
            DocumentValidator::new(&self.schema, request.operation_name, request.variables);
        let operation = match validator.validate(document) {
            Ok(operation) => operation,
            Err(e) => {
                debug!(error = %e, "Rejected invalid document");
                return GraphQLResponse::from_error(GraphQLError::validation(&e));
            }
        };

        let mut errors = Vec::new();
        let mut data = Map::new();
        for field in &operation.fields {
            let value = self.resolve_root_field(field, &mut errors).await;
            data.insert(field.response_key().to_string(), value);
        }

        if !errors.is_empty() {
            debug!(count = errors.len(), "Executed with field errors");
        }

        GraphQLResponse {
            data: Some(Value::Object(data)),
            errors,
        }
    }

    async fn resolve_root_field(
        &self,
        field: &ValidatedField,
        errors: &mut Vec<GraphQLError>,
    ) -> Value {
        let query_type = self.schema.query();
        if field.is_typename() {
            return Value::String(query_type.name.to_string());
        }

        let path = vec![PathSegment::from(field.response_key())];
        let Some(definition) = query_type.field(field.name.as_str()) else {
            return Value::Null;
        };

        match &definition.resolve {
            Resolve::Upstream => match self.articles.articles(&listing_query(field)).await {
                Ok(entries) => {
                    self.complete_value(&definition.ty, Value::Array(entries), field, &path, errors)
                }
                Err(e) => {
                    errors.push(GraphQLError::upstream(&e, path, field.pos));
                    Value::Null
                }
            },
            Resolve::Projection(_) => self.resolve_field(definition, &Value::Null, field, path, errors),
        }
    }

    fn resolve_field(
        &self,
        definition: &FieldDef,
        parent: &Value,
        field: &ValidatedField,
        path: Vec<PathSegment>,
        errors: &mut Vec<GraphQLError>,
    ) -> Value {
        let Resolve::Projection(resolver) = &definition.resolve else {
            return Value::Null;
        };

        match resolver(parent) {
            Ok(value) => self.complete_value(&definition.ty, value, field, &path, errors),
            Err(e) => {
                errors.push(GraphQLError::resolution(&e, path, field.pos));
                Value::Null
            }
        }
    }

    fn complete_value(
        &self,
        ty: &TypeRef,
        value: Value,
        field: &ValidatedField,
        path: &[PathSegment],
        errors: &mut Vec<GraphQLError>,
    ) -> Value {
        if value.is_null() {
            return Value::Null;
        }

        match ty {
            TypeRef::Scalar(_) => value,
            TypeRef::Object(type_name) => self.complete_object(type_name, &value, field, path, errors),
            TypeRef::List(inner) => match value {
                Value::Array(items) => Value::Array(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(index, item)| {
                            let mut item_path = path.to_vec();
                            item_path.push(PathSegment::Index(index));
                            self.complete_value(inner, item, field, &item_path, errors)
                        })
                        .collect(),
                ),
                _ => {
                    let e = ResolveError::mismatch(field.name.as_str(), "a list");
                    errors.push(GraphQLError::resolution(&e, path.to_vec(), field.pos));
                    Value::Null
                }
            },
        }
    }

    fn complete_object(
        &self,
        type_name: &str,
        parent: &Value,
        field: &ValidatedField,
        path: &[PathSegment],
        errors: &mut Vec<GraphQLError>,
    ) -> Value {
        let Some(object_type) = self.schema.object_type(type_name) else {
            return Value::Null;
        };

        let mut result = Map::new();
        for subfield in &field.subfields {
            let key = subfield.response_key();
            let value = if subfield.is_typename() {
                Value::String(object_type.name.to_string())
            } else {
                match object_type.field(subfield.name.as_str()) {
                    Some(definition) => {
                        let mut field_path = path.to_vec();
                        field_path.push(PathSegment::from(key));
                        self.resolve_field(definition, parent, subfield, field_path, errors)
                    }
                    None => Value::Null,
                }
            };
            result.insert(key.to_string(), value);
        }

        Value::Object(result)
    }
}

/// Reads the pagination arguments of a validated root field.
fn listing_query(field: &ValidatedField) -> ListingQuery {
    let limit = match field.argument("limit") {
        Some(ConstValue::Number(n)) => n.as_i64().and_then(|i| i32::try_from(i).ok()),
        _ => None,
    };
    let cursor = |name: &str| match field.argument(name) {
        Some(ConstValue::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    };

    ListingQuery::new(limit, cursor("before"), cursor("after"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockListingSource, UpstreamError};
    use crate::execution::response::ErrorCode;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn sample_entry() -> Value {
        json!({
            "kind": "t3",
            "data": {
                "id": "t3_x",
                "title": "Hello",
                "author": "bob",
                "created": 100,
                "num_comments": 3,
                "thumbnail": "self",
                "visited": false,
                "subreddit": "test"
            }
        })
    }

    fn entry_with_preview() -> Value {
        json!({
            "data": {
                "id": "t3_y",
                "title": "With preview",
                "preview": {
                    "enabled": true,
                    "images": [{
                        "id": "img",
                        "source": { "url": "https://i.example/full.jpg", "width": 1200, "height": 800 },
                        "resolutions": [
                            { "url": "https://i.example/108.jpg", "width": 108, "height": 72 },
                            { "url": "https://i.example/216.jpg", "width": 216, "height": 144 }
                        ]
                    }]
                }
            }
        })
    }

    fn source_returning(entries: Vec<Value>) -> MockListingSource {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_listing()
            .times(1)
            .returning(move |_| Ok(entries.clone()));
        source
    }

    fn executor(source: MockListingSource) -> Executor {
        Executor::new(Arc::new(Schema::build()), Arc::new(source))
    }

    #[tokio::test]
    async fn test_selects_only_requested_fields() {
        let executor = executor(source_returning(vec![sample_entry()]));

        let response = executor
            .execute(GraphQLRequest::new("{ articles { id title author } }"))
            .await;

        assert!(response.is_ok());
        assert_eq!(
            response.data.unwrap(),
            json!({ "articles": [{ "id": "t3_x", "title": "Hello", "author": "bob" }] })
        );
    }

    #[tokio::test]
    async fn test_result_keys_follow_selection_order() {
        let executor = executor(source_returning(vec![sample_entry()]));

        let response = executor
            .execute(GraphQLRequest::new("{ articles { author id } }"))
            .await;

        let data = response.data.unwrap();
        let keys: Vec<_> = data["articles"][0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["author", "id"]);
    }

    #[tokio::test]
    async fn test_pagination_arguments_forwarded() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_listing()
            .withf(|q| {
                q == &ListingQuery::new(Some(10), None, Some("t3_abc".to_string()))
            })
            .times(1)
            .returning(|_| Ok(vec![]));
        let executor = executor(source);

        let response = executor
            .execute(GraphQLRequest::new(
                r#"{ articles(limit: 10, after: "t3_abc") { id } }"#,
            ))
            .await;

        assert_eq!(response.data.unwrap(), json!({ "articles": [] }));
    }

    #[tokio::test]
    async fn test_variables_forwarded() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_listing()
            .withf(|q| q.limit == Some(-3) && q.before.as_deref() == Some("t3_b"))
            .times(1)
            .returning(|_| Ok(vec![]));
        let executor = executor(source);

        let variables = json!({ "limit": -3, "before": "t3_b" });
        let request = GraphQLRequest::new(
            "query($limit: Int, $before: String) { articles(limit: $limit, before: $before) { id } }",
        )
        .with_variables(variables.as_object().cloned().unwrap());

        assert!(executor.execute(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_nested_preview() {
        let executor = executor(source_returning(vec![entry_with_preview()]));

        let response = executor
            .execute(GraphQLRequest::new(
                "{ articles { preview { enabled images { id source { url } resolutions { width } } } } }",
            ))
            .await;

        assert!(response.is_ok());
        assert_eq!(
            response.data.unwrap()["articles"][0]["preview"],
            json!({
                "enabled": true,
                "images": [{
                    "id": "img",
                    "source": { "url": "https://i.example/full.jpg" },
                    "resolutions": [{ "width": 108 }, { "width": 216 }]
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_missing_preview_is_partial_failure() {
        let executor = executor(source_returning(vec![sample_entry(), entry_with_preview()]));

        let response = executor
            .execute(GraphQLRequest::new(
                "{ articles { title preview { images { source { url } } } } }",
            ))
            .await;

        let data = response.data.unwrap();
        assert_eq!(data["articles"][0]["title"], "Hello");
        assert_eq!(data["articles"][0]["preview"], Value::Null);
        assert_eq!(
            data["articles"][1]["preview"]["images"][0]["source"]["url"],
            "https://i.example/full.jpg"
        );

        assert_eq!(response.errors.len(), 1);
        let error = &response.errors[0];
        assert_eq!(error.code(), ErrorCode::ResolutionError);
        assert_eq!(
            error.path,
            vec![
                PathSegment::from("articles"),
                PathSegment::Index(0),
                PathSegment::from("preview")
            ]
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_nulls_root_field() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_listing()
            .times(1)
            .returning(|_| Err(UpstreamError::Transport("connection refused".to_string())));
        let executor = executor(source);

        let response = executor
            .execute(GraphQLRequest::new("{ articles { id } }"))
            .await;

        assert_eq!(response.data.unwrap(), json!({ "articles": null }));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].code(), ErrorCode::UpstreamUnavailable);
        assert_eq!(response.errors[0].path, vec![PathSegment::from("articles")]);
    }

    #[tokio::test]
    async fn test_invalid_document_never_fetches() {
        let mut source = MockListingSource::new();
        source.expect_fetch_listing().never();
        let executor = executor(source);

        let unknown = executor
            .execute(GraphQLRequest::new("{ articles { id score } }"))
            .await;
        assert!(unknown.data.is_none());
        assert_eq!(unknown.errors[0].code(), ErrorCode::ValidationFailed);
        assert!(!unknown.errors[0].locations.is_empty());

        let unparsable = executor.execute(GraphQLRequest::new("{ articles { id ")).await;
        assert!(unparsable.data.is_none());
        assert_eq!(unparsable.errors[0].code(), ErrorCode::ParseFailed);
    }

    #[tokio::test]
    async fn test_one_fetch_per_root_field() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_listing()
            .times(2)
            .returning(|_| Ok(vec![sample_entry()]));
        let executor = executor(source);

        let response = executor
            .execute(GraphQLRequest::new(
                "{ first: articles(limit: 1) { id } second: articles(limit: 2) { title } }",
            ))
            .await;

        assert_eq!(
            response.data.unwrap(),
            json!({ "first": [{ "id": "t3_x" }], "second": [{ "title": "Hello" }] })
        );
    }

    #[tokio::test]
    async fn test_typename() {
        let executor = executor(source_returning(vec![entry_with_preview()]));

        let response = executor
            .execute(GraphQLRequest::new(
                "{ __typename articles { __typename preview { kind: __typename } } }",
            ))
            .await;

        assert_eq!(
            response.data.unwrap(),
            json!({
                "__typename": "Query",
                "articles": [{ "__typename": "Article", "preview": { "kind": "Preview" } }]
            })
        );
    }

    #[tokio::test]
    async fn test_resolvers_run_only_for_selected_fields() {
        let calls: Arc<Mutex<HashMap<String, usize>>> = Arc::default();
        let recorded = calls.clone();
        let schema = Schema::build().instrument(move |ty, field| {
            *recorded
                .lock()
                .unwrap()
                .entry(format!("{ty}.{field}"))
                .or_default() += 1;
        });
        let executor = Executor::new(
            Arc::new(schema),
            Arc::new(source_returning(vec![sample_entry(), entry_with_preview()])),
        );

        executor
            .execute(GraphQLRequest::new("{ articles { title } }"))
            .await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.get("Article.title"), Some(&2));
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn test_nested_resolvers_counted_per_element() {
        let calls: Arc<Mutex<HashMap<String, usize>>> = Arc::default();
        let recorded = calls.clone();
        let schema = Schema::build().instrument(move |ty, field| {
            *recorded
                .lock()
                .unwrap()
                .entry(format!("{ty}.{field}"))
                .or_default() += 1;
        });
        let executor = Executor::new(
            Arc::new(schema),
            Arc::new(source_returning(vec![entry_with_preview()])),
        );

        executor
            .execute(GraphQLRequest::new(
                "{ articles { preview { images { resolutions { url } } } } }",
            ))
            .await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.get("Article.preview"), Some(&1));
        assert_eq!(calls.get("Preview.images"), Some(&1));
        assert_eq!(calls.get("Image.resolutions"), Some(&1));
        assert_eq!(calls.get("Source.url"), Some(&2));
        assert_eq!(calls.get("Image.source"), None);
        assert_eq!(calls.get("Preview.enabled"), None);
    }

    #[tokio::test]
    async fn test_repeated_field_resolves_identically() {
        let executor = executor(source_returning(vec![sample_entry()]));

        let response = executor
            .execute(GraphQLRequest::new("{ articles { a: created b: created } }"))
            .await;

        let article = &response.data.unwrap()["articles"][0];
        assert_eq!(article["a"], article["b"]);
        assert_eq!(article["a"], 100);
    }
}
