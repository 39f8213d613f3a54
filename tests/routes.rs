mod common;

use article_graph::routes::app_router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn test_trailing_slash_normalized() {
    let app = app_router(common::create_test_state("http://127.0.0.1:1"));

    let response = app
        .oneshot(Request::get("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let app = app_router(common::create_test_state("http://127.0.0.1:1"));

    let response = app
        .oneshot(Request::get("/top").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["details"]["path"], "/top");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = app_router(common::create_test_state("http://127.0.0.1:1"));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/graphql")
                .header(header::ORIGIN, "https://client.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_graphql_through_full_stack() {
    let upstream = common::mock_upstream(vec![common::self_post()]).await;
    let app = app_router(common::create_test_state(&upstream.uri()));

    let response = app
        .oneshot(
            Request::post("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"query":"{ articles { __typename title } }"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["articles"][0]["__typename"], "Article");
    assert_eq!(body["data"]["articles"][0]["title"], "Hello");
}
