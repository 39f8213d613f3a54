#![allow(dead_code)]

use article_graph::execution::Executor;
use article_graph::graph::Schema;
use article_graph::infrastructure::upstream::RedditClient;
use article_graph::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_AGENT: &str = "article-graph-tests";

/// A listing entry with every scalar field and a full preview.
pub fn article_with_preview() -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": "1a2b3c",
            "name": "t3_1a2b3c",
            "permalink": "/r/pics/comments/1a2b3c/sunset/",
            "author": "alice",
            "created": 1700000000.0,
            "num_comments": 42,
            "thumbnail": "https://b.thumbs.example/1a2b3c.jpg",
            "title": "Sunset over the bay",
            "visited": false,
            "subreddit": "pics",
            "preview": {
                "enabled": true,
                "images": [{
                    "id": "img1",
                    "source": { "url": "https://i.example/full.jpg", "width": 4000, "height": 3000 },
                    "resolutions": [
                        { "url": "https://i.example/108.jpg", "width": 108, "height": 81 },
                        { "url": "https://i.example/216.jpg", "width": 216, "height": 162 }
                    ]
                }]
            }
        }
    })
}

/// A self post: no `preview` key at all.
pub fn self_post() -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": "x",
            "name": "t3_x",
            "permalink": "/r/test/comments/x/hello/",
            "author": "bob",
            "created": 100,
            "num_comments": 3,
            "thumbnail": "self",
            "title": "Hello",
            "visited": false,
            "subreddit": "test"
        }
    })
}

pub fn listing(children: Vec<Value>) -> Value {
    json!({
        "kind": "Listing",
        "data": {
            "after": null,
            "before": null,
            "children": children
        }
    })
}

/// Starts a mock upstream answering every `/top` request with `children`.
pub async fn mock_upstream(children: Vec<Value>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(children)))
        .mount(&server)
        .await;
    server
}

pub fn create_client(base_url: &str) -> RedditClient {
    RedditClient::new(base_url, Duration::from_secs(2), USER_AGENT).unwrap()
}

pub fn create_test_state(base_url: &str) -> AppState {
    let client = create_client(base_url);
    let origin = client.base_url().to_string();
    let executor = Executor::new(Arc::new(Schema::build()), Arc::new(client));

    AppState::new(Arc::new(executor), origin, true)
}
