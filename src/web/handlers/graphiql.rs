//! GraphiQL IDE page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the in-browser GraphQL IDE.
///
/// Renders `templates/graphiql.html`, pointed at the `/graphql` endpoint.
#[derive(Template, WebTemplate)]
#[template(path = "graphiql.html")]
pub struct GraphiqlTemplate {
    pub endpoint: &'static str,
    pub version: &'static str,
}

/// Renders the GraphiQL page.
///
/// # Endpoint
///
/// `GET /graphql` with `Accept: text/html` and no `query` parameter.
pub async fn graphiql_handler() -> impl IntoResponse {
    GraphiqlTemplate {
        endpoint: "/graphql",
        version: env!("CARGO_PKG_VERSION"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_endpoint() {
        let html = GraphiqlTemplate {
            endpoint: "/graphql",
            version: "0.0.0",
        }
        .render()
        .unwrap();

        assert!(html.contains("url: \"/graphql\""));
        assert!(html.contains("article-graph 0.0.0"));
    }
}
