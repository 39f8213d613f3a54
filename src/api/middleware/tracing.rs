//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Creates a tracing middleware for HTTP requests.
///
/// One `INFO` span per request (method, URI, version) and one `INFO` event
/// per response with status and latency in milliseconds. The latency
/// includes the upstream round trip of every root field. GraphQL errors are
/// reported with `200 OK`, so only transport-level 5xx responses reach the
/// `WARN` failure event.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/graphql version=HTTP/1.1}: finished processing request latency=84 ms status=200
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::WARN)
                .latency_unit(LatencyUnit::Millis),
        )
}
