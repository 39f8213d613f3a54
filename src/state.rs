//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::execution::Executor;
use crate::graph::Schema;

#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<Executor>,
    /// Upstream origin, reported by the health check.
    pub upstream_origin: String,
    pub graphiql: bool,
}

impl AppState {
    pub fn new(executor: Arc<Executor>, upstream_origin: impl Into<String>, graphiql: bool) -> Self {
        Self {
            executor,
            upstream_origin: upstream_origin.into(),
            graphiql,
        }
    }

    pub fn schema(&self) -> &Schema {
        self.executor.schema()
    }
}
