//! # Article Graph
//!
//! A GraphQL query layer over the Reddit `/top` listing, built with Axum.
//!
//! Clients select exactly the fields they need from `Article`, `Preview`,
//! `Image` and `Source`. Each root `articles` field costs one upstream
//! request; everything below it is projected from that single payload.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entity views over upstream JSON and the listing source trait
//! - **Graph Layer** ([`graph`]) - Object types, field resolvers and the schema registry
//! - **Execution Layer** ([`execution`]) - Parsing, validation and selection-driven execution
//! - **Application Layer** ([`application`]) - The `articles` entry point
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP client for the upstream API
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//! - **Web Layer** ([`web`]) - GraphiQL page
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! curl -s localhost:5000/graphql \
//!   -H 'content-type: application/json' \
//!   -d '{"query":"{ articles(limit: 3) { name title author } }"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod execution;
pub mod graph;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ArticleService;
    pub use crate::domain::entities::ListingQuery;
    pub use crate::domain::repositories::{ListingSource, UpstreamError};
    pub use crate::error::AppError;
    pub use crate::execution::{Executor, GraphQLRequest, GraphQLResponse};
    pub use crate::graph::Schema;
    pub use crate::infrastructure::upstream::RedditClient;
    pub use crate::state::AppState;
}
