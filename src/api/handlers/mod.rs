//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod graphql;
pub mod health;
pub mod schema;

pub use graphql::{graphql_get_handler, graphql_post_handler};
pub use health::health_handler;
pub use schema::schema_handler;
