//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. The JSON body
//! of `POST /graphql` is [`crate::execution::GraphQLRequest`] itself.

pub mod graphql;
pub mod health;
