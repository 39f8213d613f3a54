//! Request execution: parse, validate, resolve.
//!
//! ```text
//! GraphQLRequest ─► parse ─► DocumentValidator ─► Executor ─► GraphQLResponse
//!                                                   │
//!                                                   └─► ArticleService (one fetch per root field)
//! ```

pub mod executor;
pub mod request;
pub mod response;
pub mod validation;

pub use executor::Executor;
pub use request::GraphQLRequest;
pub use response::{ErrorCode, GraphQLError, GraphQLResponse, PathSegment};
