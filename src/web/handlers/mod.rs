//! Template rendering handlers.

pub mod graphiql;

pub use graphiql::graphiql_handler;
