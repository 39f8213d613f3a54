//! Upstream listing clients.

pub mod reddit_client;

pub use reddit_client::RedditClient;
