//! Application layer services.
//!
//! # Available Services
//!
//! - [`services::article_service::ArticleService`] - The `articles` root entry point

pub mod services;
