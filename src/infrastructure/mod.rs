//! Infrastructure layer for external integrations.
//!
//! Implements the traits defined by the domain layer against real services.
//!
//! # Modules
//!
//! - [`upstream`] - HTTP client for the Reddit listing API

pub mod upstream;
