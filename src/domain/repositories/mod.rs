//! Data access traits for the domain layer.
//!
//! The only data this service reads is the upstream listing, so there is a
//! single trait. Its HTTP implementation lives in
//! `crate::infrastructure::upstream`; a `mockall` mock is generated for unit
//! tests.

pub mod listing_source;

pub use listing_source::{ListingSource, UpstreamError};

#[cfg(test)]
pub use listing_source::MockListingSource;
