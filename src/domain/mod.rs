//! Domain layer: entity views over upstream JSON and the listing source contract.
//!
//! # Architecture
//!
//! - [`entities`] - Read-only views (`Article`, `Preview`, `Image`, `Source`) and `ListingQuery`
//! - [`projection`] - Checked field access shared by every entity view
//! - [`repositories`] - The [`repositories::ListingSource`] trait
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. `ListingSource` is implemented in [`crate::infrastructure::upstream`].

pub mod entities;
pub mod projection;
pub mod repositories;
