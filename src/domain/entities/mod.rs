//! Read-only entity views over the upstream listing payload.
//!
//! Each entity borrows the JSON value it projects from. Nothing is copied
//! until a field is actually read, and nothing outlives the request that
//! fetched the payload.
//!
//! # Entity Types
//!
//! - [`Article`] - a wrapped listing entry (`{ "data": { ... } }`)
//! - [`Preview`] - `data.preview`
//! - [`Image`] - an element of `preview.images`
//! - [`Source`] - `image.source` or an element of `image.resolutions`
//!
//! [`ListingQuery`] carries the pagination arguments of the fetch that
//! produced the payload.

pub mod article;
pub mod image;
pub mod listing_query;
pub mod preview;
pub mod source;

pub use article::Article;
pub use image::Image;
pub use listing_query::ListingQuery;
pub use preview::Preview;
pub use source::Source;
