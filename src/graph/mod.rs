//! The type graph: entity types, their fields, and field resolvers.
//!
//! - [`types`] - descriptors (`ObjectType`, `FieldDef`, `TypeRef`)
//! - [`resolvers`] - the five object types and their projections
//! - [`schema`] - the immutable registry consumed by the executor

pub mod resolvers;
pub mod schema;
pub mod types;

pub use schema::Schema;
pub use types::{ArgumentDef, FieldDef, ObjectType, Resolve, Resolver, ScalarKind, TypeRef};
