//! Document validation against the type graph.
//!
//! Validation runs to completion before any field is resolved, so a rejected
//! document never causes an upstream request.

mod arguments_validator;
mod document_validator;
mod operation_validator;
mod selection_set_validator;
mod validated_field;
mod validation_error;

pub use document_validator::DocumentValidator;
pub use validated_field::{TYPENAME, ValidatedField, ValidatedOperation};
pub use validation_error::ValidationError;
