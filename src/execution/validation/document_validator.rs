use async_graphql_parser::types::{DocumentOperations, ExecutableDocument};
use async_graphql_value::Name;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::graph::Schema;

use super::{
    operation_validator::OperationValidator, validated_field::ValidatedOperation,
    validation_error::ValidationError,
};

/// Context for validating a document.
pub struct DocumentValidator<'a> {
    schema: &'a Schema,
    operation_name: Option<String>,
    variables: Option<Map<String, Value>>,
}

impl<'a> DocumentValidator<'a> {
    pub fn new(
        schema: &'a Schema,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            schema,
            operation_name,
            variables,
        }
    }

    /// Validate the query payload.
    ///
    /// Validations performed:
    /// - Either there is only one operation or the operation name specified
    ///   matches one of the operations in the document
    /// - There is at least one operation
    /// - Other validations are delegated to the operation validator
    #[instrument(name = "DocumentValidator::validate", skip(self, document))]
    pub fn validate(
        self,
        document: ExecutableDocument,
    ) -> Result<ValidatedOperation, ValidationError> {
        let (operation_name, raw_operation) = match document.operations {
            DocumentOperations::Single(operation) => Ok((self.operation_name, operation)),
            DocumentOperations::Multiple(mut operations) => {
                if operations.is_empty() {
                    Err(ValidationError::NoOperationFound)
                } else {
                    match self.operation_name {
                        None if operations.len() == 1 => {
                            // A named operation parses as `Multiple` even when
                            // it is alone, so only demand a name for true
                            // multiples.
                            match operations.drain().next() {
                                Some((operation_name, operation)) => {
                                    Ok((Some(operation_name.to_string()), operation))
                                }
                                None => Err(ValidationError::NoOperationFound),
                            }
                        }
                        None => Err(ValidationError::MultipleOperationsNoOperationName),
                        Some(operation_name) => {
                            match operations.remove(&Name::new(&operation_name)) {
                                None => Err(
                                    ValidationError::MultipleOperationsUnmatchedOperationName(
                                        operation_name,
                                    ),
                                ),
                                Some(operation) => Ok((Some(operation_name), operation)),
                            }
                        }
                    }
                }
            }
        }?;

        let operation_validator = OperationValidator::new(
            self.schema,
            operation_name,
            self.variables,
            document.fragments,
        );

        operation_validator.validate(raw_operation)
    }
}
