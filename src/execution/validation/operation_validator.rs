use std::collections::HashMap;

use async_graphql_parser::{
    Positioned,
    types::{FragmentDefinition, OperationDefinition, OperationType, VariableDefinition},
};
use async_graphql_value::{ConstValue, Name};
use serde_json::{Map, Value};

use crate::graph::Schema;

use super::{
    arguments_validator::OperationVariables, selection_set_validator::SelectionSetValidator, validated_field::ValidatedOperation,
    validation_error::ValidationError,
};

/// Context for validating an operation.
pub struct OperationValidator<'a> {
    schema: &'a Schema,
    operation_name: Option<String>,
    variables: Option<Map<String, Value>>,
    fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
}

impl<'a> OperationValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
        fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self {
            schema,
            operation_name,
            variables,
            fragment_definitions,
        }
    }

    /// Validate operation.
    ///
    /// Validations performed:
    /// - The operation is a query (mutations and subscriptions are not served)
    /// - Each variable in [`OperationDefinition::variable_definitions`] has a
    ///   value (see [`Self::validate_variables`])
    /// - The selected fields are valid (see [`SelectionSetValidator`])
    pub(super) fn validate(
        self,
        operation: Positioned<OperationDefinition>,
    ) -> Result<ValidatedOperation, ValidationError> {
        match operation.node.ty {
            OperationType::Query => {}
            OperationType::Mutation => {
                return Err(ValidationError::UnsupportedOperation("Mutation", operation.pos));
            }
            OperationType::Subscription => {
                return Err(ValidationError::UnsupportedOperation(
                    "Subscription",
                    operation.pos,
                ));
            }
        }

        let variables = self.validate_variables(&operation.node.variable_definitions)?;

        let selection_set_validator = SelectionSetValidator::new(
            self.schema,
            self.schema.query(),
            &variables,
            &self.fragment_definitions,
        );

        let fields = selection_set_validator.validate(&operation.node.selection_set)?;

        Ok(ValidatedOperation {
            name: self.operation_name,
            typ: operation.node.ty,
            fields,
        })
    }

    /// Validate variables.
    ///
    /// A declared variable takes, in order: the supplied value, the declared
    /// default, or `null` when its type is nullable. Non-null variables
    /// without a value are rejected. Declared and value types are checked
    /// where the variable is used, against the argument type.
    fn validate_variables(
        &self,
        variable_definitions: &[Positioned<VariableDefinition>],
    ) -> Result<OperationVariables, ValidationError> {
        let values = variable_definitions
            .iter()
            .map(|definition| {
                let name = &definition.node.name;
                let value = match self.supplied(name)? {
                    Some(value) => value,
                    None => match definition.node.default_value() {
                        Some(default) => default.clone(),
                        None if definition.node.var_type.node.nullable => ConstValue::Null,
                        None => {
                            return Err(ValidationError::VariableMissing(
                                name.node.to_string(),
                                definition.node.var_type.node.to_string(),
                                name.pos,
                            ));
                        }
                    },
                };
                Ok((name.node.clone(), value))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        let types = variable_definitions
            .iter()
            .map(|definition| {
                (
                    definition.node.name.node.clone(),
                    definition.node.var_type.node.clone(),
                )
            })
            .collect();

        Ok(OperationVariables { values, types })
    }

    fn supplied(&self, name: &Positioned<Name>) -> Result<Option<ConstValue>, ValidationError> {
        let Some(value) = self
            .variables
            .as_ref()
            .and_then(|variables| variables.get(name.node.as_str()))
        else {
            return Ok(None);
        };

        ConstValue::from_json(value.to_owned())
            .map(Some)
            .map_err(|e| ValidationError::MalformedVariable(name.node.to_string(), name.pos, e))
    }
}
