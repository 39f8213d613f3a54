use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{BaseType, Directive, Field, Type},
};
use async_graphql_value::{ConstValue, Name, Value};
use indexmap::IndexMap;

use crate::graph::{FieldDef, ScalarKind};

use super::validation_error::ValidationError;

/// Variable values and declared types of the operation being validated.
#[derive(Debug, Default)]
pub struct OperationVariables {
    pub values: HashMap<Name, ConstValue>,
    pub types: HashMap<Name, Type>,
}

impl OperationVariables {
    /// Rejects a variable used directly as a value when its declared type is
    /// not the named `expected` scalar. Nullability is not compared since
    /// every argument in the graph is nullable.
    fn check_usage(
        &self,
        value: &Value,
        expected: &'static str,
        pos: Pos,
    ) -> Result<(), ValidationError> {
        let Value::Variable(name) = value else {
            return Ok(());
        };
        let Some(declared) = self.types.get(name) else {
            return Ok(());
        };

        match &declared.base {
            BaseType::Named(named) if named.as_str() == expected => Ok(()),
            _ => Err(ValidationError::VariableTypeMismatch(
                name.to_string(),
                declared.to_string(),
                expected,
                pos,
            )),
        }
    }
}

/// Validates and resolves the arguments supplied to one field.
pub struct ArgumentValidator<'a> {
    variables: &'a OperationVariables,
    field: &'a Positioned<Field>,
}

impl<'a> ArgumentValidator<'a> {
    #[must_use]
    pub fn new(variables: &'a OperationVariables, field: &'a Positioned<Field>) -> Self {
        Self { variables, field }
    }

    /// Validations performed:
    /// - Every supplied argument is declared by the field
    /// - Every variable referenced is defined by the operation
    /// - A variable passed as an argument is declared with the argument's type
    /// - Each value matches the declared scalar type (`null` is always accepted)
    ///
    /// # Returns
    ///   Arguments with variables substituted, in the order the client wrote them.
    pub fn validate(&self, definition: &FieldDef) -> Result<IndexMap<Name, ConstValue>, ValidationError> {
        let field_name = self.field.node.name.node.as_str();

        self.field
            .node
            .arguments
            .iter()
            .map(|(name, value)| {
                let argument = definition.argument(name.node.as_str()).ok_or_else(|| {
                    ValidationError::UnknownArgument(
                        name.node.to_string(),
                        field_name.to_string(),
                        name.pos,
                    )
                })?;

                self.variables
                    .check_usage(&value.node, argument.ty.name(), value.pos)?;
                let value = resolve_value(&value.node, &self.variables.values, value.pos)?;

                if !matches_scalar(&value, argument.ty) {
                    return Err(ValidationError::InvalidArgumentType(
                        argument.name.to_string(),
                        field_name.to_string(),
                        argument.ty.name(),
                        name.pos,
                    ));
                }

                Ok((name.node.clone(), value))
            })
            .collect()
    }
}

/// Substitutes variables into a literal value.
pub fn resolve_value(
    value: &Value,
    variables: &HashMap<Name, ConstValue>,
    pos: Pos,
) -> Result<ConstValue, ValidationError> {
    value.clone().into_const_with(|name| {
        variables
            .get(&name)
            .cloned()
            .ok_or_else(|| ValidationError::VariableNotFound(name.to_string(), pos))
    })
}

fn matches_scalar(value: &ConstValue, kind: ScalarKind) -> bool {
    match (value, kind) {
        (ConstValue::Null, _) => true,
        (ConstValue::String(_), ScalarKind::String) => true,
        (ConstValue::Boolean(_), ScalarKind::Boolean) => true,
        (ConstValue::Number(n), ScalarKind::Int) => n
            .as_i64()
            .is_some_and(|i| i32::try_from(i).is_ok()),
        _ => false,
    }
}

/// Evaluates `@skip` / `@include` on a selection.
///
/// # Returns
///   `false` if the selection must be dropped.
pub fn should_include(
    directives: &[Positioned<Directive>],
    variables: &OperationVariables,
) -> Result<bool, ValidationError> {
    for directive in directives {
        let name = directive.node.name.node.as_str();
        let skip_when = match name {
            "skip" => true,
            "include" => false,
            _ => {
                return Err(ValidationError::UnknownDirective(
                    name.to_string(),
                    directive.pos,
                ));
            }
        };

        let argument = directive
            .node
            .get_argument("if")
            .ok_or_else(|| ValidationError::InvalidDirectiveArgument(name.to_string(), directive.pos))?;
        variables.check_usage(&argument.node, "Boolean", argument.pos)?;
        let condition = resolve_value(&argument.node, &variables.values, argument.pos)?;

        match condition {
            ConstValue::Boolean(flag) if flag == skip_when => return Ok(false),
            ConstValue::Boolean(_) => {}
            _ => {
                return Err(ValidationError::InvalidDirectiveArgument(
                    name.to_string(),
                    directive.pos,
                ));
            }
        }
    }

    Ok(true)
}
