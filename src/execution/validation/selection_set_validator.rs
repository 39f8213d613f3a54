use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use async_graphql_parser::{
    Pos, Positioned,
    types::{Field, FragmentDefinition, FragmentSpread, InlineFragment, Selection, SelectionSet},
};
use async_graphql_value::Name;
use indexmap::IndexMap;

use crate::graph::{ObjectType, Schema};

use super::{
    arguments_validator::{ArgumentValidator, OperationVariables, should_include},
    validated_field::{TYPENAME, ValidatedField},
    validation_error::ValidationError,
};

/// Upper bound on validated fields in one operation, counting every copy a
/// fragment spread produces.
pub const MAX_SELECTED_FIELDS: usize = 10_000;

/// State shared by every nested validator of one operation.
#[derive(Debug, Default)]
struct Expansion {
    /// Merged fields of each fragment already expanded, keyed by fragment and
    /// container type.
    fragments: RefCell<HashMap<(Name, &'static str), Vec<ValidatedField>>>,
    selected: Cell<usize>,
}

impl Expansion {
    fn charge(&self, count: usize, pos: Pos) -> Result<(), ValidationError> {
        let selected = self.selected.get().saturating_add(count);
        if selected > MAX_SELECTED_FIELDS {
            return Err(ValidationError::TooManyFields(MAX_SELECTED_FIELDS, pos));
        }
        self.selected.set(selected);
        Ok(())
    }
}

/// Context for validating a selection set.
#[derive(Debug)]
pub struct SelectionSetValidator<'a> {
    schema: &'a Schema,
    /// The type whose fields are being selected.
    container_type: &'a ObjectType,
    variables: &'a OperationVariables,
    fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    /// Fragments currently being expanded, innermost last.
    fragment_stack: Vec<Name>,
    expansion: Rc<Expansion>,
}

impl<'a> SelectionSetValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        container_type: &'a ObjectType,
        variables: &'a OperationVariables,
        fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self {
            schema,
            container_type,
            variables,
            fragment_definitions,
            fragment_stack: Vec::new(),
            expansion: Rc::default(),
        }
    }

    /// Validate selection set.
    ///
    /// Validations performed:
    /// - Each field is defined in the container type
    /// - Object fields have a sub-selection, scalar fields do not
    /// - Each fragment referred is defined, applies to the container type and
    ///   does not spread itself
    /// - Arguments to each field are valid (see [`ArgumentValidator`])
    /// - Fields sharing a response key select the same field with the same arguments
    /// - At most [`MAX_SELECTED_FIELDS`] fields are selected after expansion
    ///
    /// Selections excluded by `@skip` or `@include` are validated like any
    /// other before being dropped.
    ///
    /// # Returns
    ///   Validated fields with fragments inlined, skipped selections dropped,
    ///   and fields sharing a response key merged.
    pub fn validate(
        &self,
        selection_set: &Positioned<SelectionSet>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let fields = self.collect(selection_set)?;
        merge_fields(fields)
    }

    fn collect(
        &self,
        selection_set: &Positioned<SelectionSet>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        selection_set
            .node
            .items
            .iter()
            .map(|selection| self.validate_selection(selection))
            .collect::<Result<Vec<_>, _>>()
            .map(|f| f.into_iter().flatten().collect())
    }

    fn validate_selection(
        &self,
        selection: &Positioned<Selection>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let (fields, directives) = match &selection.node {
            Selection::Field(field) => (vec![self.validate_field(field)?], &field.node.directives),
            Selection::FragmentSpread(fragment_spread) => (
                self.validate_fragment_spread(fragment_spread)?,
                &fragment_spread.node.directives,
            ),
            Selection::InlineFragment(inline_fragment) => (
                self.validate_inline_fragment(inline_fragment)?,
                &inline_fragment.node.directives,
            ),
        };

        if should_include(directives, self.variables)? {
            Ok(fields)
        } else {
            Ok(vec![])
        }
    }

    fn validate_field(&self, field: &Positioned<Field>) -> Result<ValidatedField, ValidationError> {
        let name = &field.node.name.node;
        let has_selection = !field.node.selection_set.node.items.is_empty();

        if name.as_str() == TYPENAME {
            if let Some((arg, _)) = field.node.arguments.first() {
                return Err(ValidationError::UnknownArgument(
                    arg.node.to_string(),
                    TYPENAME.to_string(),
                    arg.pos,
                ));
            }
            if has_selection {
                return Err(ValidationError::ScalarWithField(
                    TYPENAME.to_string(),
                    "String".to_string(),
                    field.pos,
                ));
            }
            self.expansion.charge(1, field.pos)?;
            return Ok(ValidatedField {
                alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
                name: name.clone(),
                arguments: IndexMap::new(),
                subfields: vec![],
                pos: field.pos,
            });
        }

        let definition = self.container_type.field(name.as_str()).ok_or_else(|| {
            ValidationError::InvalidField(
                name.to_string(),
                self.container_type.name.to_string(),
                field.pos,
            )
        })?;

        let arguments = ArgumentValidator::new(self.variables, field).validate(definition)?;
        self.expansion.charge(1, field.pos)?;

        let subfields = if definition.ty.is_composite() {
            if !has_selection {
                return Err(ValidationError::MissingSelection(
                    name.to_string(),
                    definition.ty.to_string(),
                    field.pos,
                ));
            }
            let field_type = self
                .schema
                .object_type(definition.ty.named_type())
                .ok_or_else(|| {
                    ValidationError::InvalidField(
                        name.to_string(),
                        self.container_type.name.to_string(),
                        field.pos,
                    )
                })?;
            self.nested(field_type).validate(&field.node.selection_set)?
        } else {
            if has_selection {
                return Err(ValidationError::ScalarWithField(
                    name.to_string(),
                    definition.ty.to_string(),
                    field.pos,
                ));
            }
            vec![]
        };

        Ok(ValidatedField {
            alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
            name: name.clone(),
            arguments,
            subfields,
            pos: field.pos,
        })
    }

    fn validate_fragment_spread(
        &self,
        fragment_spread: &Positioned<FragmentSpread>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let fragment_name = &fragment_spread.node.fragment_name.node;

        if self.fragment_stack.contains(fragment_name) {
            return Err(ValidationError::FragmentCycle(
                fragment_name.to_string(),
                fragment_spread.pos,
            ));
        }

        let definition = self
            .fragment_definitions
            .get(fragment_name)
            .map(|v| &v.node)
            .ok_or_else(|| {
                ValidationError::FragmentDefinitionNotFound(
                    fragment_name.to_string(),
                    fragment_spread.pos,
                )
            })?;

        self.check_type_condition(
            definition.type_condition.node.on.node.as_str(),
            fragment_spread.pos,
        )?;

        // A fragment found here was fully expanded once already, so any cycle
        // through it would have been reported then.
        let key = (fragment_name.clone(), self.container_type.name);
        let cached = self.expansion.fragments.borrow().get(&key).cloned();
        if let Some(fields) = cached {
            self.expansion.charge(count_fields(&fields), fragment_spread.pos)?;
            return Ok(fields);
        }

        let mut inner = self.nested(self.container_type);
        inner.fragment_stack.push(fragment_name.clone());
        let fields = merge_fields(inner.collect(&definition.selection_set)?)?;

        self.expansion
            .fragments
            .borrow_mut()
            .insert(key, fields.clone());
        Ok(fields)
    }

    fn validate_inline_fragment(
        &self,
        inline_fragment: &Positioned<InlineFragment>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        if let Some(type_condition) = &inline_fragment.node.type_condition {
            self.check_type_condition(type_condition.node.on.node.as_str(), inline_fragment.pos)?;
        }
        self.collect(&inline_fragment.node.selection_set)
    }

    /// There are no interfaces or unions, so a type condition must name the
    /// container type itself.
    fn check_type_condition(
        &self,
        on: &str,
        pos: Pos,
    ) -> Result<(), ValidationError> {
        if on == self.container_type.name {
            Ok(())
        } else {
            Err(ValidationError::FragmentTypeMismatch(
                on.to_string(),
                self.container_type.name.to_string(),
                pos,
            ))
        }
    }

    fn nested(&self, container_type: &'a ObjectType) -> Self {
        Self {
            schema: self.schema,
            container_type,
            variables: self.variables,
            fragment_definitions: self.fragment_definitions,
            fragment_stack: self.fragment_stack.clone(),
            expansion: Rc::clone(&self.expansion),
        }
    }
}

fn count_fields(fields: &[ValidatedField]) -> usize {
    fields
        .iter()
        .map(|field| 1 + count_fields(&field.subfields))
        .sum()
}

/// Merges fields that share a response key.
fn merge_fields(fields: Vec<ValidatedField>) -> Result<Vec<ValidatedField>, ValidationError> {
    let mut merged: Vec<ValidatedField> = Vec::with_capacity(fields.len());
    let mut positions: HashMap<Name, usize> = HashMap::with_capacity(fields.len());

    for field in fields {
        let key = field.alias.as_ref().unwrap_or(&field.name);
        match positions.get(key) {
            Some(&index) => {
                let existing = &mut merged[index];
                if existing.name != field.name || existing.arguments != field.arguments {
                    return Err(ValidationError::ConflictingFields(
                        field.response_key().to_string(),
                        field.pos,
                    ));
                }
                existing.subfields.extend(field.subfields);
            }
            None => {
                positions.insert(key.clone(), merged.len());
                merged.push(field);
            }
        }
    }

    merged
        .into_iter()
        .map(|mut field| {
            field.subfields = merge_fields(std::mem::take(&mut field.subfields))?;
            Ok(field)
        })
        .collect()
}
