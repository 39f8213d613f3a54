use async_graphql_parser::Pos;

/// Reasons a document is rejected before execution.
///
/// Raised before any upstream call is made.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No operation found")]
    NoOperationFound,

    #[error("Must provide operation name if query contains multiple operations")]
    MultipleOperationsNoOperationName,

    #[error("Operation with name {0} does not exist")]
    MultipleOperationsUnmatchedOperationName(String),

    #[error("{0} operations are not supported")]
    UnsupportedOperation(&'static str, Pos),

    #[error("Cannot query field `{0}` on type `{1}`")]
    InvalidField(String, String, Pos),

    #[error("Field `{0}` of type `{1}` must have a selection of subfields")]
    MissingSelection(String, String, Pos),

    #[error("Field `{0}` must not have a selection since type `{1}` has no subfields")]
    ScalarWithField(String, String, Pos),

    #[error("Unknown argument `{0}` on field `{1}`")]
    UnknownArgument(String, String, Pos),

    #[error("Argument `{0}` on field `{1}` expects a value of type `{2}`")]
    InvalidArgumentType(String, String, &'static str, Pos),

    #[error("Variable `${0}` is not defined")]
    VariableNotFound(String, Pos),

    #[error("Variable `${0}` of non-null type `{1}` must be provided")]
    VariableMissing(String, String, Pos),

    #[error("Variable `${0}` of type `{1}` cannot be used where `{2}` is expected")]
    VariableTypeMismatch(String, String, &'static str, Pos),

    #[error("Variable `${0}` is malformed: {2}")]
    MalformedVariable(String, Pos, serde_json::Error),

    #[error("Fragment definition `{0}` not found")]
    FragmentDefinitionNotFound(String, Pos),

    #[error("Fragment on `{0}` cannot be spread within type `{1}`")]
    FragmentTypeMismatch(String, String, Pos),

    #[error("Fragment `{0}` cannot spread itself")]
    FragmentCycle(String, Pos),

    #[error("Unknown directive `@{0}`")]
    UnknownDirective(String, Pos),

    #[error("Directive `@{0}` requires a Boolean argument `if`")]
    InvalidDirectiveArgument(String, Pos),

    #[error("Fields `{0}` conflict because they select different fields or arguments")]
    ConflictingFields(String, Pos),

    #[error("Query selects more than {0} fields once fragments are expanded")]
    TooManyFields(usize, Pos),
}

impl ValidationError {
    pub fn positions(&self) -> Vec<Pos> {
        match self {
            ValidationError::NoOperationFound
            | ValidationError::MultipleOperationsNoOperationName
            | ValidationError::MultipleOperationsUnmatchedOperationName(_) => vec![],
            ValidationError::UnsupportedOperation(_, pos)
            | ValidationError::InvalidField(_, _, pos)
            | ValidationError::MissingSelection(_, _, pos)
            | ValidationError::ScalarWithField(_, _, pos)
            | ValidationError::UnknownArgument(_, _, pos)
            | ValidationError::InvalidArgumentType(_, _, _, pos)
            | ValidationError::VariableNotFound(_, pos)
            | ValidationError::VariableMissing(_, _, pos)
            | ValidationError::VariableTypeMismatch(_, _, _, pos)
            | ValidationError::MalformedVariable(_, pos, _)
            | ValidationError::FragmentDefinitionNotFound(_, pos)
            | ValidationError::FragmentTypeMismatch(_, _, pos)
            | ValidationError::FragmentCycle(_, pos)
            | ValidationError::UnknownDirective(_, pos)
            | ValidationError::InvalidDirectiveArgument(_, pos)
            | ValidationError::ConflictingFields(_, pos)
            | ValidationError::TooManyFields(_, pos) => vec![*pos],
        }
    }
}
