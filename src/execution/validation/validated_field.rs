use async_graphql_parser::{Pos, types::OperationType};
use async_graphql_value::{ConstValue, Name};
use indexmap::IndexMap;

/// Name of the meta field available on every type.
pub const TYPENAME: &str = "__typename";

/// A field with fragments inlined, directives applied and variables
/// substituted. Only fields that will be resolved survive validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedField {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: IndexMap<Name, ConstValue>,
    pub subfields: Vec<ValidatedField>,
    pub pos: Pos,
}

impl ValidatedField {
    /// The key this field occupies in the result object.
    pub fn response_key(&self) -> &str {
        self.alias.as_ref().unwrap_or(&self.name).as_str()
    }

    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn is_typename(&self) -> bool {
        self.name.as_str() == TYPENAME
    }
}

/// An operation ready for execution.
#[derive(Debug, Clone)]
pub struct ValidatedOperation {
    pub name: Option<String>,
    pub typ: OperationType,
    pub fields: Vec<ValidatedField>,
}
