//! Field and type descriptors for the type graph.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::projection::ResolveError;

/// Built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Int,
    Boolean,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::Boolean => "Boolean",
        }
    }
}

/// Result type of a field. Every position is nullable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Scalar(ScalarKind),
    Object(&'static str),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn list_of(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// Name of the innermost type, with list wrappers stripped.
    pub fn named_type(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.name(),
            Self::Object(name) => name,
            Self::List(inner) => inner.named_type(),
        }
    }

    /// Whether a selection set is required (object or list of objects).
    pub fn is_composite(&self) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::Object(_) => true,
            Self::List(inner) => inner.is_composite(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Object(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

/// Pure projection from a parent value to a field value.
///
/// For object fields the result is the child's parent value; for list fields
/// it is a JSON array of child parent values.
pub type Resolver = Arc<dyn Fn(&Value) -> Result<Value, ResolveError> + Send + Sync>;

/// How a field obtains its value.
#[derive(Clone)]
pub enum Resolve {
    /// Synchronous projection over data already fetched.
    Projection(Resolver),
    /// Root field backed by one upstream listing fetch.
    Upstream,
}

impl fmt::Debug for Resolve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projection(_) => f.write_str("Projection"),
            Self::Upstream => f.write_str("Upstream"),
        }
    }
}

/// An argument accepted by a field.
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    pub name: &'static str,
    pub description: &'static str,
    pub ty: ScalarKind,
}

/// A named field of an object type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub description: &'static str,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentDef>,
    pub resolve: Resolve,
}

impl FieldDef {
    /// A field resolved by projecting `resolver` over its parent.
    pub fn projection<F>(name: &'static str, ty: TypeRef, description: &'static str, resolver: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ResolveError> + Send + Sync + 'static,
    {
        Self {
            name,
            description,
            ty,
            arguments: Vec::new(),
            resolve: Resolve::Projection(Arc::new(resolver)),
        }
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDef> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// A named record shape with an ordered list of fields.
#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldDef>,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}
