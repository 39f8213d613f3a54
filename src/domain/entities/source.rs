//! Source entity: a URL with pixel dimensions.

use serde_json::{Map, Value};

use crate::domain::projection::{self, ResolveResult};

#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    value: &'a Value,
}

impl<'a> Source<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn fields(&self) -> ResolveResult<&'a Map<String, Value>> {
        projection::as_object(self.value, "source")
    }

    pub fn url(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.fields()?, "source", "url")
    }

    pub fn width(&self) -> ResolveResult<Option<i64>> {
        projection::integer(self.fields()?, "source", "width")
    }

    pub fn height(&self) -> ResolveResult<Option<i64>> {
        projection::integer(self.fields()?, "source", "height")
    }
}
