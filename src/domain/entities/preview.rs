//! Preview entity: the `preview` object attached to an article.

use serde_json::{Map, Value};

use crate::domain::projection::{self, ResolveResult};

#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    value: &'a Value,
}

impl<'a> Preview<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn fields(&self) -> ResolveResult<&'a Map<String, Value>> {
        projection::as_object(self.value, "preview")
    }

    pub fn enabled(&self) -> ResolveResult<Option<bool>> {
        projection::boolean(self.fields()?, "preview", "enabled")
    }

    /// Raw image objects in upstream order; possibly empty.
    pub fn images(&self) -> ResolveResult<&'a [Value]> {
        projection::list(self.fields()?, "preview", "images")
    }
}
