//! Image entity: one element of `preview.images`.

use serde_json::{Map, Value};

use crate::domain::projection::{self, ResolveResult};

#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    value: &'a Value,
}

impl<'a> Image<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn fields(&self) -> ResolveResult<&'a Map<String, Value>> {
        projection::as_object(self.value, "image")
    }

    pub fn id(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.fields()?, "image", "id")
    }

    /// The canonical, full-resolution source.
    pub fn source(&self) -> ResolveResult<&'a Value> {
        projection::object(self.fields()?, "image", "source")
    }

    /// Alternate resolutions, smallest first as upstream orders them.
    pub fn resolutions(&self) -> ResolveResult<&'a [Value]> {
        projection::list(self.fields()?, "image", "resolutions")
    }
}
