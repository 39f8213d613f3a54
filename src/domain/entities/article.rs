//! Article entity: a view over one wrapped listing entry.

use serde_json::{Map, Value};

use crate::domain::projection::{self, ResolveResult};

/// A listing entry as returned in `data.children`, shaped `{ "data": { ... } }`.
///
/// Accessors are independent: reading one field never touches its siblings.
#[derive(Debug, Clone, Copy)]
pub struct Article<'a> {
    entry: &'a Value,
}

impl<'a> Article<'a> {
    pub fn new(entry: &'a Value) -> Self {
        Self { entry }
    }

    fn data(&self) -> ResolveResult<&'a Map<String, Value>> {
        let entry = projection::as_object(self.entry, "entry")?;
        let data = projection::require(entry, "", "data")?;
        projection::as_object(data, "data")
    }

    pub fn id(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.data()?, "data", "id")
    }

    pub fn name(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.data()?, "data", "name")
    }

    pub fn permalink(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.data()?, "data", "permalink")
    }

    pub fn author(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.data()?, "data", "author")
    }

    /// Creation time in epoch seconds.
    pub fn created(&self) -> ResolveResult<Option<i64>> {
        projection::integer(self.data()?, "data", "created")
    }

    pub fn num_comments(&self) -> ResolveResult<Option<i64>> {
        projection::integer(self.data()?, "data", "num_comments")
    }

    pub fn thumbnail(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.data()?, "data", "thumbnail")
    }

    pub fn title(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.data()?, "data", "title")
    }

    /// Upstream does not document `visited`; absence reads as `None`.
    pub fn visited(&self) -> ResolveResult<Option<bool>> {
        let data = self.data()?;
        if !data.contains_key("visited") {
            return Ok(None);
        }
        projection::boolean(data, "data", "visited")
    }

    pub fn subreddit(&self) -> ResolveResult<Option<&'a str>> {
        projection::string(self.data()?, "data", "subreddit")
    }

    /// The raw `preview` object, for further projection by [`super::Preview`].
    pub fn preview(&self) -> ResolveResult<&'a Value> {
        projection::object(self.data()?, "data", "preview")
    }
}
