//! Pagination arguments for one upstream listing fetch.

/// Arguments forwarded verbatim to the upstream `/top` listing.
///
/// `None` leaves the choice to upstream: the parameter is still sent, with
/// an empty value. An empty cursor string is equivalent to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub limit: Option<i32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl ListingQuery {
    pub fn new(limit: Option<i32>, before: Option<String>, after: Option<String>) -> Self {
        Self {
            limit,
            before,
            after,
        }
    }

    /// `(name, value)` pairs in the order upstream receives them.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            (
                "limit",
                self.limit.map(|l| l.to_string()).unwrap_or_default(),
            ),
            ("before", self.before.clone().unwrap_or_default()),
            ("after", self.after.clone().unwrap_or_default()),
        ]
    }
}
