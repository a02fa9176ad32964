//! Filter and pagination options for the list endpoints.

/// Options accepted by `list_rules` / `list_hosts` and their paginators.
///
/// Values are copied into each request; a request never mutates the options
/// it was given, so one value can drive a whole paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    source_filter: Option<String>,
    target_filter: Option<String>,
    limit: Option<u32>,
    starting_after: Option<String>,
    ending_before: Option<String>,
}

impl ListOptions {
    /// An empty option set, yielding the bare resource path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match rules whose source URLs contain the given text (`sq`).
    #[must_use]
    pub fn with_source_filter(mut self, url: impl Into<String>) -> Self {
        self.source_filter = Some(url.into());
        self
    }

    /// Match rules whose target URL contains the given text (`tq`).
    #[must_use]
    pub fn with_target_filter(mut self, url: impl Into<String>) -> Self {
        self.target_filter = Some(url.into());
        self
    }

    /// Maximum number of records per page.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return records after the given id (forward cursor).
    #[must_use]
    pub fn with_starting_after(mut self, cursor: impl Into<String>) -> Self {
        self.starting_after = Some(cursor.into());
        self
    }

    /// Return records before the given id (backward cursor).
    #[must_use]
    pub fn with_ending_before(mut self, cursor: impl Into<String>) -> Self {
        self.ending_before = Some(cursor.into());
        self
    }

    /// Append the options to `path` as a query string.
    ///
    /// Parameters appear in a fixed order (`starting_after`, `ending_before`,
    /// `sq`, `tq`, `limit`) so the same options always produce the same URL.
    /// An empty option set yields the bare path.
    pub(crate) fn path_query(&self, path: &str) -> String {
        let mut params = Vec::new();

        if let Some(cursor) = &self.starting_after {
            params.push(format!("starting_after={cursor}"));
        }
        if let Some(cursor) = &self.ending_before {
            params.push(format!("ending_before={cursor}"));
        }
        if let Some(filter) = &self.source_filter {
            params.push(format!("sq={filter}"));
        }
        if let Some(filter) = &self.target_filter {
            params.push(format!("tq={filter}"));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }

        if params.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", params.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_yield_bare_path() {
        assert_eq!(ListOptions::new().path_query("/rules"), "/rules");
    }

    #[test]
    fn single_parameter() {
        let options = ListOptions::new().with_limit(100);
        assert_eq!(options.path_query("/hosts"), "/hosts?limit=100");
    }

    #[test]
    fn parameters_keep_canonical_order() {
        let options = ListOptions::new()
            .with_limit(1)
            .with_target_filter("target.example.com")
            .with_source_filter("source.example.com")
            .with_ending_before("bbb")
            .with_starting_after("aaa");
        assert_eq!(
            options.path_query("/rules"),
            "/rules?starting_after=aaa&ending_before=bbb&sq=source.example.com&tq=target.example.com&limit=1"
        );
    }

    #[test]
    fn cursor_override_replaces_previous_value() {
        let options = ListOptions::new()
            .with_starting_after("first")
            .with_starting_after("second");
        assert_eq!(options.path_query("/rules"), "/rules?starting_after=second");
    }
}
