use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Characters escaped in query values and path segments, everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single query value or path segment
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Page of records returned by a `list` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ListResponse<T> {
    /// Records of this page
    pub items: Vec<T>,
    /// Total number of matching records
    #[serde(default)]
    pub total: u64,
}

/// Optional parameters of a `list` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListParams {
    /// Maximum number of records
    pub limit: Option<u32>,
    /// Number of records to skip
    pub offset: Option<u32>,
    /// Sort expression, e.g. `-created`
    pub order: Option<String>,
    /// Filter expression, e.g. `archived = false`
    #[serde(rename = "where")]
    pub filter: Option<String>,
}

impl ListParams {
    /// Parameters with nothing set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the offset
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the sort expression
    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Sets the filter expression
    #[must_use]
    pub fn with_where(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Builds the query string without the leading `?`
    ///
    /// Keys appear in the order `limit, offset, order, where`. Zero numbers and
    /// empty strings are left out like absent values.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let numbers = [("limit", self.limit), ("offset", self.offset)]
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| *v != 0).map(|v| (key, v.to_string())));
        let texts = [("order", &self.order), ("where", &self.filter)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            });
        numbers
            .chain(texts)
            .map(|(key, value)| format!("{key}={}", encode_component(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
