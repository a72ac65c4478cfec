//! Common utilities for NetBox API client
//!
//! Provides the shared request/response shapes and the URL helpers used by
//! [`crate::NetBoxClient`].

pub mod route;

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Paginated response wrapper from NetBox API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Total number of objects matching the query
    pub count: u64,
    /// Absolute URL of the next page, if any
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any
    pub previous: Option<String>,
    /// Objects on this page
    pub results: Vec<T>,
}

/// Options passed through to a raw request
///
/// # Example
///
/// ```
/// use netbox_api::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query("limit", "50")
///     .json(serde_json::json!({"name": "edge-01"}));
/// assert_eq!(options.query_params().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    json: Option<serde_json::Value>,
    headers: HeaderMap,
}

impl RequestOptions {
    /// Empty options: no query, no body, no extra headers
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters
    #[must_use]
    pub fn queries(mut self, params: &[(&str, &str)]) -> Self {
        self.query
            .extend(params.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Add extra headers, replacing any with the same name
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Same options with the query parameters removed
    pub(crate) fn without_query(mut self) -> Self {
        self.query.clear();
        self
    }

    /// Query parameters in insertion order
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body, if set
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        self.json.as_ref()
    }

    /// Extra headers
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }
}
