//! Owned request adapter for framework integrations.

use std::collections::HashMap;

use super::RequestSource;

/// Framework-neutral request data.
///
/// Framework-specific code copies headers, cookies and the socket peer into
/// a `RequestAdapter` (typically via `From<FrameworkRequest>`), and the rest
/// of the SDK reads it through [`RequestSource`].
///
/// # Examples
///
/// ```
/// use castle_sdk::web::{RequestAdapter, RequestSource};
///
/// let mut adapter = RequestAdapter::new("10.0.0.7");
/// adapter.add_header("X-Forwarded-For", "203.0.113.9");
/// adapter.add_cookie("__cid", "cid-123");
///
/// assert_eq!(adapter.header("x-forwarded-for").as_deref(), Some("203.0.113.9"));
/// assert_eq!(adapter.cookie("__cid").as_deref(), Some("cid-123"));
/// assert_eq!(adapter.peer_address(), "10.0.0.7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    peer_address: String,
    /// Headers in arrival order
    headers: Vec<(String, String)>,
    cookies: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates an adapter for a request received from `peer_address`.
    pub fn new(peer_address: impl Into<String>) -> Self {
        Self {
            peer_address: peer_address.into(),
            headers: Vec::new(),
            cookies: HashMap::new(),
        }
    }

    /// Adds a header. A repeated name is kept in addition to earlier ones;
    /// lookups return the first.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Adds a cookie. Cookie names are case-sensitive.
    pub fn add_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Headers in arrival order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl RequestSource for RequestAdapter {
    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn peer_address(&self) -> String {
        self.peer_address.clone()
    }

    fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }
}
