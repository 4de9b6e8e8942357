//! Scrubbing of request headers before they leave the process.

/// Headers forwarded by default.
pub const DEFAULT_ALLOW_LIST: &[&str] = &[
    "Accept",
    "Accept-Charset",
    "Accept-Datetime",
    "Accept-Encoding",
    "Accept-Language",
    "Cache-Control",
    "Connection",
    "Content-Length",
    "Content-Type",
    "Dnt",
    "Host",
    "Origin",
    "Pragma",
    "Referer",
    "Sec-Fetch-Dest",
    "Sec-Fetch-Mode",
    "Sec-Fetch-Site",
    "Sec-Fetch-User",
    "Te",
    "Upgrade-Insecure-Requests",
    "User-Agent",
    "X-Castle-Client-Id",
    "X-Requested-With",
];

const ALWAYS_KEPT: &str = "User-Agent";
const COOKIE: &str = "Cookie";
const SCRUBBED: &str = "true";

/// Allow/deny lists applied to outbound headers.
///
/// Names match case-insensitively. The `Cookie` header is never sent in
/// clear; its value is replaced by `"true"`. When the allow list is
/// non-empty, anything outside it is dropped except `User-Agent`. The deny
/// list always wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderFilter {
    allow_list: Vec<String>,
    deny_list: Vec<String>,
}

impl HeaderFilter {
    /// Creates a filter from the two lists.
    pub fn new(allow_list: Vec<String>, deny_list: Vec<String>) -> Self {
        Self {
            allow_list,
            deny_list,
        }
    }

    /// Applies the filter, preserving input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use castle_sdk::HeaderFilter;
    ///
    /// let filter = HeaderFilter::new(vec!["Accept".into()], vec!["Authorization".into()]);
    /// let headers = vec![
    ///     ("accept".to_string(), "*/*".to_string()),
    ///     ("Authorization".to_string(), "Bearer x".to_string()),
    ///     ("User-Agent".to_string(), "curl".to_string()),
    ///     ("X-Debug".to_string(), "1".to_string()),
    /// ];
    ///
    /// let kept = filter.scrub(&headers);
    /// assert_eq!(kept, vec![
    ///     ("accept".to_string(), "*/*".to_string()),
    ///     ("User-Agent".to_string(), "curl".to_string()),
    /// ]);
    /// ```
    pub fn scrub(&self, headers: &[(String, String)]) -> Vec<(String, String)> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                if contains(&self.deny_list, name) {
                    return None;
                }
                if name.eq_ignore_ascii_case(COOKIE) {
                    return Some((name.clone(), SCRUBBED.to_string()));
                }
                if !self.allow_list.is_empty()
                    && !name.eq_ignore_ascii_case(ALWAYS_KEPT)
                    && !contains(&self.allow_list, name)
                {
                    return None;
                }
                Some((name.clone(), value.clone()))
            })
            .collect()
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}
