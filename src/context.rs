use crate::headers::HeaderFilter;
use crate::identity::resolve_client_id;
use crate::policy::TrustPolicy;
use crate::proxy::resolve_client_ip;
use crate::web::RequestSource;

/// Per-request data sent along with a risk-decision call.
///
/// Built once from the inbound request and never changed afterwards.
///
/// # Examples
///
/// ```
/// use castle_sdk::web::RequestAdapter;
/// use castle_sdk::{HeaderFilter, RequestContext, TrustPolicy};
///
/// let mut adapter = RequestAdapter::new("10.0.0.1");
/// adapter.add_header("X-Forwarded-For", "203.0.113.9");
/// adapter.add_header("X-Castle-Client-ID", "cid-1");
/// adapter.add_header("User-Agent", "curl/8.0");
///
/// let ctx = RequestContext::from_request(
///     &adapter,
///     &TrustPolicy::default(),
///     &HeaderFilter::default(),
///     None,
/// );
///
/// assert_eq!(ctx.client_ip(), "203.0.113.9");
/// assert_eq!(ctx.client_id(), "cid-1");
/// assert_eq!(ctx.headers().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    client_ip: String,
    client_id: String,
    headers: Vec<(String, String)>,
}

impl RequestContext {
    /// Resolves client IP and id and scrubs the headers of `source`.
    ///
    /// `ip_header_override` names headers to read the client IP from
    /// verbatim, bypassing the trust chain.
    pub fn from_request<R>(
        source: &R,
        policy: &TrustPolicy,
        filter: &HeaderFilter,
        ip_header_override: Option<&[String]>,
    ) -> Self
    where
        R: RequestSource + ?Sized,
    {
        let client_ip = resolve_client_ip(
            ip_header_override,
            |name: &str| source.header(name),
            || source.peer_address(),
            policy,
        );
        let client_id = resolve_client_id(
            |name: &str| source.header(name),
            |name: &str| source.cookie(name),
        );

        Self {
            client_ip,
            client_id,
            headers: filter.scrub(&source.header_pairs()),
        }
    }

    /// Resolved client IP.
    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }

    /// Resolved client id; empty when unknown.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Scrubbed headers, in arrival order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}
