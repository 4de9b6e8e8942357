//! Client IP reconstruction from forwarding headers.
//!
//! Two disjoint modes:
//!
//! - **Explicit override**: the caller names the ingress headers it trusts
//!   (e.g. a platform-injected `CF-Connecting-IP`). The first one present is
//!   returned verbatim.
//! - **Trust chain**: the forwarding chain is walked nearest hop first and the
//!   first untrusted hop is the client.
//!
//! Neither mode fails. Missing or malformed headers degrade to the direct
//! peer address.

use crate::policy::{parse_hop, TrustPolicy};

/// The hops of a request, nearest first.
///
/// The direct transport peer comes first, followed by the forwarding header
/// entries in reverse, so the header's rightmost entry (the proxy closest to
/// us) is second and its leftmost entry (the originally claimed client) is
/// last.
///
/// # Examples
///
/// ```
/// use castle_sdk::ForwardedChain;
///
/// let chain = ForwardedChain::new("10.0.0.2", Some("1.1.1.1, 2.2.2.2"));
/// assert_eq!(chain.hops(), ["10.0.0.2", "2.2.2.2", "1.1.1.1"]);
///
/// let bare = ForwardedChain::new("10.0.0.2", None);
/// assert_eq!(bare.hops(), ["10.0.0.2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedChain {
    hops: Vec<String>,
}

impl ForwardedChain {
    /// Builds the chain from the direct peer and a raw forwarding header value.
    ///
    /// Empty header entries are skipped and the rest are stored in canonical
    /// address form. A header with any entry that is not a bare IP address
    /// (including `host:port`) is malformed and ignored as a whole, leaving
    /// only the direct peer.
    ///
    /// ```
    /// use castle_sdk::ForwardedChain;
    ///
    /// let chain = ForwardedChain::new("10.0.0.1", Some("unknown, 10.0.0.9"));
    /// assert_eq!(chain.hops(), ["10.0.0.1"]);
    /// ```
    pub fn new(direct_peer: impl Into<String>, forwarded: Option<&str>) -> Self {
        let mut hops = vec![direct_peer.into()];
        if let Some(forwarded) = forwarded.and_then(parse_forwarded) {
            hops.extend(forwarded);
        }
        Self { hops }
    }

    /// Hops, nearest first. Never empty.
    pub fn hops(&self) -> &[String] {
        &self.hops
    }

    /// Walks the chain and returns the first hop `policy` does not trust.
    ///
    /// The direct peer (index 0) is always walked past. Hops outside the
    /// trusted ranges consume the trusted depth budget before one is
    /// returned. If every hop is trusted, the farthest one is the client.
    pub fn client_ip(&self, policy: &TrustPolicy) -> &str {
        let mut remaining = policy.trusted_proxy_depth();

        for (index, hop) in self.hops.iter().enumerate() {
            if policy.trusts_proxy_chain_fully() {
                continue;
            }
            if index == 0 || policy.is_trusted_address(hop) {
                continue;
            }
            if remaining > 0 {
                remaining -= 1;
                continue;
            }
            return hop;
        }

        // hops always holds at least the direct peer
        self.hops.last().map(String::as_str).unwrap_or_default()
    }
}

/// Computes the client IP of a request.
///
/// `explicit_header_override`, when non-empty, switches to override mode.
/// Otherwise the forwarding chain is built from the first of the policy's
/// forwarded headers that is present.
///
/// An externally routable direct peer is returned straight away when the
/// policy grants no forwarding trust at all: nothing it claims in headers is
/// believed.
///
/// # Examples
///
/// ```
/// use castle_sdk::{resolve_client_ip, TrustPolicy};
///
/// let header = |name: &str| match name {
///     "X-Forwarded-For" => Some("6.6.6.6, 2.2.2.3, 6.6.6.5".to_string()),
///     _ => None,
/// };
/// let policy = TrustPolicy::default().with_trusted_proxy_depth(1);
///
/// let ip = resolve_client_ip(None, header, || "6.6.6.4".to_string(), &policy);
/// assert_eq!(ip, "2.2.2.3");
/// ```
pub fn resolve_client_ip<H, P>(
    explicit_header_override: Option<&[String]>,
    header: H,
    direct_peer: P,
    policy: &TrustPolicy,
) -> String
where
    H: Fn(&str) -> Option<String>,
    P: FnOnce() -> String,
{
    match explicit_header_override {
        Some(names) if !names.is_empty() => from_override(names, header, direct_peer),
        _ => from_trust_chain(header, direct_peer, policy),
    }
}

fn from_override<H, P>(names: &[String], header: H, direct_peer: P) -> String
where
    H: Fn(&str) -> Option<String>,
    P: FnOnce() -> String,
{
    names
        .iter()
        .find_map(|name| non_empty(header(name.as_str())))
        .unwrap_or_else(direct_peer)
}

fn from_trust_chain<H, P>(header: H, direct_peer: P, policy: &TrustPolicy) -> String
where
    H: Fn(&str) -> Option<String>,
    P: FnOnce() -> String,
{
    let peer = direct_peer();

    if !policy.trusts_proxy_chain_fully()
        && policy.trusted_proxy_depth() == 0
        && !policy.is_trusted_address(&peer)
    {
        return peer;
    }

    let forwarded = policy
        .forwarded_header_names()
        .iter()
        .find_map(|name| non_empty(header(name.as_str())));

    ForwardedChain::new(peer, forwarded.as_deref())
        .client_ip(policy)
        .to_string()
}

/// Header entries nearest first, or `None` if any entry is not an address.
fn parse_forwarded(value: &str) -> Option<Vec<String>> {
    value
        .rsplit(',')
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map(|hop| parse_hop(hop).map(|ip| ip.to_string()))
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
