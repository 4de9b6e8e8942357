use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Header carrying the forwarding chain when none is configured.
pub const DEFAULT_FORWARDED_HEADER: &str = "X-Forwarded-For";

/// Which network hops are trusted when reconstructing the client address.
///
/// A `TrustPolicy` is built once from configuration and only read
/// afterwards, so one instance can be shared by every in-flight request.
///
/// # Examples
///
/// ```
/// use castle_sdk::TrustPolicy;
///
/// let policy = TrustPolicy::default()
///     .with_trusted_proxies(["203.0.113.7".parse().unwrap()])
///     .with_trusted_proxy_depth(1);
///
/// assert!(policy.is_trusted_address("10.1.2.3"));
/// assert!(policy.is_trusted_address("203.0.113.7"));
/// assert!(!policy.is_trusted_address("198.51.100.1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustPolicy {
    explicit_trusted_proxies: HashSet<IpAddr>,
    trusted_proxy_depth: usize,
    trust_proxy_chain_fully: bool,
    forwarded_header_names: Vec<String>,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self {
            explicit_trusted_proxies: HashSet::new(),
            trusted_proxy_depth: 0,
            trust_proxy_chain_fully: false,
            forwarded_header_names: vec![DEFAULT_FORWARDED_HEADER.to_string()],
        }
    }
}

impl TrustPolicy {
    /// Addresses always treated as trusted hops.
    pub fn with_trusted_proxies(mut self, proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        self.explicit_trusted_proxies = proxies.into_iter().collect();
        self
    }

    /// Number of forwarded hops beyond the direct peer trusted regardless of address.
    pub fn with_trusted_proxy_depth(mut self, depth: usize) -> Self {
        self.trusted_proxy_depth = depth;
        self
    }

    /// Trust every hop unconditionally.
    pub fn with_trust_proxy_chain(mut self, trust: bool) -> Self {
        self.trust_proxy_chain_fully = trust;
        self
    }

    /// Headers carrying a comma-separated forwarding chain, in lookup order.
    ///
    /// An empty list keeps the default header.
    pub fn with_forwarded_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if !names.is_empty() {
            self.forwarded_header_names = names;
        }
        self
    }

    /// Explicitly trusted proxy addresses.
    pub fn explicit_trusted_proxies(&self) -> &HashSet<IpAddr> {
        &self.explicit_trusted_proxies
    }

    /// Configured trusted hop depth.
    pub fn trusted_proxy_depth(&self) -> usize {
        self.trusted_proxy_depth
    }

    /// Whether every hop is trusted.
    pub fn trusts_proxy_chain_fully(&self) -> bool {
        self.trust_proxy_chain_fully
    }

    /// Forwarding header names in lookup order.
    pub fn forwarded_header_names(&self) -> &[String] {
        &self.forwarded_header_names
    }

    /// Whether `hop` is explicitly trusted or lies in an internal range.
    ///
    /// Hops that do not parse as an IP address are never trusted by address.
    pub fn is_trusted_address(&self, hop: &str) -> bool {
        match parse_hop(hop) {
            Some(ip) => self.explicit_trusted_proxies.contains(&ip) || is_internal(&ip),
            None => false,
        }
    }
}

/// Parses a hop as it appears in a forwarding header.
///
/// Accepts bare addresses and the bracketed IPv6 form (`[::1]`).
pub(crate) fn parse_hop(hop: &str) -> Option<IpAddr> {
    let hop = hop.trim();
    let hop = hop
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(hop);
    hop.parse().ok()
}

/// Private (RFC 1918 / unique-local), loopback and link-local ranges.
pub(crate) fn is_internal(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_internal_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_internal_v4(&v4),
            None => is_internal_v6(v6),
        },
    }
}

fn is_internal_v4(ip: &Ipv4Addr) -> bool {
    ip.is_private() || ip.is_loopback() || ip.is_link_local()
}

fn is_internal_v6(ip: &Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
}
