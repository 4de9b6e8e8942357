//! Client SDK for a remote risk-decision service.
//!
//! This crate enriches an inbound request with a trust-aware client IP and
//! client id, and forwards it to the risk-decision service with bounded
//! failover:
//! - **Client IP**: reconstructed from forwarding headers under a
//!   [`TrustPolicy`], so spoofed hops are not believed
//! - **Client id**: read from the client-id header or cookie
//! - **Failover**: timeouts and server errors become a locally decided
//!   [`Verdict`], or a fatal [`Error`] when no strategy is configured
//!
//! The HTTP transport is supplied by the caller as the `send` function of
//! [`authenticate`].
//!
//! # Core Types
//!
//! - [`Configuration`]: SDK settings, validated at construction
//! - [`TrustPolicy`]: which hops of a forwarding chain are trusted
//! - [`RequestContext`]: client IP, client id and scrubbed headers of a request
//! - [`Verdict`]: the decision of one authenticate call
//!
//! # Examples
//!
//! ```
//! use castle_sdk::web::RequestAdapter;
//! use castle_sdk::{Configuration, RequestContext};
//!
//! let config = Configuration::new("sk-test").unwrap().with_trusted_proxy_depth(1);
//! let policy = config.trust_policy().unwrap();
//!
//! let mut request = RequestAdapter::new("6.6.6.4");
//! request.add_header("X-Forwarded-For", "6.6.6.6, 2.2.2.3, 6.6.6.5");
//!
//! let ctx = RequestContext::from_request(&request, &policy, &config.header_filter(), None);
//! assert_eq!(ctx.client_ip(), "2.2.2.3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod authenticate;
mod config;
mod context;
mod error;
mod failover;
mod headers;
mod identity;
mod logging;
mod policy;
mod proxy;
mod secret;
mod verdict;

pub mod signature;
pub mod web;

pub use authenticate::{authenticate, AuthenticateOptions};
pub use config::{Configuration, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use context::RequestContext;
pub use error::{ConfigurationError, Error, SendError, SendErrorKind};
pub use failover::{decide, FailoverDecision};
pub use headers::{HeaderFilter, DEFAULT_ALLOW_LIST};
pub use identity::{resolve_client_id, CLIENT_ID_COOKIE, CLIENT_ID_HEADER};
pub use logging::{InternalLogger, TracingLogger};
pub use policy::{TrustPolicy, DEFAULT_FORWARDED_HEADER};
pub use proxy::{resolve_client_ip, ForwardedChain};
pub use secret::ApiSecret;
pub use verdict::{ActionType, FailoverReason, RiskPolicy, Verdict};
