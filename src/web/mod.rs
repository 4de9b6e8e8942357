//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and the SDK. It
//! contains no framework-specific code: integrations either implement
//! [`RequestSource`] for their own request type or copy the request into a
//! [`RequestAdapter`].
//!
//! # Integration Flow
//!
//! ```text
//! HTTP Request
//!   ↓
//! Framework-specific code builds a RequestSource
//!   ↓
//! RequestContext::from_request(&source, &policy, &filter, None)
//!   ↓
//! authenticate(send, payload, &options, &logger)
//!   ↓
//! Verdict
//! ```

mod adapter;
mod extract;

pub use adapter::RequestAdapter;
pub use extract::RequestSource;
