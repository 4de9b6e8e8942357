use std::net::IpAddr;
use std::time::Duration;

use tracing::Level;

use crate::authenticate::AuthenticateOptions;
use crate::error::ConfigurationError;
use crate::headers::{HeaderFilter, DEFAULT_ALLOW_LIST};
use crate::logging::TracingLogger;
use crate::policy::{parse_hop, TrustPolicy};
use crate::secret::ApiSecret;
use crate::verdict::ActionType;

/// Default base URL of the risk-decision API.
pub const DEFAULT_BASE_URL: &str = "https://api.castle.io";

/// Default timeout for risk-decision calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// SDK configuration.
///
/// There is no process-wide instance: build one at startup and derive the
/// [`TrustPolicy`], [`HeaderFilter`] and [`AuthenticateOptions`] handed to
/// each request from it.
///
/// # Examples
///
/// ```
/// use castle_sdk::{ActionType, Configuration};
///
/// let config = Configuration::new("sk-test")?
///     .with_fail_over_strategy(ActionType::Challenge)
///     .with_trusted_proxies(["203.0.113.7"])
///     .with_trusted_proxy_depth(1);
///
/// let policy = config.trust_policy()?;
/// assert_eq!(policy.trusted_proxy_depth(), 1);
/// assert_eq!(config.authenticate_options().fail_over_strategy, ActionType::Challenge);
/// # Ok::<(), castle_sdk::ConfigurationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Configuration {
    api_secret: ApiSecret,
    fail_over_strategy: ActionType,
    timeout: Duration,
    base_url: String,
    allow_list: Vec<String>,
    deny_list: Vec<String>,
    ip_headers: Option<Vec<String>>,
    trusted_proxies: Vec<String>,
    trusted_proxy_depth: usize,
    trust_proxy_chain: bool,
    do_not_track: bool,
    log_level: Level,
}

impl Configuration {
    /// Creates a configuration with defaults for everything but the secret.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if `api_secret` is empty.
    pub fn new(api_secret: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            api_secret: ApiSecret::new(api_secret)?,
            fail_over_strategy: ActionType::Allow,
            timeout: DEFAULT_TIMEOUT,
            base_url: DEFAULT_BASE_URL.to_string(),
            allow_list: DEFAULT_ALLOW_LIST.iter().map(|h| h.to_string()).collect(),
            deny_list: Vec::new(),
            ip_headers: None,
            trusted_proxies: Vec::new(),
            trusted_proxy_depth: 0,
            trust_proxy_chain: false,
            do_not_track: false,
            log_level: Level::ERROR,
        })
    }

    /// Action returned on failover; `ActionType::None` makes failures fatal.
    pub fn with_fail_over_strategy(mut self, strategy: ActionType) -> Self {
        self.fail_over_strategy = strategy;
        self
    }

    /// Timeout the transport should enforce.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the risk-decision API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Headers forwarded to the API. Empty forwards everything not denied.
    pub fn with_allow_list<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Headers never forwarded to the API.
    pub fn with_deny_list<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny_list = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Headers carrying the forwarding chain, in lookup order.
    pub fn with_ip_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ip_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Public proxy addresses to trust.
    pub fn with_trusted_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_proxies = proxies.into_iter().map(Into::into).collect();
        self
    }

    /// Number of forwarded hops to trust regardless of address.
    pub fn with_trusted_proxy_depth(mut self, depth: usize) -> Self {
        self.trusted_proxy_depth = depth;
        self
    }

    /// Trust every hop of the forwarding chain.
    pub fn with_trust_proxy_chain(mut self, trust: bool) -> Self {
        self.trust_proxy_chain = trust;
        self
    }

    /// Skip remote calls; authenticate returns a failover verdict.
    pub fn with_do_not_track(mut self, do_not_track: bool) -> Self {
        self.do_not_track = do_not_track;
        self
    }

    /// Most verbose level the SDK logs at. Failover warnings need `WARN`.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// The API secret.
    pub fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }

    /// Base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured log level.
    pub fn log_level(&self) -> Level {
        self.log_level
    }

    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.timeout.is_zero() {
            return Err(ConfigurationError::new("timeout", "must be greater than zero"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigurationError::new("base_url", "must not be empty"));
        }
        self.parse_trusted_proxies()?;
        Ok(())
    }

    /// Builds the trust policy for client IP resolution.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a trusted proxy is not an IP address.
    pub fn trust_policy(&self) -> Result<TrustPolicy, ConfigurationError> {
        let policy = TrustPolicy::default()
            .with_trusted_proxies(self.parse_trusted_proxies()?)
            .with_trusted_proxy_depth(self.trusted_proxy_depth)
            .with_trust_proxy_chain(self.trust_proxy_chain);

        Ok(match &self.ip_headers {
            Some(headers) => policy.with_forwarded_headers(headers.iter().cloned()),
            None => policy,
        })
    }

    /// Builds the outbound header filter.
    pub fn header_filter(&self) -> HeaderFilter {
        HeaderFilter::new(self.allow_list.clone(), self.deny_list.clone())
    }

    /// Settings for [`authenticate`](crate::authenticate).
    pub fn authenticate_options(&self) -> AuthenticateOptions {
        AuthenticateOptions {
            fail_over_strategy: self.fail_over_strategy,
            timeout: self.timeout,
            do_not_track: self.do_not_track,
        }
    }

    /// Logger honouring the configured log level.
    pub fn logger(&self) -> TracingLogger {
        TracingLogger::new(self.log_level)
    }

    fn parse_trusted_proxies(&self) -> Result<Vec<IpAddr>, ConfigurationError> {
        self.trusted_proxies
            .iter()
            .map(|proxy| {
                parse_hop(proxy).ok_or_else(|| {
                    ConfigurationError::new(
                        "trusted_proxies",
                        format!("'{}' is not an IP address", proxy),
                    )
                })
            })
            .collect()
    }
}
