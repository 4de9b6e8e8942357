use std::fmt;
use std::time::Duration;

/// Errors surfaced to callers of this crate.
#[derive(Debug)]
pub enum Error {
    /// The risk-decision call failed and no failover strategy was configured.
    External(SendError),
    /// Configuration was invalid at construction time.
    Configuration(ConfigurationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::External(e) => write!(f, "External service error: {}", e),
            Error::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::External(e) => Some(e),
            Error::Configuration(e) => Some(e),
        }
    }
}

impl From<SendError> for Error {
    fn from(e: SendError) -> Self {
        Error::External(e)
    }
}

impl From<ConfigurationError> for Error {
    fn from(e: ConfigurationError) -> Self {
        Error::Configuration(e)
    }
}

/// The failure a transport reports when a risk-decision call does not complete.
///
/// Transports must distinguish timeouts from every other failure so the
/// failover decision can tag the verdict correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendError {
    /// Classification of the failure
    pub kind: SendErrorKind,
    /// Human-readable description of the original failure
    pub message: String,
}

impl SendError {
    /// Creates a new send error.
    pub fn new(kind: SendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A call to `endpoint` that did not finish within `timeout`.
    ///
    /// # Examples
    ///
    /// ```
    /// use castle_sdk::{SendError, SendErrorKind};
    /// use std::time::Duration;
    ///
    /// let err = SendError::timeout("/v1/authenticate", Duration::from_millis(1000));
    /// assert_eq!(err.kind, SendErrorKind::Timeout);
    /// assert!(err.to_string().contains("1000 ms"));
    /// ```
    pub fn timeout(endpoint: impl fmt::Display, timeout: Duration) -> Self {
        Self::new(
            SendErrorKind::Timeout,
            format!(
                "request to {} timed out after {} ms",
                endpoint,
                timeout.as_millis()
            ),
        )
    }

    /// Any non-timeout failure: network, non-success status, undecodable body.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(SendErrorKind::Server, message)
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SendError {}

/// The kind of transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SendErrorKind {
    /// The call exceeded the configured timeout
    Timeout,
    /// Any other failure of the remote call
    Server,
}

impl fmt::Display for SendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendErrorKind::Timeout => write!(f, "Timeout"),
            SendErrorKind::Server => write!(f, "Server error"),
        }
    }
}

/// Invalid or missing configuration, detected when the configuration is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    /// The offending configuration field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl ConfigurationError {
    /// Creates a new configuration error for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn external_error_keeps_original_as_source() {
        let original = SendError::server("connection reset by peer");
        let err = Error::from(original.clone());

        let source = err.source().expect("source should be attached");
        assert_eq!(source.to_string(), original.to_string());
        assert!(err.to_string().contains("connection reset by peer"));
    }

    #[test]
    fn configuration_error_names_field() {
        let err = ConfigurationError::new("api_secret", "must not be empty");
        assert_eq!(err.to_string(), "'api_secret' must not be empty");
    }

    #[test]
    fn timeout_message_mentions_endpoint() {
        let endpoint = "https://api.example.com/v1/authenticate";
        let err = SendError::timeout(endpoint, Duration::from_secs(2));
        assert!(err.message.contains(endpoint));
        assert!(err.message.contains("2000 ms"));
    }
}
