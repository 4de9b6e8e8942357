use std::fmt;

use crate::error::ConfigurationError;

/// The credential used to authenticate with the risk-decision API.
///
/// `ApiSecret` cannot be printed: `Debug` and `Display` always produce
/// `[REDACTED]`, so a `Configuration` can be logged wholesale without leaking
/// the key. The raw value is reachable only through
/// [`expose_secret`](Self::expose_secret).
///
/// # Examples
///
/// ```
/// use castle_sdk::ApiSecret;
///
/// let secret = ApiSecret::new("sk-1234567890").unwrap();
/// assert_eq!(format!("{:?}", secret), "[REDACTED]");
/// assert_eq!(secret.expose_secret(), "sk-1234567890");
///
/// assert!(ApiSecret::new("   ").is_err());
/// ```
// Do NOT derive Debug or implement AsRef/Deref: the value must not leak implicitly.
#[derive(Clone)]
pub struct ApiSecret {
    inner: String,
}

impl ApiSecret {
    /// Wraps an API secret, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigurationError> {
        let inner = value.into();
        if inner.trim().is_empty() {
            return Err(ConfigurationError::new("api_secret", "must not be empty"));
        }
        Ok(Self { inner })
    }

    /// Explicitly exposes the secret, e.g. to build an authorization header
    /// or to key a signature.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_redacts_debug_and_display() {
        let secret = ApiSecret::new("hunter2").unwrap();

        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert!(!format!("{:?}", secret).contains("String"));
    }

    #[test]
    fn secret_rejects_empty() {
        let err = ApiSecret::new("").unwrap_err();
        assert_eq!(err.field, "api_secret");
    }

    #[test]
    fn secret_exposes_when_explicit() {
        let secret = ApiSecret::new("sk-live").unwrap();
        assert_eq!(secret.expose_secret(), "sk-live");
    }
}
