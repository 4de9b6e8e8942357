//! Results of an authenticate call.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// The action recommended for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Let the request through
    Allow,
    /// Step up, e.g. with a second factor
    Challenge,
    /// Block the request
    Deny,
    /// No action; as a failover strategy this means "fail loudly"
    None,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Allow => write!(f, "allow"),
            ActionType::Challenge => write!(f, "challenge"),
            ActionType::Deny => write!(f, "deny"),
            ActionType::None => write!(f, "none"),
        }
    }
}

impl FromStr for ActionType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(ActionType::Allow),
            "challenge" => Ok(ActionType::Challenge),
            "deny" => Ok(ActionType::Deny),
            "none" => Ok(ActionType::None),
            other => Err(ConfigurationError::new(
                "fail_over_strategy",
                format!("unknown action '{}'", other),
            )),
        }
    }
}

/// Why a verdict was decided locally instead of by the remote service.
///
/// This set is closed; [`as_str`](Self::as_str) yields the only three
/// reason strings ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailoverReason {
    /// The remote call timed out
    Timeout,
    /// The remote call failed for any other reason
    ServerError,
    /// Tracking is disabled; no call was made
    DoNotTrack,
}

impl FailoverReason {
    /// The wire-level reason string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailoverReason::Timeout => "timeout",
            FailoverReason::ServerError => "server error",
            FailoverReason::DoNotTrack => "do not track",
        }
    }
}

impl fmt::Display for FailoverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The risk policy that produced a remote decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskPolicy {
    /// Policy identifier
    pub id: String,
    /// Revision of the policy that matched
    pub revision_id: String,
    /// Display name
    pub name: String,
    /// Policy type as reported by the service
    pub kind: String,
}

/// The decision for one authenticate call.
///
/// Built exactly once per call and never mutated afterwards; the builder
/// setters consume `self`.
///
/// # Examples
///
/// ```
/// use castle_sdk::{ActionType, FailoverReason, Verdict};
///
/// let verdict = Verdict::failover(ActionType::Allow, FailoverReason::Timeout);
/// assert!(verdict.failover);
/// assert_eq!(verdict.failover_reason(), Some("timeout"));
///
/// let decided = Verdict::decision(ActionType::Deny).with_user_id("u-42");
/// assert!(!decided.failover);
/// assert_eq!(decided.user_id.as_deref(), Some("u-42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Recommended action
    pub action: ActionType,
    /// Whether the verdict was decided locally
    pub failover: bool,
    /// Set only when `failover` is true
    pub reason: Option<FailoverReason>,
    /// User the decision applies to, as echoed by the service
    pub user_id: Option<String>,
    /// Device token assigned by the service
    pub device_token: Option<String>,
    /// Policy that matched, if any
    pub risk_policy: Option<RiskPolicy>,
}

impl Verdict {
    /// A verdict returned by the remote service.
    pub fn decision(action: ActionType) -> Self {
        Self {
            action,
            failover: false,
            reason: None,
            user_id: None,
            device_token: None,
            risk_policy: None,
        }
    }

    /// A locally decided verdict.
    pub fn failover(action: ActionType, reason: FailoverReason) -> Self {
        Self {
            action,
            failover: true,
            reason: Some(reason),
            user_id: None,
            device_token: None,
            risk_policy: None,
        }
    }

    /// Sets the user id.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the device token.
    pub fn with_device_token(mut self, token: impl Into<String>) -> Self {
        self.device_token = Some(token.into());
        self
    }

    /// Sets the matching risk policy.
    pub fn with_risk_policy(mut self, policy: RiskPolicy) -> Self {
        self.risk_policy = Some(policy);
        self
    }

    /// The failover reason string, if the verdict was decided locally.
    pub fn failover_reason(&self) -> Option<&'static str> {
        self.reason.map(|r| r.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_type_round_trips_through_display() {
        for action in [
            ActionType::Allow,
            ActionType::Challenge,
            ActionType::Deny,
            ActionType::None,
        ] {
            assert_eq!(action.to_string().parse::<ActionType>().unwrap(), action);
        }
    }

    #[test]
    fn action_type_parse_is_case_insensitive() {
        assert_eq!("DENY".parse::<ActionType>().unwrap(), ActionType::Deny);
        assert!("block".parse::<ActionType>().is_err());
    }

    #[test]
    fn failover_reason_strings() {
        assert_eq!(FailoverReason::Timeout.as_str(), "timeout");
        assert_eq!(FailoverReason::ServerError.as_str(), "server error");
        assert_eq!(FailoverReason::DoNotTrack.as_str(), "do not track");
    }

    #[test]
    fn decision_has_no_failover_reason() {
        let verdict = Verdict::decision(ActionType::Allow).with_device_token("dt-1");
        assert!(!verdict.failover);
        assert_eq!(verdict.failover_reason(), None);
        assert_eq!(verdict.device_token.as_deref(), Some("dt-1"));
    }
}
