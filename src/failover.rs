//! Decision table for failed risk-decision calls.

use crate::error::SendErrorKind;
use crate::verdict::{ActionType, FailoverReason};

/// What to do with a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailoverDecision {
    /// Whether a local verdict replaces the remote one
    pub should_failover: bool,
    /// Reason reported on the verdict
    pub reason: FailoverReason,
    /// Whether the failure is raised to the caller instead
    pub fatal: bool,
}

impl FailoverDecision {
    /// The failover action, or `None` when the failure is fatal.
    pub fn action(&self, strategy: ActionType) -> Option<ActionType> {
        self.should_failover.then_some(strategy)
    }
}

/// Maps a failure kind and the configured strategy to a decision.
///
/// Total over both inputs: a strategy of [`ActionType::None`] is the only
/// fatal combination.
///
/// # Examples
///
/// ```
/// use castle_sdk::{decide, ActionType, FailoverReason, SendErrorKind};
///
/// let d = decide(SendErrorKind::Timeout, ActionType::Challenge);
/// assert!(d.should_failover && !d.fatal);
/// assert_eq!(d.reason, FailoverReason::Timeout);
///
/// let d = decide(SendErrorKind::Server, ActionType::None);
/// assert!(d.fatal);
/// ```
pub fn decide(kind: SendErrorKind, strategy: ActionType) -> FailoverDecision {
    let reason = match kind {
        SendErrorKind::Timeout => FailoverReason::Timeout,
        SendErrorKind::Server => FailoverReason::ServerError,
    };
    let fatal = strategy == ActionType::None;

    FailoverDecision {
        should_failover: !fatal,
        reason,
        fatal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [SendErrorKind; 2] = [SendErrorKind::Timeout, SendErrorKind::Server];

    #[test]
    fn every_strategy_but_none_fails_over() {
        for kind in KINDS {
            for strategy in [ActionType::Allow, ActionType::Challenge, ActionType::Deny] {
                let d = decide(kind, strategy);
                assert!(d.should_failover);
                assert!(!d.fatal);
                assert_eq!(d.action(strategy), Some(strategy));
            }
        }
    }

    #[test]
    fn none_strategy_is_fatal() {
        for kind in KINDS {
            let d = decide(kind, ActionType::None);
            assert!(d.fatal);
            assert!(!d.should_failover);
            assert_eq!(d.action(ActionType::None), None);
        }
    }

    #[test]
    fn reason_follows_error_kind() {
        let timeout = decide(SendErrorKind::Timeout, ActionType::Allow);
        assert_eq!(timeout.reason, FailoverReason::Timeout);

        let server = decide(SendErrorKind::Server, ActionType::Deny);
        assert_eq!(server.reason, FailoverReason::ServerError);
    }
}
