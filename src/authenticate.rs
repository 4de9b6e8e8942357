//! The authenticate call and its failover state machine.
//!
//! ```text
//! NOT_STARTED --do_not_track--> FAILED_OVER("do not track")   (send never invoked)
//! NOT_STARTED ----------------> SENT
//! SENT --Ok------------------->  SUCCEEDED
//! SENT --Err(kind)------------>  CLASSIFY(kind)
//! CLASSIFY --strategy != None->  FAILED_OVER(strategy, reason) + one warning
//! CLASSIFY --strategy == None->  Err(Error::External(original))
//! ```
//!
//! There are no retries and no timer here; the transport behind `send`
//! enforces the timeout and reports it as [`SendErrorKind::Timeout`].
//!
//! [`SendErrorKind::Timeout`]: crate::SendErrorKind::Timeout

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, SendError};
use crate::failover::decide;
use crate::logging::InternalLogger;
use crate::verdict::{ActionType, FailoverReason, Verdict};

/// Per-call settings for [`authenticate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticateOptions {
    /// Action returned when the call fails; `None` makes failures fatal
    pub fail_over_strategy: ActionType,
    /// Timeout the transport should enforce
    pub timeout: Duration,
    /// Skip the remote call entirely
    pub do_not_track: bool,
}

impl Default for AuthenticateOptions {
    fn default() -> Self {
        Self {
            fail_over_strategy: ActionType::Allow,
            timeout: Duration::from_millis(1000),
            do_not_track: false,
        }
    }
}

/// Sends `request` to the risk-decision service and applies failover.
///
/// # Errors
///
/// Returns [`Error::External`] carrying the original [`SendError`] when the
/// call fails and `fail_over_strategy` is [`ActionType::None`].
///
/// # Examples
///
/// ```
/// use castle_sdk::{
///     authenticate, ActionType, AuthenticateOptions, SendError, TracingLogger, Verdict,
/// };
///
/// # block_on(async {
/// let options = AuthenticateOptions {
///     fail_over_strategy: ActionType::Deny,
///     ..Default::default()
/// };
///
/// let verdict = authenticate(
///     |_req: &str| async { Err::<Verdict, _>(SendError::server("502 Bad Gateway")) },
///     "payload",
///     &options,
///     &TracingLogger::default(),
/// )
/// .await
/// .unwrap();
///
/// assert_eq!(verdict.action, ActionType::Deny);
/// assert_eq!(verdict.failover_reason(), Some("server error"));
/// # });
/// # fn block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// #     runtime.block_on(f)
/// # }
/// ```
pub async fn authenticate<Req, F, Fut, L>(
    send: F,
    request: Req,
    options: &AuthenticateOptions,
    logger: &L,
) -> Result<Verdict, Error>
where
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Verdict, SendError>>,
    L: InternalLogger + ?Sized,
{
    if options.do_not_track {
        tracing::debug!("do not track enabled, skipping risk call");
        return Ok(Verdict::failover(
            options.fail_over_strategy,
            FailoverReason::DoNotTrack,
        ));
    }

    match send(request).await {
        Ok(verdict) => Ok(verdict),
        Err(err) => {
            let decision = decide(err.kind, options.fail_over_strategy);
            match decision.action(options.fail_over_strategy) {
                Some(action) => {
                    logger.warn(&|| format!("Failover, {}", err));
                    Ok(Verdict::failover(action, decision.reason))
                }
                None => Err(Error::External(err)),
            }
        }
    }
}
