use tracing::Level;

/// Logger injected into the SDK for its own diagnostics.
///
/// Messages are passed as factories so that formatting (which may include a
/// full error description) is skipped when the level is disabled.
/// Implementations must only evaluate `message` if they will emit it.
///
/// # Examples
///
/// ```
/// use castle_sdk::InternalLogger;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<String>>);
///
/// impl InternalLogger for Collect {
///     fn warn(&self, message: &dyn Fn() -> String) {
///         self.0.lock().unwrap().push(message());
///     }
/// }
///
/// let logger = Collect::default();
/// logger.warn(&|| "Failover, timeout".to_string());
/// assert_eq!(logger.0.lock().unwrap().len(), 1);
/// ```
pub trait InternalLogger {
    /// Logs a warning.
    fn warn(&self, message: &dyn Fn() -> String);
}

/// The default logger, forwarding to `tracing`.
///
/// `level` is the most verbose level the SDK emits, independent of the
/// subscriber's own filter. Factories are evaluated only when both allow
/// the message. The default level is `ERROR`, which keeps failover
/// warnings quiet.
///
/// # Examples
///
/// ```
/// use castle_sdk::TracingLogger;
/// use tracing::Level;
///
/// assert_eq!(TracingLogger::default().level(), Level::ERROR);
/// assert_eq!(TracingLogger::new(Level::WARN).level(), Level::WARN);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    level: Level,
}

impl TracingLogger {
    /// Creates a logger emitting messages up to `level`.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Most verbose level emitted.
    pub fn level(&self) -> Level {
        self.level
    }

    fn allows(&self, level: Level) -> bool {
        // tracing orders levels by verbosity: ERROR < WARN < ... < TRACE
        level <= self.level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(Level::ERROR)
    }
}

impl InternalLogger for TracingLogger {
    fn warn(&self, message: &dyn Fn() -> String) {
        if self.allows(Level::WARN) && tracing::enabled!(Level::WARN) {
            tracing::warn!("{}", message());
        }
    }
}

impl<L: InternalLogger + ?Sized> InternalLogger for &L {
    fn warn(&self, message: &dyn Fn() -> String) {
        (**self).warn(message)
    }
}
