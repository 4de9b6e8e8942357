//! Authenticate failover behavior, driven the way a transport would drive it.

use std::error::Error as _;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use castle_sdk::web::RequestAdapter;
use castle_sdk::{
    authenticate, ActionType, Configuration, Error, InternalLogger, RequestContext, SendError,
    TracingLogger, Verdict,
};
use tracing::Level;

#[derive(Default)]
struct RecordingLogger {
    warnings: Mutex<Vec<String>>,
}

impl InternalLogger for RecordingLogger {
    fn warn(&self, message: &dyn Fn() -> String) {
        self.warnings.lock().unwrap().push(message());
    }
}

fn config(strategy: ActionType) -> Configuration {
    Configuration::new("sk-test")
        .unwrap()
        .with_fail_over_strategy(strategy)
        .with_timeout(Duration::from_millis(250))
}

fn context() -> RequestContext {
    let mut adapter = RequestAdapter::new("10.0.0.1");
    adapter.add_header("X-Forwarded-For", "203.0.113.9");
    adapter.add_header("X-Castle-Client-ID", "cid-1");
    let config = config(ActionType::Allow);
    RequestContext::from_request(
        &adapter,
        &config.trust_policy().unwrap(),
        &config.header_filter(),
        None,
    )
}

/// Log output captured from a `fmt` subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn warn_subscriber(captured: &Captured) -> impl tracing::Subscriber + Send + Sync {
    let writer = captured.clone();
    tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(Level::WARN)
        .finish()
}

#[tokio::test]
async fn remote_verdict_is_returned_and_request_reaches_transport() {
    let logger = RecordingLogger::default();
    let options = config(ActionType::Allow).authenticate_options();

    let verdict = authenticate(
        |ctx: RequestContext| async move {
            assert_eq!(ctx.client_ip(), "203.0.113.9");
            assert_eq!(ctx.client_id(), "cid-1");
            Ok(Verdict::decision(ActionType::Deny).with_device_token("dt-1"))
        },
        context(),
        &options,
        &logger,
    )
    .await
    .unwrap();

    assert_eq!(verdict.action, ActionType::Deny);
    assert!(!verdict.failover);
    assert_eq!(verdict.device_token.as_deref(), Some("dt-1"));
    assert!(logger.warnings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn do_not_track_skips_transport() {
    let calls = AtomicUsize::new(0);
    let options = config(ActionType::Allow)
        .with_do_not_track(true)
        .authenticate_options();

    let verdict = authenticate(
        |_ctx: RequestContext| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Verdict::decision(ActionType::Deny)) }
        },
        context(),
        &options,
        &TracingLogger::default(),
    )
    .await
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(verdict.failover);
    assert_eq!(verdict.failover_reason(), Some("do not track"));
}

#[tokio::test]
async fn transport_timeout_fails_over_with_strategy() {
    let logger = RecordingLogger::default();
    let options = config(ActionType::Challenge).authenticate_options();
    let timeout = options.timeout;

    let verdict = authenticate(
        move |_ctx: RequestContext| async move {
            Err(SendError::timeout("https://api.castle.io/v1/authenticate", timeout))
        },
        context(),
        &options,
        &logger,
    )
    .await
    .unwrap();

    assert!(verdict.failover);
    assert_eq!(verdict.action, ActionType::Challenge);
    assert_eq!(verdict.failover_reason(), Some("timeout"));

    let warnings = logger.warnings.lock().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Failover, "));
    assert!(warnings[0].contains("timed out after 250 ms"));
}

#[tokio::test]
async fn server_error_fails_over_and_logs_original() {
    let logger = RecordingLogger::default();
    let options = config(ActionType::Allow).authenticate_options();

    let verdict = authenticate(
        |_ctx: RequestContext| async { Err(SendError::server("500 Internal Server Error")) },
        context(),
        &options,
        &logger,
    )
    .await
    .unwrap();

    assert_eq!(verdict.failover_reason(), Some("server error"));
    assert_eq!(verdict.action, ActionType::Allow);

    let warnings = logger.warnings.lock().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("500 Internal Server Error"));
}

#[tokio::test]
async fn none_strategy_raises_with_original_cause() {
    let logger = RecordingLogger::default();
    let options = config(ActionType::None).authenticate_options();

    let err = authenticate(
        |_ctx: RequestContext| async { Err(SendError::server("connection refused")) },
        context(),
        &options,
        &logger,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::External(_)));
    let source = err.source().expect("original failure attached");
    assert!(source.to_string().contains("connection refused"));
    assert!(logger.warnings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn none_strategy_raises_on_timeout_too() {
    let options = config(ActionType::None).authenticate_options();

    let result = authenticate(
        |_ctx: RequestContext| async {
            Err(SendError::timeout("/v1/authenticate", Duration::from_millis(1)))
        },
        context(),
        &options,
        &TracingLogger::default(),
    )
    .await;

    match result {
        Err(Error::External(e)) => assert!(e.message.contains("timed out")),
        other => panic!("expected external error, got {:?}", other),
    }
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let options = config(ActionType::Deny).authenticate_options();
    let logger = RecordingLogger::default();

    let ok = authenticate(
        |_ctx: RequestContext| async { Ok(Verdict::decision(ActionType::Allow)) },
        context(),
        &options,
        &logger,
    );
    let failed = authenticate(
        |_ctx: RequestContext| async { Err(SendError::server("reset")) },
        context(),
        &options,
        &logger,
    );

    let (ok, failed) = tokio::join!(ok, failed);
    assert!(!ok.unwrap().failover);
    assert_eq!(failed.unwrap().action, ActionType::Deny);
    assert_eq!(logger.warnings.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn default_log_level_suppresses_failover_warning() {
    let captured = Captured::default();
    let _guard = tracing::subscriber::set_default(warn_subscriber(&captured));
    let config = config(ActionType::Allow);
    let evaluated = AtomicBool::new(false);

    let verdict = authenticate(
        |_ctx: RequestContext| async { Err(SendError::server("503 Service Unavailable")) },
        context(),
        &config.authenticate_options(),
        &config.logger(),
    )
    .await
    .unwrap();

    assert!(verdict.failover);
    assert_eq!(config.log_level(), Level::ERROR);
    assert!(!captured.text().contains("Failover"), "{}", captured.text());

    config.logger().warn(&|| {
        evaluated.store(true, Ordering::SeqCst);
        "Failover, 503 Service Unavailable".to_string()
    });
    assert!(!evaluated.load(Ordering::SeqCst));
}

#[tokio::test]
async fn warn_log_level_emits_failover_warning() {
    let captured = Captured::default();
    let _guard = tracing::subscriber::set_default(warn_subscriber(&captured));
    let config = config(ActionType::Challenge).with_log_level(Level::WARN);

    let verdict = authenticate(
        |_ctx: RequestContext| async { Err(SendError::server("503 Service Unavailable")) },
        context(),
        &config.authenticate_options(),
        &config.logger(),
    )
    .await
    .unwrap();

    assert_eq!(verdict.action, ActionType::Challenge);
    let output = captured.text();
    assert!(output.contains("Failover, "), "{}", output);
    assert!(output.contains("503 Service Unavailable"), "{}", output);
}
