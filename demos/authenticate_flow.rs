//! Authenticate flow demonstration.
//!
//! This example walks one request through the SDK:
//! 1. Capture the incoming request in a `RequestAdapter`
//! 2. Build a `RequestContext` with the configured trust policy
//! 3. Call `authenticate` with a transport closure
//! 4. Fail over when the transport errors
//!
//! Run with: `cargo run --example authenticate_flow`

use std::time::Duration;

use castle_sdk::web::RequestAdapter;
use castle_sdk::{
    authenticate, ActionType, Configuration, Error, RequestContext, SendError, Verdict,
};
use tracing::Level;

/// Simulates a request arriving through a load balancer
fn incoming_request() -> RequestAdapter {
    let mut adapter = RequestAdapter::new("10.0.0.1");
    adapter.add_header("X-Forwarded-For", "198.51.100.23, 203.0.113.7");
    adapter.add_header("User-Agent", "Mozilla/5.0");
    adapter.add_header("Authorization", "Bearer not-forwarded");
    adapter.add_header("X-Castle-Client-ID", "cid-42");
    adapter.add_cookie("session", "abc");
    adapter
}

/// Simulates the risk API answering
async fn healthy_transport(ctx: RequestContext) -> Result<Verdict, SendError> {
    println!("   -> sending for {} ({})", ctx.client_ip(), ctx.client_id());
    Ok(Verdict::decision(ActionType::Allow).with_device_token("dt-1"))
}

/// Simulates the risk API timing out
async fn slow_transport(_ctx: RequestContext) -> Result<Verdict, SendError> {
    Err(SendError::timeout(
        "https://api.castle.io/v1/authenticate",
        Duration::from_millis(1000),
    ))
}

fn print_verdict(verdict: &Verdict) {
    println!("   Action: {}", verdict.action);
    println!("   Failover: {}", verdict.failover);
    if let Some(reason) = verdict.failover_reason() {
        println!("   Reason: {}", reason);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().with_max_level(Level::WARN).init();

    let config = Configuration::new("sk-demo")?
        .with_fail_over_strategy(ActionType::Challenge)
        .with_trusted_proxies(["203.0.113.7"])
        .with_log_level(Level::WARN);
    config.validate()?;

    println!("=== Building request context ===");
    let adapter = incoming_request();
    let policy = config.trust_policy()?;
    let filter = config.header_filter();
    let ctx = RequestContext::from_request(&adapter, &policy, &filter, None);
    println!("   Client IP: {}", ctx.client_ip());
    println!("   Client ID: {}", ctx.client_id());
    for (name, value) in ctx.headers() {
        println!("   Header {}: {}", name, value);
    }

    let options = config.authenticate_options();
    let logger = config.logger();

    println!("\n=== Risk API available ===");
    let verdict = authenticate(healthy_transport, ctx.clone(), &options, &logger).await?;
    print_verdict(&verdict);

    println!("\n=== Risk API timing out ===");
    let verdict = authenticate(slow_transport, ctx, &options, &logger).await?;
    print_verdict(&verdict);

    println!("\n=== Failover disabled ===");
    let strict = config.with_fail_over_strategy(ActionType::None);
    let adapter = incoming_request();
    let ctx = RequestContext::from_request(&adapter, &policy, &filter, None);
    match authenticate(slow_transport, ctx, &strict.authenticate_options(), &logger).await {
        Ok(verdict) => print_verdict(&verdict),
        Err(err) => println!("   Error: {}", err),
    }

    Ok(())
}
