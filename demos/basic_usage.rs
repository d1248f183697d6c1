//! Basic logger usage example
//!
//! Logs to stderr and, if `COLLECTOR_URL` is set, forwards every record to
//! that HTTP endpoint.
//!
//! Run with: COLLECTOR_URL=http://127.0.0.1:8080/logs cargo run --example basic_usage

use relay_logger::prelude::*;
use relay_logger::{info, warning};

fn main() -> Result<()> {
    let endpoint = std::env::var("COLLECTOR_URL").unwrap_or_default();

    let logger = Logger::new_endpoint(&endpoint, "demo", Severity::Notice)?;
    println!(
        "remote sink: {}",
        if logger.is_remote_enabled() { endpoint.as_str() } else { "disabled" }
    );

    // Below the local threshold: only the collector sees it.
    logger.debug("cache warmed");
    info!(logger, "listening on port {}", 8080);

    warning!(logger, "{} requests queued", 42);
    logger.notice("configuration reloaded");

    let err = std::io::Error::other("upstream timed out");
    logger.report_error("proxy.Forward", &err);

    logger.shutdown();

    let metrics = logger.metrics();
    println!(
        "delivered {} of {} records ({:.1}% failed)",
        metrics.delivered(),
        metrics.enqueued(),
        metrics.failure_rate()
    );
    Ok(())
}
