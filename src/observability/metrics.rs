//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sanctions_upstream_requests_total` (counter): by endpoint, outcome
//! - `sanctions_upstream_request_duration_seconds` (histogram): by endpoint
//! - `sanctions_api_connected` (gauge): 1=reachable, 0=unreachable
//! - `sanctions_search_history_entries` (gauge): current history size

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Failures are logged, not fatal:
/// the client works fine without metrics exposition.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(%addr, "metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "failed to install Prometheus exporter"),
    }
}

/// Record one completed (possibly retried) upstream operation.
pub fn record_upstream_request(endpoint: &'static str, ok: bool, elapsed: Duration) {
    let outcome = if ok { "ok" } else { "error" };
    counter!(
        "sanctions_upstream_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "sanctions_upstream_request_duration_seconds",
        "endpoint" => endpoint
    )
    .record(elapsed.as_secs_f64());
}

/// Record the latest health-check verdict.
pub fn record_api_health(connected: bool) {
    gauge!("sanctions_api_connected").set(if connected { 1.0 } else { 0.0 });
}

/// Record the current search-history size.
pub fn record_history_size(len: usize) {
    gauge!("sanctions_search_history_entries").set(len as f64);
}
