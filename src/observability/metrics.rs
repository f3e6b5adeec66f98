//! Metrics collection and exposition.
//!
//! # Metrics
//! - `randomapi_requests_total` (counter): requests by endpoint, status
//! - `randomapi_request_duration_seconds` (histogram): latency by endpoint
//! - `randomapi_reloads_total` (counter): reload attempts by result
//! - `randomapi_elements` (gauge): size of the published snapshot

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(endpoint: String, status: u16, start: Instant) {
    counter!(
        "randomapi_requests_total",
        "endpoint" => endpoint.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("randomapi_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("randomapi_reloads_total", "result" => result).increment(1);
}

pub fn record_element_count(count: usize) {
    gauge!("randomapi_elements").set(count as f64);
}
