//! Metrics collection and exposition.
//!
//! # Metrics
//! - `visit_requests_total` (counter): invocations by route, status
//! - `visit_request_duration_seconds` (histogram): latency distribution by route
//! - `visit_injected_delay_total` (counter): injected delays by route class

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with an HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!("visit_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
    metrics::histogram!("visit_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_injected_delay(class: &'static str, delay: Duration) {
    metrics::counter!("visit_injected_delay_total", "class" => class).increment(1);
    metrics::histogram!("visit_injected_delay_seconds", "class" => class)
        .record(delay.as_secs_f64());
}
