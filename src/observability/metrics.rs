//! Metrics collection and exposition.
//!
//! # Metrics
//! - `localized_scope_resolutions_total` (counter): request resolutions by outcome
//! - `localized_live_mounts_total` (counter): live mounts by outcome
//! - `localized_assign_checks_total` (counter): post-assign checks by outcome

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// outcome: resolved | passthrough | integrity_error
pub fn record_resolution(outcome: &'static str) {
    counter!("localized_scope_resolutions_total", "outcome" => outcome).increment(1);
}

/// outcome: resolved | missing_scope
pub fn record_mount(outcome: &'static str) {
    counter!("localized_live_mounts_total", "outcome" => outcome).increment(1);
}

/// outcome: verified | mismatch | unresolved
pub fn record_assigns_check(outcome: &'static str) {
    counter!("localized_assign_checks_total", "outcome" => outcome).increment(1);
}
