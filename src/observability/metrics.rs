//! Metrics collection and exposition.
//!
//! # Metrics
//! - `config_merges_total` (counter): snapshot installs by source
//! - `config_refresh_total` (counter): scheduled fetches by outcome
//! - `config_push_total` (counter): push updates by outcome

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener. A failure to
/// install is logged and the service runs without exposition.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "failed to start metrics exporter"),
    }
}

pub fn record_merge(source: &'static str) {
    metrics::counter!("config_merges_total", "source" => source).increment(1);
}

pub fn record_refresh(outcome: &'static str) {
    metrics::counter!("config_refresh_total", "outcome" => outcome).increment(1);
}

pub fn record_push(outcome: &'static str) {
    metrics::counter!("config_push_total", "outcome" => outcome).increment(1);
}
