//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_deliveries_total` (counter): deliveries by channel, type, suppressed
//! - `bridge_config_rejections_total` (counter): rejected client configs by field
//!
//! Recording is a no-op until a recorder is installed, so unit tests and the
//! CLI need no setup.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::delivery::{Channel, DataType};

/// Install the Prometheus recorder and its HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_delivery(channel: Channel, data_type: DataType, suppressed: bool) {
    metrics::counter!(
        "bridge_deliveries_total",
        "channel" => channel.as_str(),
        "type" => data_type.as_str(),
        "suppressed" => if suppressed { "true" } else { "false" }
    )
    .increment(1);
}

pub fn record_config_rejection(field: &str) {
    metrics::counter!("bridge_config_rejections_total", "field" => field.to_string()).increment(1);
}
