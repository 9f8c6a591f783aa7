//! Metrics collection and exposition.
//!
//! # Metrics
//! - `article_publish_total` (counter): publish attempts by outcome
//! - `article_mint_total` (counter): mint attempts by outcome
//! - `content_store_uploads_total` (counter): uploads by outcome
//! - `content_store_upload_bytes_total` (counter): bytes successfully stored
//!
//! Without an installed recorder every call is a no-op.

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a publish attempt.
pub fn record_publish(outcome: &'static str) {
    counter!("article_publish_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a mint attempt.
pub fn record_mint(outcome: &'static str) {
    counter!("article_mint_total", "outcome" => outcome).increment(1);
}

/// Record a content store upload.
pub fn record_upload(outcome: &'static str, bytes: usize) {
    counter!("content_store_uploads_total", "outcome" => outcome).increment(1);
    if bytes > 0 {
        counter!("content_store_upload_bytes_total").increment(bytes as u64);
    }
}
