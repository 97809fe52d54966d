//! Prometheus metrics for the root registry.
//!
//! All metrics follow the naming convention: `rr_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Once;

use crate::TelemetryError;

lazy_static! {
    /// Registry holding every root-registry metric
    pub static ref REGISTRY: Registry = Registry::new();

    /// Accepted root writes by scope (global, chain)
    pub static ref ROOT_UPDATES: IntCounterVec = IntCounterVec::new(
        Opts::new("rr_root_updates_total", "Accepted root writes"),
        &["scope"]
    ).expect("metric creation failed");

    /// Rejected writes by error kind
    pub static ref REJECTED_WRITES: IntCounterVec = IntCounterVec::new(
        Opts::new("rr_rejected_writes_total", "Rejected mutating calls"),
        &["reason"]
    ).expect("metric creation failed");

    /// Accepted signature-authenticated updates
    pub static ref SIGNED_UPDATES: IntCounter = IntCounter::new(
        "rr_signed_updates_total",
        "Accepted signature-authenticated root updates"
    ).expect("metric creation failed");

    /// Pairs committed per batch write
    pub static ref BATCH_SIZE: Histogram = Histogram::with_opts(
        HistogramOpts::new("rr_batch_size", "Pairs committed per batch write")
            .buckets(exponential_buckets(1.0, 2.0, 10).expect("valid buckets"))
    ).expect("metric creation failed");
}

static REGISTER: Once = Once::new();

/// Register all metrics with [`REGISTRY`]. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let mut result = Ok(());
    REGISTER.call_once(|| {
        let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(ROOT_UPDATES.clone()),
            Box::new(REJECTED_WRITES.clone()),
            Box::new(SIGNED_UPDATES.clone()),
            Box::new(BATCH_SIZE.clone()),
        ];
        for metric in metrics {
            if let Err(e) = REGISTRY.register(metric) {
                result = Err(TelemetryError::MetricsInit(e.to_string()));
                return;
            }
        }
    });
    result
}

/// Count an accepted write.
pub fn record_root_update(scope: &str) {
    ROOT_UPDATES.with_label_values(&[scope]).inc();
}

/// Count a rejected write.
pub fn record_rejection(reason: &str) {
    REJECTED_WRITES.with_label_values(&[reason]).inc();
}

/// Count an accepted signed update.
pub fn record_signed_update() {
    SIGNED_UPDATES.inc();
}

/// Observe a committed batch.
pub fn record_batch(count: usize) {
    BATCH_SIZE.observe(count as f64);
}

/// Encode all metrics as Prometheus text format.
pub fn gather_text() -> Result<String, TelemetryError> {
    register_metrics()?;
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
