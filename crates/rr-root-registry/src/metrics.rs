//! Metric hooks. Forward to `registry-telemetry` when the `metrics` feature
//! is enabled, compile to nothing otherwise.

#[cfg(feature = "metrics")]
pub(crate) fn root_update(scope: &str) {
    registry_telemetry::record_root_update(scope);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn root_update(_scope: &str) {}

#[cfg(feature = "metrics")]
pub(crate) fn rejection(reason: &str) {
    registry_telemetry::record_rejection(reason);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn rejection(_reason: &str) {}

#[cfg(feature = "metrics")]
pub(crate) fn signed_update() {
    registry_telemetry::record_signed_update();
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn signed_update() {}

#[cfg(feature = "metrics")]
pub(crate) fn batch(count: usize) {
    registry_telemetry::record_batch(count);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn batch(_count: usize) {}
