//! # Outbound Ports
//!
//! Dependencies the registry calls out to: a clock for history and event
//! timestamps, and a sink for committed events.

use crate::events::RegistryEvent;
use shared_types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of the current time, in Unix seconds.
pub trait TimeSource: Send + Sync {
    /// Current timestamp.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Settable clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    time: Arc<AtomicU64>,
}

impl ManualTimeSource {
    /// Clock frozen at `initial`.
    #[must_use]
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: Arc::new(AtomicU64::new(initial)),
        }
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to `time`.
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

/// Receiver of committed registry events, in emission order.
pub trait EventSink: Send + Sync {
    /// Called once per event after the state change it describes commits.
    fn publish(&self, event: &RegistryEvent);
}
