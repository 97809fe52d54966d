//! # Event Sinks
//!
//! `EventSink` implementations for tests, tooling and log-only hosts.

use crate::events::RegistryEvent;
use crate::ports::EventSink;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every event. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<Vec<RegistryEvent>>>,
}

impl InMemoryEventSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for InMemoryEventSink {
    fn publish(&self, event: &RegistryEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Logs each event at `info` as a JSON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: &RegistryEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => tracing::info!(event = event.name(), %payload, "registry event"),
            Err(e) => tracing::error!(event = event.name(), error = %e, "unserializable event"),
        }
    }
}

/// Discards events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: &RegistryEvent) {}
}
