//! Adapters: concrete event sinks and snapshot persistence.

pub mod event_sink;
pub mod snapshot;

pub use event_sink::{InMemoryEventSink, NullEventSink, TracingEventSink};
pub use snapshot::{load_snapshot, save_snapshot, SnapshotError, SnapshotFormat};
