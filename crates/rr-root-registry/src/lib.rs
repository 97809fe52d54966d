//! # Root Registry - Versioned Commitment Store
//!
//! Stores one global 32-byte root and any number of per-key roots, each with
//! a bounded rewrite history, role-gated writes and an alternate write path
//! authenticated by off-line signatures.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Global version starts at 1 and grows by exactly 1 per accepted write | `domain/root_store.rs` - `plan_global()` |
//! | At most `limit` live history entries, oldest overwritten first | `domain/ring_history.rs` - `push()` |
//! | Role list, position index and membership always agree | `domain/roles.rs` - `EnumerableSet` |
//! | A nonce is consumed only together with its root write | `service.rs` - `write_chain()` |
//! | A failed call mutates nothing | `service.rs` - plan/commit split |
//!
//! ## Authorization
//!
//! | Entry point | Required role |
//! |-------------|---------------|
//! | Direct root writes | owner or admin |
//! | Signed chain-root write | owner or authorized signer, by signature |
//! | Role management, ownership, pause, name | owner |
//!
//! The pause flag is checked first on every mutating entry point except
//! `unpause`. Queries keep working while paused.
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `SignatureVerificationApi` | Signer recovery for signed updates |
//! | `TimeSource` | Timestamps for history and events |
//! | `EventSink` | Delivery of committed events |
//!
//! ## Usage Example
//!
//! ```ignore
//! use rr_root_registry::prelude::*;
//!
//! let mut registry = RootRegistryService::new(
//!     RegistryConfig::default(),
//!     owner,
//!     EcdsaVerifier::new(),
//!     SystemTimeSource,
//!     TracingEventSink,
//! )?;
//!
//! registry.add_admin(owner, publisher)?;
//! registry.set_chain_root(publisher, 1, merkle_root)?;
//! let recent = registry.chain_history(1, 10)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
mod metrics;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        BatchPolicy, EnumerableSet, HistoryEntry, NonceLedger, RegistryError, RegistryResult,
        RegistryState, RingHistory, RoleRegistry, RootStore, SignedRootUpdate, WriteAuthority,
    };

    // Configuration
    pub use crate::config::RegistryConfig;

    // Events
    pub use crate::events::RegistryEvent;

    // Ports
    pub use crate::ports::{
        EventSink, ManualTimeSource, RootRegistryApi, SystemTimeSource, TimeSource,
    };

    // Adapters
    pub use crate::adapters::snapshot::RegistrySnapshot;
    pub use crate::adapters::{
        load_snapshot, save_snapshot, InMemoryEventSink, NullEventSink, SnapshotError,
        SnapshotFormat, TracingEventSink,
    };

    // Service
    pub use crate::service::RootRegistryService;

    // Signatures
    pub use rr_signature_verification::{
        DomainTag, EcdsaSignature, EcdsaVerifier, SignatureError, SignatureVerificationApi,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
