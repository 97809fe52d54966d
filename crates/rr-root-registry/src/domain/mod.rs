//! Domain layer: pure registry state and rules, no I/O.

pub mod entities;
pub mod errors;
pub mod nonces;
pub mod ring_history;
pub mod roles;
pub mod root_store;
pub mod state;

pub use entities::{Grant, SignedRootUpdate, WriteAuthority};
pub use errors::{RegistryError, RegistryResult};
pub use nonces::NonceLedger;
pub use ring_history::{HistoryEntry, RingHistory};
pub use roles::{EnumerableSet, RoleRegistry};
pub use root_store::{BatchPolicy, ChainChange, ChainRoot, GlobalChange, GlobalRoot, RootStore};
pub use state::RegistryState;
