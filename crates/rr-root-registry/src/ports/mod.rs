//! Ports layer for the root registry.
//!
//! - Inbound (driving): `RootRegistryApi`, the entry points a host calls
//! - Outbound (driven): clock and event sink the registry depends on

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
