//! # Integration Flows
//!
//! End-to-end scenarios that drive the registry through its public API
//! together with the signature crate, the snapshot adapter and telemetry.

pub mod persistence;
