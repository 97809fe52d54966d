//! # Root Registry Benchmarks
//!
//! Criterion bodies driven from `benches/registry_benchmarks.rs`.

pub mod ring_history;
pub mod signed_updates;
