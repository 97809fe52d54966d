//! # Root Registry Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmark bodies
//! │   ├── ring_history.rs
//! │   └── signed_updates.rs
//! │
//! ├── exploits/         # Attack simulations against the write paths
//! │   ├── replay.rs
//! │   ├── cross_domain.rs
//! │   ├── malleability.rs
//! │   └── revoked_signer.rs
//! │
//! ├── fixtures.rs       # Shared registry and signer setup
//! │
//! └── integration/      # End-to-end flows across crates
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rr-tests
//!
//! # By category
//! cargo test -p rr-tests integration::
//! cargo test -p rr-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p rr-tests
//! ```

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
