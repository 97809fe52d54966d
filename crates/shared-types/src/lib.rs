//! # Shared Types Crate
//!
//! Primitive types used by every Root Registry crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, roots and keys are defined once here.
//! - **Opaque Roots**: a root is 32 bytes with no interpreted structure.
//! - **Ethereum-Compatible Identities**: addresses are 20-byte keccak-derived
//!   identifiers so externally produced signatures map onto the same principals.

pub mod encoding;
pub mod entities;
pub mod errors;

pub use encoding::{parse_address, parse_bytes, parse_root, to_hex};
pub use entities::*;
pub use errors::ParseError;
