//! # Core Domain Entities
//!
//! Primitive aliases for the registry domain.
//!
//! - **Roots**: `Root` (opaque 32-byte commitment, e.g. a Merkle root)
//! - **Identity**: `Address`
//! - **Partitioning**: `ChainKey`
//! - **Time**: `Timestamp`

/// A 32-byte hash (keccak-256 output).
pub type Hash = [u8; 32];

/// An opaque 32-byte commitment value.
pub type Root = Hash;

/// A 20-byte Ethereum-style address.
///
/// Last 20 bytes of keccak256 over the uncompressed secp256k1 public key.
pub type Address = [u8; 20];

/// Numeric identifier partitioning the per-key root namespace.
pub type ChainKey = u64;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// The zero root. Value of every key that has never been written.
pub const ZERO_ROOT: Root = [0u8; 32];

/// The null address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Returns true for the null address.
#[inline]
pub fn is_zero_address(address: &Address) -> bool {
    *address == ZERO_ADDRESS
}

/// Returns true for the zero root.
#[inline]
pub fn is_zero_root(root: &Root) -> bool {
    *root == ZERO_ROOT
}
