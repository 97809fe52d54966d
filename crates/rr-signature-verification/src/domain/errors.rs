//! # Signature Errors
//!
//! Error types for signature decoding and signer recovery.

use shared_types::{to_hex, Address};
use thiserror::Error;

/// Errors that can occur while decoding a signature or recovering its signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Encoded signature is not exactly `r || s || v`
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    /// R or S is outside [1, n-1]
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovery produced the null address
    #[error("Recovered the zero address")]
    ZeroAddressRecovered,

    /// Private key bytes are not a valid secp256k1 scalar
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing backend refused the digest
    #[error("Signing failed")]
    SigningFailed,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {}, got {}", to_hex(.expected), to_hex(.actual))]
    SignerMismatch { expected: Address, actual: Address },
}
