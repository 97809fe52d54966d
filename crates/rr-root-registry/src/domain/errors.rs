//! # Registry Errors
//!
//! Every rejected precondition surfaces as a distinct variant. All errors are
//! terminal for the call: no state is mutated before the error is returned.

use rr_signature_verification::SignatureError;
use shared_types::{to_hex, Address};
use thiserror::Error;

/// Errors returned by registry entry points.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller lacks the role required by the entry point.
    #[error("Unauthorized: {} lacks the required role", to_hex(.0))]
    Unauthorized(Address),

    /// Mutating call while the registry is paused.
    #[error("Registry is paused")]
    Paused,

    /// New value equals the current value.
    #[error("Root unchanged")]
    NoChange,

    /// Batch key and root sequences differ in length.
    #[error("Length mismatch: {keys} keys, {roots} roots")]
    LengthMismatch {
        /// Number of keys supplied
        keys: usize,
        /// Number of roots supplied
        roots: usize,
    },

    /// History query asked for more items than the buffer holds.
    #[error("Limit exceeded: requested {requested}, capacity {limit}")]
    LimitExceeded {
        /// Items requested
        requested: usize,
        /// Configured capacity
        limit: usize,
    },

    /// Malformed signature, failed recovery, or claimed signer mismatch.
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// Nonce does not equal the signer's expected next value.
    #[error("Replayed nonce for {}: expected {expected}, got {provided}", to_hex(.signer))]
    ReplayedNonce {
        /// Recovered signer
        signer: Address,
        /// Nonce the ledger expects next
        expected: u64,
        /// Nonce carried by the payload
        provided: u64,
    },

    /// Null address supplied to an administrative entry point.
    #[error("Zero address not allowed")]
    ZeroAddress,

    /// Blank display name.
    #[error("Name must not be empty")]
    EmptyName,

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RegistryError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Paused => "paused",
            Self::NoChange => "no_change",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::LimitExceeded { .. } => "limit_exceeded",
            Self::InvalidSignature(_) => "invalid_signature",
            Self::ReplayedNonce { .. } => "replayed_nonce",
            Self::ZeroAddress => "zero_address",
            Self::EmptyName => "empty_name",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
