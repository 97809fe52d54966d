//! # Inbound Ports (Driving Ports / API)
//!
//! The signer-recovery capability the registry's signature path depends on.

use crate::domain::entities::{Address, EcdsaSignature};
use crate::domain::errors::SignatureError;
use shared_types::Hash;

/// Signer recovery API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SignatureVerificationApi: Send + Sync {
    /// Recover the signer's address from a signature over `message_hash`.
    ///
    /// # Security
    /// - Rejects signatures with high S values (EIP-2 malleability protection)
    /// - Rejects recoveries that yield the zero address
    fn recover_address(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SignatureError>;

    /// Recover the signer and check that it matches `expected`.
    ///
    /// Returns the recovered address, or `SignerMismatch` when it differs.
    fn verify_signer(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
        expected: &Address,
    ) -> Result<Address, SignatureError>;
}
