//! # Signature Verification (Root Registry)
//!
//! Recovers the signer of an off-line signed root update and builds the
//! domain-separated digest that the signer commits to.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): The `SignatureVerificationApi` trait consumed by the registry
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Domain Separation**: Every digest binds name, version, network id and registry
//!   address, so a signature cannot be replayed against another deployment
//! - **Null Signer**: A recovery that yields the zero address is rejected

pub mod domain;
pub mod ports;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, keccak256, recover_address, sign_prehash, signing_key_from_bytes,
    EcdsaVerifier,
};
pub use domain::entities::{Address, EcdsaSignature, SIGNATURE_LENGTH};
pub use domain::errors::SignatureError;
pub use domain::typed_data::{
    signing_digest, update_struct_hash, DomainTag, DOMAIN_TYPE, UPDATE_TYPE,
};
pub use ports::inbound::SignatureVerificationApi;

#[cfg(any(test, feature = "test-utils"))]
pub use domain::ecdsa::test_helpers;
