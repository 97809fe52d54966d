//! # Write Authority
//!
//! The two ways a chain-root write can be authorized. Both resolve to a
//! [`Grant`] and then run the same write routine.

use rr_signature_verification::EcdsaSignature;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, ChainKey, Root};

/// Off-line signed chain-root update submitted by a relayer.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRootUpdate {
    /// Claimed signer; must equal the recovered address.
    #[serde_as(as = "Hex")]
    pub signer: Address,
    /// Target key
    pub key: ChainKey,
    /// Proposed root
    #[serde_as(as = "Hex")]
    pub new_root: Root,
    /// Signer's expected next nonce
    pub nonce: u64,
    /// Signature over the domain-separated digest
    pub signature: EcdsaSignature,
}

/// Who is asking for a write.
#[derive(Clone, Copy, Debug)]
pub enum WriteAuthority<'a> {
    /// Caller identity supplied by the host (owner or admin).
    Direct(Address),
    /// Signed payload (owner or authorized signer, valid nonce).
    Signed(&'a SignedRootUpdate),
}

/// Outcome of a successful authorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grant {
    /// Principal the write is attributed to
    pub principal: Address,
    /// Nonce to consume on commit (signed path only)
    pub nonce: Option<u64>,
}
