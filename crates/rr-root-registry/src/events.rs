//! # Registry Events
//!
//! Notifications emitted after a state change commits. Addresses and roots
//! serialize as hex strings so event streams stay readable.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, ChainKey, Root, Timestamp};

/// Everything the registry announces.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// Global root replaced.
    GlobalRootUpdated {
        /// Writer
        #[serde_as(as = "Hex")]
        caller: Address,
        /// Previous root
        #[serde_as(as = "Hex")]
        old_root: Root,
        /// New root
        #[serde_as(as = "Hex")]
        new_root: Root,
        /// Version after the write
        version: u64,
        /// Commit time
        timestamp: Timestamp,
    },

    /// Per-key root replaced.
    ChainRootUpdated {
        /// Writer (the signer on the signature path)
        #[serde_as(as = "Hex")]
        caller: Address,
        /// Key written
        key: ChainKey,
        /// Previous root
        #[serde_as(as = "Hex")]
        old_root: Root,
        /// New root
        #[serde_as(as = "Hex")]
        new_root: Root,
        /// Commit time
        timestamp: Timestamp,
    },

    /// Batch summary, emitted after the per-pair events.
    BatchUpdated {
        /// Writer
        #[serde_as(as = "Hex")]
        caller: Address,
        /// Pairs committed
        count: usize,
        /// Commit time
        timestamp: Timestamp,
    },

    /// Signed update accepted, emitted after its `ChainRootUpdated`.
    RootUpdatedBySignature {
        /// Recovered signer
        #[serde_as(as = "Hex")]
        signer: Address,
        /// Key written
        key: ChainKey,
        /// New root
        #[serde_as(as = "Hex")]
        new_root: Root,
        /// Nonce consumed
        nonce: u64,
        /// Commit time
        timestamp: Timestamp,
    },

    /// Admin granted.
    AdminAdded {
        /// New admin
        #[serde_as(as = "Hex")]
        account: Address,
    },

    /// Admin revoked.
    AdminRemoved {
        /// Former admin
        #[serde_as(as = "Hex")]
        account: Address,
    },

    /// Signer authorized.
    SignerAdded {
        /// New signer
        #[serde_as(as = "Hex")]
        account: Address,
    },

    /// Signer revoked.
    SignerRemoved {
        /// Former signer
        #[serde_as(as = "Hex")]
        account: Address,
    },

    /// Owner changed. `new` is `None` after renouncement.
    OwnershipTransferred {
        /// Owner before the change
        #[serde_as(as = "Option<Hex>")]
        previous: Option<Address>,
        /// Owner after the change
        #[serde_as(as = "Option<Hex>")]
        new: Option<Address>,
    },

    /// Registry paused.
    Paused {
        /// Owner who paused
        #[serde_as(as = "Hex")]
        by: Address,
    },

    /// Registry unpaused.
    Unpaused {
        /// Owner who unpaused
        #[serde_as(as = "Hex")]
        by: Address,
    },

    /// Display name changed.
    NameUpdated {
        /// New display name
        name: String,
    },
}

impl RegistryEvent {
    /// Short label for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::GlobalRootUpdated { .. } => "GlobalRootUpdated",
            Self::ChainRootUpdated { .. } => "ChainRootUpdated",
            Self::BatchUpdated { .. } => "BatchUpdated",
            Self::RootUpdatedBySignature { .. } => "RootUpdatedBySignature",
            Self::AdminAdded { .. } => "AdminAdded",
            Self::AdminRemoved { .. } => "AdminRemoved",
            Self::SignerAdded { .. } => "SignerAdded",
            Self::SignerRemoved { .. } => "SignerRemoved",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::Paused { .. } => "Paused",
            Self::Unpaused { .. } => "Unpaused",
            Self::NameUpdated { .. } => "NameUpdated",
        }
    }
}
