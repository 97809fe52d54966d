//! # Inbound Port - RootRegistryApi
//!
//! Entry points exposed to the host. Every mutating call carries the
//! caller identity the host authenticated; the signature path carries a
//! signed payload instead.
//!
//! ## Authorization
//!
//! | Method | Required role |
//! |--------|---------------|
//! | `set_global_root`, `set_chain_root`, `batch_set_chain_roots` | owner or admin |
//! | `set_chain_root_signed` | owner or authorized signer (by signature) |
//! | role management, ownership, pause, `set_name` | owner |
//!
//! Every mutating method except `unpause` fails with `Paused` while paused.

use crate::domain::{HistoryEntry, RegistryResult, SignedRootUpdate};
use shared_types::{Address, ChainKey, Hash, Root, Timestamp};

/// Primary API of the root registry.
pub trait RootRegistryApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Replace the global root and bump its version. Returns the new version.
    ///
    /// # Errors
    /// `Paused`, `Unauthorized`, `NoChange`
    fn set_global_root(&mut self, caller: Address, new_root: Root) -> RegistryResult<u64>;

    /// Replace the root of `key`.
    ///
    /// # Errors
    /// `Paused`, `Unauthorized`, `NoChange`
    fn set_chain_root(&mut self, caller: Address, key: ChainKey, new_root: Root)
        -> RegistryResult<()>;

    /// Write several keys atomically. Returns the number of pairs committed.
    ///
    /// # Errors
    /// `Paused`, `Unauthorized`, `LengthMismatch`, `NoChange`
    fn batch_set_chain_roots(
        &mut self,
        caller: Address,
        keys: &[ChainKey],
        roots: &[Root],
    ) -> RegistryResult<usize>;

    /// Apply a relayed, signed chain-root update. Returns the signer.
    ///
    /// # Errors
    /// `Paused`, `InvalidSignature`, `Unauthorized`, `ReplayedNonce`, `NoChange`
    fn set_chain_root_signed(&mut self, update: &SignedRootUpdate) -> RegistryResult<Address>;

    // -------------------------------------------------------------------------
    // Administration
    // -------------------------------------------------------------------------

    /// Grant the admin role.
    fn add_admin(&mut self, caller: Address, account: Address) -> RegistryResult<()>;

    /// Revoke the admin role.
    fn remove_admin(&mut self, caller: Address, account: Address) -> RegistryResult<()>;

    /// Authorize a signer for the signature path.
    fn add_authorized_signer(&mut self, caller: Address, account: Address) -> RegistryResult<()>;

    /// Revoke a signer.
    fn remove_authorized_signer(&mut self, caller: Address, account: Address)
        -> RegistryResult<()>;

    /// Hand ownership to `new_owner`.
    fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> RegistryResult<()>;

    /// Give up ownership permanently.
    fn renounce_ownership(&mut self, caller: Address) -> RegistryResult<()>;

    /// Stop all mutating entry points except `unpause`.
    fn pause(&mut self, caller: Address) -> RegistryResult<()>;

    /// Lift the pause.
    fn unpause(&mut self, caller: Address) -> RegistryResult<()>;

    /// Change the display name.
    fn set_name(&mut self, caller: Address, name: &str) -> RegistryResult<()>;

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current global root.
    fn global_root(&self) -> Root;

    /// Current global version (starts at 1).
    fn global_version(&self) -> u64;

    /// Up to `max_items` global roots, newest first.
    ///
    /// # Errors
    /// `LimitExceeded` if `max_items` exceeds the global capacity.
    fn global_history(&self, max_items: usize) -> RegistryResult<Vec<HistoryEntry<Root>>>;

    /// Current root of `key` (zero if unset).
    fn chain_root(&self, key: ChainKey) -> Root;

    /// Last update time of `key` (zero if unset).
    fn chain_update_time(&self, key: ChainKey) -> Timestamp;

    /// Up to `max_items` roots of `key`, newest first.
    ///
    /// # Errors
    /// `LimitExceeded` if `max_items` exceeds the per-key capacity.
    fn chain_history(
        &self,
        key: ChainKey,
        max_items: usize,
    ) -> RegistryResult<Vec<HistoryEntry<Root>>>;

    /// Batched root lookup.
    fn chain_roots(&self, keys: &[ChainKey]) -> Vec<Root>;

    /// Admin membership.
    fn is_admin(&self, account: &Address) -> bool;

    /// Signer membership.
    fn is_authorized_signer(&self, account: &Address) -> bool;

    /// Pause flag.
    fn is_paused(&self) -> bool;

    /// Current owner, `None` after renouncement.
    fn owner(&self) -> Option<Address>;

    /// Display name.
    fn name(&self) -> &str;

    /// Admin set snapshot (unordered).
    fn admins(&self) -> Vec<Address>;

    /// Signer set snapshot (unordered).
    fn authorized_signers(&self) -> Vec<Address>;

    /// Nonce `signer` must use next.
    fn nonce_of(&self, signer: &Address) -> u64;

    /// Domain separator of this deployment.
    fn domain_separator(&self) -> Hash;

    /// Digest a signer must sign to authorize `(key, new_root, nonce)`.
    fn signing_digest(&self, key: ChainKey, new_root: &Root, nonce: u64) -> Hash;

    /// Global history capacity.
    fn global_history_limit(&self) -> usize;

    /// Per-key history capacity.
    fn chain_history_limit(&self) -> usize;
}
