//! # Registry State
//!
//! The single owned aggregate holding everything a registry instance
//! persists. Entry points take it by reference through the service; there is
//! no global state.

use super::errors::{RegistryError, RegistryResult};
use super::nonces::NonceLedger;
use super::roles::RoleRegistry;
use super::root_store::RootStore;
use crate::config::RegistryConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp};

/// Complete persisted state of one registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// Owner, admins, signers
    pub roles: RoleRegistry,
    /// Kill switch for every mutating entry point
    pub paused: bool,
    /// Display name (metadata only)
    pub display_name: String,
    /// Global and per-key roots with history
    pub roots: RootStore,
    /// Per-signer replay counters
    pub nonces: NonceLedger,
}

impl RegistryState {
    /// Fresh state for `config`, owned by `owner`.
    ///
    /// # Errors
    /// `InvalidConfig` for a bad config, `ZeroAddress` for a null owner.
    pub fn genesis(
        config: &RegistryConfig,
        owner: Address,
        now: Timestamp,
    ) -> RegistryResult<Self> {
        config.validate()?;
        if owner == [0u8; 20] {
            return Err(RegistryError::ZeroAddress);
        }

        Ok(Self {
            roles: RoleRegistry::with_owner(owner),
            paused: false,
            display_name: config.name.clone(),
            roots: RootStore::with_initial_global(
                config.global_history_limit,
                config.chain_history_limit,
                config.initial_global_root,
                now,
            ),
            nonces: NonceLedger::new(),
        })
    }

    /// Structural checks for state loaded from outside.
    pub fn validate(&self, config: &RegistryConfig) -> Result<(), String> {
        if self.roles.owner == Some([0u8; 20]) {
            return Err("owner cannot be the zero address".into());
        }
        self.roles
            .admins
            .check_invariants()
            .map_err(|e| format!("admin set: {e}"))?;
        self.roles
            .signers
            .check_invariants()
            .map_err(|e| format!("signer set: {e}"))?;
        self.roots
            .check_consistency(config.global_history_limit, config.chain_history_limit)?;
        Ok(())
    }
}
