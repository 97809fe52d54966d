//! # Registry Configuration
//!
//! Deployment identity (the domain tag) and history capacities.
//!
//! ```ignore
//! let config = RegistryConfig::default()
//!     .with_network_id(11155111)
//!     .with_chain_history_limit(100);
//! config.validate()?;
//! ```

use crate::domain::errors::{RegistryError, RegistryResult};
use crate::domain::root_store::BatchPolicy;
use rr_signature_verification::{keccak256, DomainTag};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, Root, Timestamp, ZERO_ROOT};
use std::path::Path;

/// Default number of global history entries.
pub const DEFAULT_GLOBAL_HISTORY_LIMIT: usize = 20;

/// Default number of history entries per key.
pub const DEFAULT_CHAIN_HISTORY_LIMIT: usize = 50;

/// Registry configuration.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry name folded into the domain tag
    pub name: String,
    /// Schema version literal folded into the domain tag
    pub version: String,
    /// Network / deployment identifier
    pub network_id: u64,
    /// Registry identity; pinned per deployment when unset
    #[serde_as(as = "Option<Hex>")]
    pub registry_address: Option<Address>,
    /// Global ring history capacity
    pub global_history_limit: usize,
    /// Per-key ring history capacity
    pub chain_history_limit: usize,
    /// Treatment of unchanged pairs in batch writes
    pub batch_policy: BatchPolicy,
    /// Global root at genesis
    #[serde_as(as = "Hex")]
    pub initial_global_root: Root,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "RootRegistry".to_string(),
            version: "1".to_string(),
            network_id: 1,
            registry_address: None,
            global_history_limit: DEFAULT_GLOBAL_HISTORY_LIMIT,
            chain_history_limit: DEFAULT_CHAIN_HISTORY_LIMIT,
            batch_policy: BatchPolicy::default(),
            initial_global_root: ZERO_ROOT,
        }
    }
}

impl RegistryConfig {
    /// Small capacities so tests can exercise wraparound cheaply.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            name: "RootRegistryTest".to_string(),
            network_id: 31337,
            global_history_limit: 5,
            chain_history_limit: 5,
            ..Self::default()
        }
    }

    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| RegistryError::InvalidConfig(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the registry cannot run with.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::InvalidConfig("name cannot be blank".into()));
        }
        if self.version.trim().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "version cannot be blank".into(),
            ));
        }
        if self.global_history_limit == 0 {
            return Err(RegistryError::InvalidConfig(
                "global_history_limit must be at least 1".into(),
            ));
        }
        if self.chain_history_limit == 0 {
            return Err(RegistryError::InvalidConfig(
                "chain_history_limit must be at least 1".into(),
            ));
        }
        if self.registry_address == Some([0u8; 20]) {
            return Err(RegistryError::InvalidConfig(
                "registry_address cannot be the zero address".into(),
            ));
        }
        Ok(())
    }

    /// Registry identity, explicit or, for a config that has not been
    /// deployed, the last 20 bytes of `keccak256(name || network_id)`.
    #[must_use]
    pub fn resolved_registry_address(&self) -> Address {
        if let Some(address) = self.registry_address {
            return address;
        }
        derive_address(&self.preimage())
    }

    /// Identity of a deployment by `owner` at `deployed_at`: the last 20
    /// bytes of `keccak256(name || network_id || owner || deployed_at)`.
    #[must_use]
    pub fn deployment_address(&self, owner: &Address, deployed_at: Timestamp) -> Address {
        let mut preimage = self.preimage();
        preimage.extend_from_slice(owner);
        preimage.extend_from_slice(&deployed_at.to_be_bytes());
        derive_address(&preimage)
    }

    /// Copy with `registry_address` fixed for a deployment. An explicit
    /// address is kept as is.
    #[must_use]
    pub fn pinned(mut self, owner: &Address, deployed_at: Timestamp) -> Self {
        if self.registry_address.is_none() {
            self.registry_address = Some(self.deployment_address(owner, deployed_at));
        }
        self
    }

    fn preimage(&self) -> Vec<u8> {
        let mut preimage = self.name.as_bytes().to_vec();
        preimage.extend_from_slice(&self.network_id.to_be_bytes());
        preimage
    }

    /// Domain tag every signed update is bound to.
    #[must_use]
    pub fn domain_tag(&self) -> DomainTag {
        DomainTag::new(
            self.name.clone(),
            self.version.clone(),
            self.network_id,
            self.resolved_registry_address(),
        )
    }

    /// Builder-style network id.
    #[must_use]
    pub fn with_network_id(mut self, network_id: u64) -> Self {
        self.network_id = network_id;
        self
    }

    /// Builder-style explicit registry address.
    #[must_use]
    pub fn with_registry_address(mut self, address: Address) -> Self {
        self.registry_address = Some(address);
        self
    }

    /// Builder-style global history capacity.
    #[must_use]
    pub fn with_global_history_limit(mut self, limit: usize) -> Self {
        self.global_history_limit = limit;
        self
    }

    /// Builder-style per-key history capacity.
    #[must_use]
    pub fn with_chain_history_limit(mut self, limit: usize) -> Self {
        self.chain_history_limit = limit;
        self
    }

    /// Builder-style batch policy.
    #[must_use]
    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    /// Builder-style genesis root.
    #[must_use]
    pub fn with_initial_global_root(mut self, root: Root) -> Self {
        self.initial_global_root = root;
        self
    }
}

fn derive_address(preimage: &[u8]) -> Address {
    let hash = keccak256(preimage);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
