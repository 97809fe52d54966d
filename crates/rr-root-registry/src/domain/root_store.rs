//! # Root Store
//!
//! Current global root with its version counter, and per-key roots with
//! their last-update time. Every accepted write is one current-value update
//! plus one ring history push.
//!
//! Writes are split into a fallible `plan_*` step that validates against the
//! current state and an infallible `commit_*` step. Callers run every check
//! (roles, nonces, pause) between the two, so a failed call never touches
//! state.

use super::errors::{RegistryError, RegistryResult};
use super::ring_history::{HistoryEntry, RingHistory};
use serde::{Deserialize, Serialize};
use shared_types::{ChainKey, Root, Timestamp, ZERO_ROOT};
use std::collections::BTreeMap;

/// How a batch treats pairs whose root equals the current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Any unchanged pair rejects the whole batch with `NoChange`.
    #[default]
    RejectUnchanged,
    /// Unchanged pairs are dropped; the rest commit.
    SkipUnchanged,
}

/// Global root, version and history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRoot {
    /// Current value
    pub root: Root,
    /// Starts at 1, +1 per accepted change
    pub version: u64,
    /// Recent values, newest last pushed
    pub history: RingHistory<Root>,
}

/// Current root of one key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRoot {
    /// Current value
    pub root: Root,
    /// Time of the last accepted write
    pub updated_at: Timestamp,
    /// Recent values of this key
    pub history: RingHistory<Root>,
}

/// Validated global write, ready to commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalChange {
    /// Value being replaced
    pub old_root: Root,
    /// New value
    pub new_root: Root,
    /// Version after commit
    pub version: u64,
}

/// Validated per-key write, ready to commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainChange {
    /// Target key
    pub key: ChainKey,
    /// Value being replaced (zero root for a fresh key)
    pub old_root: Root,
    /// New value
    pub new_root: Root,
}

/// Versioned root storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootStore {
    global: GlobalRoot,
    chains: BTreeMap<ChainKey, ChainRoot>,
    chain_history_limit: usize,
}

impl RootStore {
    /// Empty store: zero global root at version 1.
    #[must_use]
    pub fn new(global_history_limit: usize, chain_history_limit: usize) -> Self {
        Self {
            global: GlobalRoot {
                root: ZERO_ROOT,
                version: 1,
                history: RingHistory::new(global_history_limit),
            },
            chains: BTreeMap::new(),
            chain_history_limit: chain_history_limit.max(1),
        }
    }

    /// Store seeded with `root` as the version-1 global root.
    ///
    /// A zero `root` leaves the history empty.
    #[must_use]
    pub fn with_initial_global(
        global_history_limit: usize,
        chain_history_limit: usize,
        root: Root,
        now: Timestamp,
    ) -> Self {
        let mut store = Self::new(global_history_limit, chain_history_limit);
        if root != ZERO_ROOT {
            store.global.root = root;
            store.global.history.push(root, now);
        }
        store
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Current global root.
    #[must_use]
    pub fn global_root(&self) -> Root {
        self.global.root
    }

    /// Current global version.
    #[must_use]
    pub fn global_version(&self) -> u64 {
        self.global.version
    }

    /// Up to `max_items` recent global roots, newest first.
    pub fn global_history(&self, max_items: usize) -> RegistryResult<Vec<HistoryEntry<Root>>> {
        self.global.history.last_n(max_items)
    }

    /// Current root of `key`, zero if never written.
    #[must_use]
    pub fn chain_root(&self, key: ChainKey) -> Root {
        self.chains.get(&key).map_or(ZERO_ROOT, |c| c.root)
    }

    /// Last update time of `key`, zero if never written.
    #[must_use]
    pub fn chain_updated_at(&self, key: ChainKey) -> Timestamp {
        self.chains.get(&key).map_or(0, |c| c.updated_at)
    }

    /// Up to `max_items` recent roots of `key`, newest first.
    ///
    /// The capacity check applies to unset keys too.
    pub fn chain_history(
        &self,
        key: ChainKey,
        max_items: usize,
    ) -> RegistryResult<Vec<HistoryEntry<Root>>> {
        match self.chains.get(&key) {
            Some(chain) => chain.history.last_n(max_items),
            None if max_items > self.chain_history_limit => Err(RegistryError::LimitExceeded {
                requested: max_items,
                limit: self.chain_history_limit,
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Batched lookup; zero root for unset keys.
    #[must_use]
    pub fn chain_roots(&self, keys: &[ChainKey]) -> Vec<Root> {
        keys.iter().map(|&k| self.chain_root(k)).collect()
    }

    /// Keys that have been written at least once, ascending.
    #[must_use]
    pub fn known_keys(&self) -> Vec<ChainKey> {
        self.chains.keys().copied().collect()
    }

    /// Global history capacity.
    #[must_use]
    pub fn global_history_limit(&self) -> usize {
        self.global.history.capacity()
    }

    /// Per-key history capacity.
    #[must_use]
    pub fn chain_history_limit(&self) -> usize {
        self.chain_history_limit
    }

    // =========================================================================
    // PLAN / COMMIT
    // =========================================================================

    /// Validate a global write.
    ///
    /// # Errors
    /// `NoChange` if `new_root` equals the current global root.
    pub fn plan_global(&self, new_root: Root) -> RegistryResult<GlobalChange> {
        if new_root == self.global.root {
            return Err(RegistryError::NoChange);
        }
        Ok(GlobalChange {
            old_root: self.global.root,
            new_root,
            version: self.global.version + 1,
        })
    }

    /// Apply a planned global write.
    pub fn commit_global(&mut self, change: &GlobalChange, now: Timestamp) {
        self.global.root = change.new_root;
        self.global.version = change.version;
        self.global.history.push(change.new_root, now);
    }

    /// Validate a single-key write.
    ///
    /// # Errors
    /// `NoChange` if `new_root` equals the key's current root.
    pub fn plan_chain(&self, key: ChainKey, new_root: Root) -> RegistryResult<ChainChange> {
        let old_root = self.chain_root(key);
        if new_root == old_root {
            return Err(RegistryError::NoChange);
        }
        Ok(ChainChange {
            key,
            old_root,
            new_root,
        })
    }

    /// Apply a planned single-key write, creating the key on first use.
    pub fn commit_chain(&mut self, change: &ChainChange, now: Timestamp) {
        let limit = self.chain_history_limit;
        let chain = self.chains.entry(change.key).or_insert_with(|| ChainRoot {
            root: ZERO_ROOT,
            updated_at: 0,
            history: RingHistory::new(limit),
        });
        chain.root = change.new_root;
        chain.updated_at = now;
        chain.history.push(change.new_root, now);
    }

    /// Validate a whole batch against a staged overlay.
    ///
    /// Pairs are evaluated in input order; a repeated key compares against the
    /// value staged by its earlier pair. Under `SkipUnchanged` the returned
    /// plan omits unchanged pairs.
    ///
    /// # Errors
    /// `LengthMismatch` for unequal inputs, `NoChange` on the first unchanged
    /// pair under `RejectUnchanged`.
    pub fn plan_batch(
        &self,
        keys: &[ChainKey],
        roots: &[Root],
        policy: BatchPolicy,
    ) -> RegistryResult<Vec<ChainChange>> {
        if keys.len() != roots.len() {
            return Err(RegistryError::LengthMismatch {
                keys: keys.len(),
                roots: roots.len(),
            });
        }

        let mut staged: BTreeMap<ChainKey, Root> = BTreeMap::new();
        let mut plan = Vec::with_capacity(keys.len());

        for (&key, &new_root) in keys.iter().zip(roots) {
            let old_root = staged
                .get(&key)
                .copied()
                .unwrap_or_else(|| self.chain_root(key));

            if new_root == old_root {
                match policy {
                    BatchPolicy::RejectUnchanged => return Err(RegistryError::NoChange),
                    BatchPolicy::SkipUnchanged => continue,
                }
            }

            staged.insert(key, new_root);
            plan.push(ChainChange {
                key,
                old_root,
                new_root,
            });
        }

        Ok(plan)
    }

    /// Structural checks after deserialization.
    pub(crate) fn check_consistency(
        &self,
        global_history_limit: usize,
        chain_history_limit: usize,
    ) -> Result<(), String> {
        if self.global.version == 0 {
            return Err("global version must start at 1".into());
        }
        self.global.history.check_consistency(global_history_limit)?;
        match self.global.history.latest() {
            Some(entry) if entry.value != self.global.root => {
                return Err("global root differs from its newest history entry".into());
            }
            None if self.global.root != ZERO_ROOT => {
                return Err("non-zero global root without history".into());
            }
            _ => {}
        }
        if self.chain_history_limit != chain_history_limit {
            return Err(format!(
                "chain history limit {} does not match configured {}",
                self.chain_history_limit, chain_history_limit
            ));
        }
        for (key, chain) in &self.chains {
            chain
                .history
                .check_consistency(chain_history_limit)
                .map_err(|e| format!("key {key}: {e}"))?;
            match chain.history.latest() {
                Some(entry)
                    if entry.value == chain.root && entry.recorded_at == chain.updated_at => {}
                _ => return Err(format!("key {key}: current root differs from its history")),
            }
        }
        Ok(())
    }
}
