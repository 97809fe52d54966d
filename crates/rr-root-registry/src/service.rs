//! # Root Registry Service
//!
//! Implements [`RootRegistryApi`] over a single owned [`RegistryState`].
//!
//! ## Write path
//!
//! Direct and signed writes share one routine:
//!
//! ```text
//! pause gate -> authorize(WriteAuthority) -> plan (NoChange) -> commit -> events
//! ```
//!
//! `authorize` resolves a `Direct(caller)` by role lookup (owner or admin) and
//! a `Signed(update)` by digest, signer recovery, role lookup (owner or
//! authorized signer) and nonce check. Nothing is mutated until every check
//! has passed, so a failed call leaves state exactly as it was and a nonce is
//! only consumed together with its root write.

use crate::adapters::snapshot::{RegistrySnapshot, SnapshotError};
use crate::config::RegistryConfig;
use crate::domain::{
    Grant, HistoryEntry, RegistryError, RegistryResult, RegistryState, SignedRootUpdate,
    WriteAuthority,
};
use crate::events::RegistryEvent;
use crate::metrics;
use crate::ports::{EventSink, RootRegistryApi, TimeSource};
use rr_signature_verification::{signing_digest, DomainTag, SignatureVerificationApi};
use shared_types::{to_hex, Address, ChainKey, Hash, Root, Timestamp};
use tracing::{info, warn};

/// Root registry bound to a verifier, a clock and an event sink.
pub struct RootRegistryService<V, T, E>
where
    V: SignatureVerificationApi,
    T: TimeSource,
    E: EventSink,
{
    config: RegistryConfig,
    domain: DomainTag,
    state: RegistryState,
    verifier: V,
    clock: T,
    events: E,
}

impl<V, T, E> RootRegistryService<V, T, E>
where
    V: SignatureVerificationApi,
    T: TimeSource,
    E: EventSink,
{
    /// Deploy a fresh registry owned by `owner`.
    ///
    /// An unset `registry_address` is pinned from the owner and the clock,
    /// so every deployment signs over its own domain.
    ///
    /// # Errors
    /// `InvalidConfig` for a bad config, `ZeroAddress` for a null owner.
    pub fn new(
        config: RegistryConfig,
        owner: Address,
        verifier: V,
        clock: T,
        events: E,
    ) -> RegistryResult<Self> {
        let now = clock.now();
        let state = RegistryState::genesis(&config, owner, now)?;
        let config = config.pinned(&owner, now);
        let domain = config.domain_tag();

        info!(
            name = %config.name,
            network_id = config.network_id,
            registry = %to_hex(&domain.registry),
            owner = %to_hex(&owner),
            "root registry deployed"
        );

        let service = Self {
            config,
            domain,
            state,
            verifier,
            clock,
            events,
        };
        service.emit(RegistryEvent::OwnershipTransferred {
            previous: None,
            new: Some(owner),
        });
        Ok(service)
    }

    /// Resume from a persisted snapshot.
    ///
    /// # Errors
    /// `SnapshotError` if the snapshot fails validation.
    pub fn from_snapshot(
        snapshot: RegistrySnapshot,
        verifier: V,
        clock: T,
        events: E,
    ) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let domain = snapshot.config.domain_tag();
        Ok(Self {
            config: snapshot.config,
            domain,
            state: snapshot.state,
            verifier,
            clock,
            events,
        })
    }

    /// Copy of config and state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            config: self.config.clone(),
            state: self.state.clone(),
        }
    }

    /// Read-only view of the state.
    #[must_use]
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Domain tag bound into every signed digest.
    #[must_use]
    pub fn domain(&self) -> &DomainTag {
        &self.domain
    }

    /// The event sink.
    pub fn events(&self) -> &E {
        &self.events
    }

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================

    fn ensure_not_paused(&self) -> RegistryResult<()> {
        if self.state.paused {
            return Err(RegistryError::Paused);
        }
        Ok(())
    }

    fn require_owner(&self, caller: &Address) -> RegistryResult<()> {
        self.ensure_not_paused()?;
        self.state.roles.require_owner(caller)
    }

    /// Resolve a write authority to the principal it acts for.
    fn authorize(&self, authority: WriteAuthority<'_>) -> RegistryResult<Grant> {
        match authority {
            WriteAuthority::Direct(caller) => {
                if !self.state.roles.can_write(&caller) {
                    return Err(RegistryError::Unauthorized(caller));
                }
                Ok(Grant {
                    principal: caller,
                    nonce: None,
                })
            }
            WriteAuthority::Signed(update) => {
                let digest =
                    signing_digest(&self.domain, update.key, &update.new_root, update.nonce);
                let signer =
                    self.verifier
                        .verify_signer(&digest, &update.signature, &update.signer)?;

                if !self.state.roles.can_sign(&signer) {
                    return Err(RegistryError::Unauthorized(signer));
                }
                self.state.nonces.check(&signer, update.nonce)?;

                Ok(Grant {
                    principal: signer,
                    nonce: Some(update.nonce),
                })
            }
        }
    }

    // =========================================================================
    // WRITE ROUTINES
    // =========================================================================

    /// Single-key write shared by the direct and signed paths.
    fn write_chain(
        &mut self,
        authority: WriteAuthority<'_>,
        key: ChainKey,
        new_root: Root,
    ) -> RegistryResult<Grant> {
        self.ensure_not_paused()?;
        let grant = self.authorize(authority)?;
        let change = self.state.roots.plan_chain(key, new_root)?;

        let now = self.clock.now();
        self.state.roots.commit_chain(&change, now);
        if grant.nonce.is_some() {
            self.state.nonces.consume(&grant.principal);
        }

        self.emit(RegistryEvent::ChainRootUpdated {
            caller: grant.principal,
            key,
            old_root: change.old_root,
            new_root,
            timestamp: now,
        });
        if let Some(nonce) = grant.nonce {
            self.emit(RegistryEvent::RootUpdatedBySignature {
                signer: grant.principal,
                key,
                new_root,
                nonce,
                timestamp: now,
            });
            metrics::signed_update();
        }
        metrics::root_update("chain");

        info!(
            key,
            caller = %to_hex(&grant.principal),
            nonce = ?grant.nonce,
            root = %to_hex(&new_root),
            "chain root updated"
        );
        Ok(grant)
    }

    fn write_global(&mut self, caller: Address, new_root: Root) -> RegistryResult<u64> {
        self.ensure_not_paused()?;
        let grant = self.authorize(WriteAuthority::Direct(caller))?;
        let change = self.state.roots.plan_global(new_root)?;

        let now = self.clock.now();
        self.state.roots.commit_global(&change, now);

        self.emit(RegistryEvent::GlobalRootUpdated {
            caller: grant.principal,
            old_root: change.old_root,
            new_root,
            version: change.version,
            timestamp: now,
        });
        metrics::root_update("global");

        info!(
            version = change.version,
            caller = %to_hex(&caller),
            root = %to_hex(&new_root),
            "global root updated"
        );
        Ok(change.version)
    }

    fn write_batch(
        &mut self,
        caller: Address,
        keys: &[ChainKey],
        roots: &[Root],
    ) -> RegistryResult<usize> {
        self.ensure_not_paused()?;
        let grant = self.authorize(WriteAuthority::Direct(caller))?;
        let plan = self
            .state
            .roots
            .plan_batch(keys, roots, self.config.batch_policy)?;

        let now = self.clock.now();
        for change in &plan {
            self.state.roots.commit_chain(change, now);
            self.emit(RegistryEvent::ChainRootUpdated {
                caller: grant.principal,
                key: change.key,
                old_root: change.old_root,
                new_root: change.new_root,
                timestamp: now,
            });
            metrics::root_update("chain");
        }

        let count = plan.len();
        self.emit(RegistryEvent::BatchUpdated {
            caller: grant.principal,
            count,
            timestamp: now,
        });
        metrics::batch(count);

        info!(
            caller = %to_hex(&caller),
            requested = keys.len(),
            committed = count,
            "batch chain roots updated"
        );
        Ok(count)
    }

    fn emit(&self, event: RegistryEvent) {
        self.events.publish(&event);
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

/// Log and count a rejected call.
fn observe<R>(operation: &'static str, result: RegistryResult<R>) -> RegistryResult<R> {
    if let Err(e) = &result {
        warn!(operation, reason = e.kind(), error = %e, "registry call rejected");
        metrics::rejection(e.kind());
    }
    result
}

impl<V, T, E> RootRegistryApi for RootRegistryService<V, T, E>
where
    V: SignatureVerificationApi,
    T: TimeSource,
    E: EventSink,
{
    fn set_global_root(&mut self, caller: Address, new_root: Root) -> RegistryResult<u64> {
        let result = self.write_global(caller, new_root);
        observe("set_global_root", result)
    }

    fn set_chain_root(
        &mut self,
        caller: Address,
        key: ChainKey,
        new_root: Root,
    ) -> RegistryResult<()> {
        let result = self
            .write_chain(WriteAuthority::Direct(caller), key, new_root)
            .map(|_| ());
        observe("set_chain_root", result)
    }

    fn batch_set_chain_roots(
        &mut self,
        caller: Address,
        keys: &[ChainKey],
        roots: &[Root],
    ) -> RegistryResult<usize> {
        let result = self.write_batch(caller, keys, roots);
        observe("batch_set_chain_roots", result)
    }

    fn set_chain_root_signed(&mut self, update: &SignedRootUpdate) -> RegistryResult<Address> {
        let result = self
            .write_chain(WriteAuthority::Signed(update), update.key, update.new_root)
            .map(|grant| grant.principal);
        observe("set_chain_root_signed", result)
    }

    fn add_admin(&mut self, caller: Address, account: Address) -> RegistryResult<()> {
        let result = self.require_owner(&caller).and_then(|()| {
            if self.state.roles.admins.add(account)? {
                self.emit(RegistryEvent::AdminAdded { account });
                info!(account = %to_hex(&account), "admin added");
            }
            Ok(())
        });
        observe("add_admin", result)
    }

    fn remove_admin(&mut self, caller: Address, account: Address) -> RegistryResult<()> {
        let result = self.require_owner(&caller).map(|()| {
            if self.state.roles.admins.remove(&account) {
                self.emit(RegistryEvent::AdminRemoved { account });
                info!(account = %to_hex(&account), "admin removed");
            }
        });
        observe("remove_admin", result)
    }

    fn add_authorized_signer(&mut self, caller: Address, account: Address) -> RegistryResult<()> {
        let result = self.require_owner(&caller).and_then(|()| {
            if self.state.roles.signers.add(account)? {
                self.emit(RegistryEvent::SignerAdded { account });
                info!(account = %to_hex(&account), "signer authorized");
            }
            Ok(())
        });
        observe("add_authorized_signer", result)
    }

    fn remove_authorized_signer(
        &mut self,
        caller: Address,
        account: Address,
    ) -> RegistryResult<()> {
        let result = self.require_owner(&caller).map(|()| {
            if self.state.roles.signers.remove(&account) {
                self.emit(RegistryEvent::SignerRemoved { account });
                info!(account = %to_hex(&account), "signer revoked");
            }
        });
        observe("remove_authorized_signer", result)
    }

    fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> RegistryResult<()> {
        let result = self.require_owner(&caller).and_then(|()| {
            if new_owner == [0u8; 20] {
                return Err(RegistryError::ZeroAddress);
            }
            self.state.roles.owner = Some(new_owner);
            self.emit(RegistryEvent::OwnershipTransferred {
                previous: Some(caller),
                new: Some(new_owner),
            });
            info!(
                previous = %to_hex(&caller),
                new = %to_hex(&new_owner),
                "ownership transferred"
            );
            Ok(())
        });
        observe("transfer_ownership", result)
    }

    fn renounce_ownership(&mut self, caller: Address) -> RegistryResult<()> {
        let result = self.require_owner(&caller).map(|()| {
            self.state.roles.owner = None;
            self.emit(RegistryEvent::OwnershipTransferred {
                previous: Some(caller),
                new: None,
            });
            warn!(previous = %to_hex(&caller), "ownership renounced");
        });
        observe("renounce_ownership", result)
    }

    fn pause(&mut self, caller: Address) -> RegistryResult<()> {
        let result = self.require_owner(&caller).map(|()| {
            self.state.paused = true;
            self.emit(RegistryEvent::Paused { by: caller });
            warn!(by = %to_hex(&caller), at = self.now(), "registry paused");
        });
        observe("pause", result)
    }

    fn unpause(&mut self, caller: Address) -> RegistryResult<()> {
        let result = self.state.roles.require_owner(&caller).map(|()| {
            if self.state.paused {
                self.state.paused = false;
                self.emit(RegistryEvent::Unpaused { by: caller });
                info!(by = %to_hex(&caller), at = self.now(), "registry unpaused");
            }
        });
        observe("unpause", result)
    }

    fn set_name(&mut self, caller: Address, name: &str) -> RegistryResult<()> {
        let result = self.require_owner(&caller).and_then(|()| {
            if name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            self.state.display_name = name.to_string();
            self.emit(RegistryEvent::NameUpdated {
                name: name.to_string(),
            });
            info!(name, "display name updated");
            Ok(())
        });
        observe("set_name", result)
    }

    fn global_root(&self) -> Root {
        self.state.roots.global_root()
    }

    fn global_version(&self) -> u64 {
        self.state.roots.global_version()
    }

    fn global_history(&self, max_items: usize) -> RegistryResult<Vec<HistoryEntry<Root>>> {
        self.state.roots.global_history(max_items)
    }

    fn chain_root(&self, key: ChainKey) -> Root {
        self.state.roots.chain_root(key)
    }

    fn chain_update_time(&self, key: ChainKey) -> Timestamp {
        self.state.roots.chain_updated_at(key)
    }

    fn chain_history(
        &self,
        key: ChainKey,
        max_items: usize,
    ) -> RegistryResult<Vec<HistoryEntry<Root>>> {
        self.state.roots.chain_history(key, max_items)
    }

    fn chain_roots(&self, keys: &[ChainKey]) -> Vec<Root> {
        self.state.roots.chain_roots(keys)
    }

    fn is_admin(&self, account: &Address) -> bool {
        self.state.roles.admins.contains(account)
    }

    fn is_authorized_signer(&self, account: &Address) -> bool {
        self.state.roles.signers.contains(account)
    }

    fn is_paused(&self) -> bool {
        self.state.paused
    }

    fn owner(&self) -> Option<Address> {
        self.state.roles.owner
    }

    fn name(&self) -> &str {
        &self.state.display_name
    }

    fn admins(&self) -> Vec<Address> {
        self.state.roles.admins.members()
    }

    fn authorized_signers(&self) -> Vec<Address> {
        self.state.roles.signers.members()
    }

    fn nonce_of(&self, signer: &Address) -> u64 {
        self.state.nonces.current(signer)
    }

    fn domain_separator(&self) -> Hash {
        self.domain.separator()
    }

    fn signing_digest(&self, key: ChainKey, new_root: &Root, nonce: u64) -> Hash {
        signing_digest(&self.domain, key, new_root, nonce)
    }

    fn global_history_limit(&self) -> usize {
        self.state.roots.global_history_limit()
    }

    fn chain_history_limit(&self) -> usize {
        self.state.roots.chain_history_limit()
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
