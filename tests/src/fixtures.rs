//! # Test Fixtures
//!
//! A registry wired to a manual clock and an in-memory sink, plus helpers
//! for producing signed updates the way an off-line publisher would.

use k256::ecdsa::SigningKey;
use rr_root_registry::prelude::*;
use rr_signature_verification::test_helpers::{address_of, generate_keypair, sign};
use shared_types::{Address, ChainKey, Root, Timestamp};

/// Registry type used across the suite.
pub type TestRegistry = RootRegistryService<EcdsaVerifier, ManualTimeSource, InMemoryEventSink>;

/// Deployer of every fixture registry.
pub const OWNER: Address = [0x0A; 20];
/// Admin added at setup.
pub const ADMIN: Address = [0xAD; 20];
/// Account with no role.
pub const STRANGER: Address = [0x5E; 20];
/// Clock start.
pub const GENESIS_TIME: Timestamp = 1_700_000_000;

/// Registry plus handles to its clock and sink.
pub struct Harness {
    /// The registry under test
    pub registry: TestRegistry,
    /// Shared clock
    pub clock: ManualTimeSource,
    /// Shared event log
    pub sink: InMemoryEventSink,
}

impl Harness {
    /// Deploy with `config`, add [`ADMIN`] and clear deployment events.
    ///
    /// # Panics
    /// If `config` is invalid.
    pub fn with_config(config: RegistryConfig) -> Self {
        let clock = ManualTimeSource::new(GENESIS_TIME);
        let sink = InMemoryEventSink::new();
        let mut registry =
            RootRegistryService::new(config, OWNER, EcdsaVerifier, clock.clone(), sink.clone())
                .expect("fixture config is valid");
        registry
            .add_admin(OWNER, ADMIN)
            .expect("owner can add an admin");
        sink.drain();
        Self {
            registry,
            clock,
            sink,
        }
    }

    /// Deploy with the test configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::for_testing())
    }

    /// Generate a key and register its address as an authorized signer.
    ///
    /// # Panics
    /// If the registry is paused.
    pub fn enroll_signer(&mut self) -> SigningKey {
        let (key, _) = generate_keypair();
        self.registry
            .add_authorized_signer(OWNER, address_of(&key))
            .expect("owner can add a signer");
        key
    }

    /// Sign an update against this registry's domain.
    pub fn sign_update(
        &self,
        key: &SigningKey,
        chain: ChainKey,
        new_root: Root,
        nonce: u64,
    ) -> SignedRootUpdate {
        sign_update_for(self.registry.domain(), key, chain, new_root, nonce)
    }

    /// Sign an update using the signer's current nonce.
    pub fn sign_next(&self, key: &SigningKey, chain: ChainKey, new_root: Root) -> SignedRootUpdate {
        let nonce = self.registry.nonce_of(&address_of(key));
        self.sign_update(key, chain, new_root, nonce)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Sign an update against an arbitrary domain.
pub fn sign_update_for(
    domain: &DomainTag,
    key: &SigningKey,
    chain: ChainKey,
    new_root: Root,
    nonce: u64,
) -> SignedRootUpdate {
    let digest = rr_signature_verification::signing_digest(domain, chain, &new_root, nonce);
    SignedRootUpdate {
        signer: address_of(key),
        key: chain,
        new_root,
        nonce,
        signature: sign(&digest, key),
    }
}

/// Root filled with `n`.
pub fn root(n: u8) -> Root {
    [n; 32]
}
