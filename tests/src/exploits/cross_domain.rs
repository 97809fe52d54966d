//! # Cross-Deployment Replay
//!
//! **Attack:** a signer is authorized on two registries (a test network and
//! production, or two registries on one network). A relayer copies an
//! update accepted by one and submits it to the other.
//!
//! **Defense:** the digest binds name, version, network id and registry
//! address, and a deployment without an explicit address pins one from its
//! owner and genesis time. A signature made for one domain recovers to an
//! unrelated address under another.

#[cfg(test)]
mod tests {
    use crate::fixtures::{root, sign_update_for, Harness, TestRegistry, GENESIS_TIME, OWNER};
    use k256::ecdsa::SigningKey;
    use rr_root_registry::prelude::*;
    use rr_signature_verification::test_helpers::{address_of, generate_keypair};
    use shared_types::{Address, Timestamp};

    fn deploy_default(owner: Address, at: Timestamp, signer: &SigningKey) -> TestRegistry {
        let mut registry = RootRegistryService::new(
            RegistryConfig::default(),
            owner,
            EcdsaVerifier,
            ManualTimeSource::new(at),
            InMemoryEventSink::new(),
        )
        .unwrap();
        registry
            .add_authorized_signer(owner, address_of(signer))
            .unwrap();
        registry
    }

    fn signed_for(registry: &TestRegistry, key: &SigningKey, root_byte: u8) -> SignedRootUpdate {
        sign_update_for(registry.domain(), key, 1, root(root_byte), 0)
    }

    fn twin(config: RegistryConfig, signer: &SigningKey) -> Harness {
        let mut h = Harness::with_config(config);
        h.registry
            .add_authorized_signer(OWNER, address_of(signer))
            .unwrap();
        h
    }

    fn assert_rejected_as_foreign(h: &mut Harness, update: &SignedRootUpdate) {
        assert!(matches!(
            h.registry.set_chain_root_signed(update),
            Err(RegistryError::InvalidSignature(
                SignatureError::SignerMismatch { .. }
            ))
        ));
        assert_eq!(h.registry.chain_root(update.key), [0u8; 32]);
        assert_eq!(h.registry.nonce_of(&update.signer), 0);
    }

    #[test]
    fn test_same_network_default_deployments_are_isolated() {
        let (key, _) = generate_keypair();
        let signer = address_of(&key);
        let mut first = deploy_default([0x01; 20], GENESIS_TIME, &key);
        let mut second = deploy_default([0x02; 20], GENESIS_TIME, &key);

        assert_ne!(first.domain_separator(), second.domain_separator());

        let update = signed_for(&first, &key, 1);
        assert_eq!(first.set_chain_root_signed(&update), Ok(signer));
        assert!(matches!(
            second.set_chain_root_signed(&update),
            Err(RegistryError::InvalidSignature(
                SignatureError::SignerMismatch { .. }
            ))
        ));
        assert_eq!(second.chain_root(1), [0u8; 32]);
        assert_eq!(second.nonce_of(&signer), 0);
    }

    #[test]
    fn test_redeployment_by_same_owner_is_isolated() {
        let (key, _) = generate_keypair();
        let mut old = deploy_default(OWNER, GENESIS_TIME, &key);
        let mut fresh = deploy_default(OWNER, GENESIS_TIME + 1, &key);

        let update = signed_for(&old, &key, 1);
        old.set_chain_root_signed(&update).unwrap();
        assert!(matches!(
            fresh.set_chain_root_signed(&update),
            Err(RegistryError::InvalidSignature(_))
        ));

        let native = signed_for(&fresh, &key, 1);
        assert_eq!(fresh.set_chain_root_signed(&native), Ok(address_of(&key)));
    }

    #[test]
    fn test_other_network_signature_rejected() {
        let mut source = Harness::new();
        let key = source.enroll_signer();
        let update = source.sign_next(&key, 1, root(1));
        source.registry.set_chain_root_signed(&update).unwrap();

        let base = RegistryConfig::for_testing();
        let network_id = base.network_id + 1;
        let mut target = twin(base.with_network_id(network_id), &key);

        assert_ne!(
            target.registry.domain_separator(),
            source.registry.domain_separator()
        );
        assert_rejected_as_foreign(&mut target, &update);
    }

    #[test]
    fn test_other_registry_address_signature_rejected() {
        let source = Harness::new();
        let (key, _) = generate_keypair();
        let update = source.sign_update(&key, 1, root(1), 0);

        let config = RegistryConfig::for_testing().with_registry_address([0x77; 20]);
        let mut target = twin(config, &key);

        assert_rejected_as_foreign(&mut target, &update);
    }

    #[test]
    fn test_other_version_signature_rejected() {
        let (key, _) = generate_keypair();
        let mut config = RegistryConfig::for_testing().with_registry_address([0x42; 20]);
        let v1_domain = config.domain_tag();
        config.version = "2".to_string();
        let mut target = twin(config, &key);

        let update = sign_update_for(&v1_domain, &key, 1, root(1), 0);
        assert_rejected_as_foreign(&mut target, &update);

        let native = target.sign_update(&key, 1, root(1), 0);
        assert_eq!(
            target.registry.set_chain_root_signed(&native),
            Ok(address_of(&key))
        );
    }
}
