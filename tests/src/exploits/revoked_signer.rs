//! # Revoked Signer
//!
//! **Attack:** a signer's key is compromised and the owner removes it. The
//! holder of the key keeps producing updates, or a relayer holds updates
//! signed before the revocation and submits them afterwards.
//!
//! **Defense:** role membership is checked at submission time, not at
//! signing time.

#[cfg(test)]
mod tests {
    use crate::fixtures::{root, Harness, ADMIN, OWNER};
    use rr_root_registry::prelude::*;
    use rr_signature_verification::test_helpers::{address_of, generate_keypair};

    #[test]
    fn test_presigned_update_rejected_after_revocation() {
        let mut h = Harness::new();
        let key = h.enroll_signer();
        let signer = address_of(&key);
        let held = h.sign_next(&key, 1, root(1));

        h.registry.remove_authorized_signer(OWNER, signer).unwrap();

        assert_eq!(
            h.registry.set_chain_root_signed(&held),
            Err(RegistryError::Unauthorized(signer))
        );
        assert_eq!(h.registry.chain_root(1), [0u8; 32]);
    }

    #[test]
    fn test_reenrolled_signer_resumes_at_ledger_nonce() {
        let mut h = Harness::new();
        let key = h.enroll_signer();
        let signer = address_of(&key);
        let first = h.sign_next(&key, 1, root(1));
        h.registry.set_chain_root_signed(&first).unwrap();
        h.registry.remove_authorized_signer(OWNER, signer).unwrap();
        h.registry.add_authorized_signer(OWNER, signer).unwrap();

        assert_eq!(h.registry.nonce_of(&signer), 1);
        let stale = h.sign_update(&key, 1, root(2), 0);
        assert!(matches!(
            h.registry.set_chain_root_signed(&stale),
            Err(RegistryError::ReplayedNonce { expected: 1, .. })
        ));
    }

    #[test]
    fn test_admin_role_does_not_grant_signing() {
        let mut h = Harness::new();
        let (key, _) = generate_keypair();
        let admin = address_of(&key);
        h.registry.add_admin(OWNER, admin).unwrap();

        let update = h.sign_next(&key, 1, root(1));
        assert_eq!(
            h.registry.set_chain_root_signed(&update),
            Err(RegistryError::Unauthorized(admin))
        );
        h.registry.set_chain_root(admin, 1, root(1)).unwrap();
    }

    #[test]
    fn test_signer_role_does_not_grant_direct_writes() {
        let mut h = Harness::new();
        let key = h.enroll_signer();
        let signer = address_of(&key);

        assert_eq!(
            h.registry.set_chain_root(signer, 1, root(1)),
            Err(RegistryError::Unauthorized(signer))
        );
        assert_eq!(
            h.registry.set_global_root(signer, root(1)),
            Err(RegistryError::Unauthorized(signer))
        );
        assert!(h.registry.is_admin(&ADMIN));
    }
}
