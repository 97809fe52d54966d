//! # Signature Malleability
//!
//! **Attack:** for any valid ECDSA signature `(r, s)` the pair `(r, n - s)`
//! with flipped recovery id is also valid. A relayer could submit the twin
//! to get a second, distinct-looking authorization for the same payload.
//!
//! **Defense:** high-S signatures are rejected before recovery (EIP-2), and
//! tampered payloads recover to an address that does not match the claim.

#[cfg(test)]
mod tests {
    use crate::fixtures::{root, Harness};
    use rr_root_registry::prelude::*;
    use rr_signature_verification::test_helpers::{address_of, malleate};

    #[test]
    fn test_high_s_twin_rejected_before_and_after_original() {
        let mut h = Harness::new();
        let key = h.enroll_signer();
        let update = h.sign_next(&key, 1, root(1));
        let twin = SignedRootUpdate {
            signature: malleate(&update.signature),
            ..update.clone()
        };

        assert_eq!(
            h.registry.set_chain_root_signed(&twin),
            Err(RegistryError::InvalidSignature(
                SignatureError::MalleableSignature
            ))
        );
        h.registry.set_chain_root_signed(&update).unwrap();
        assert_eq!(
            h.registry.set_chain_root_signed(&twin),
            Err(RegistryError::InvalidSignature(
                SignatureError::MalleableSignature
            ))
        );
        assert_eq!(h.registry.nonce_of(&address_of(&key)), 1);
    }

    #[test]
    fn test_tampered_root_rejected() {
        let mut h = Harness::new();
        let key = h.enroll_signer();
        let update = h.sign_next(&key, 1, root(1));
        let tampered = SignedRootUpdate {
            new_root: root(0xBD),
            ..update
        };

        assert!(matches!(
            h.registry.set_chain_root_signed(&tampered),
            Err(RegistryError::InvalidSignature(
                SignatureError::SignerMismatch { .. }
            ))
        ));
        assert_eq!(h.registry.chain_root(1), [0u8; 32]);
    }

    #[test]
    fn test_redirected_key_rejected() {
        let mut h = Harness::new();
        let key = h.enroll_signer();
        let update = h.sign_next(&key, 1, root(1));
        let redirected = SignedRootUpdate { key: 2, ..update };

        assert!(matches!(
            h.registry.set_chain_root_signed(&redirected),
            Err(RegistryError::InvalidSignature(_))
        ));
        assert_eq!(h.registry.chain_roots(&[1, 2]), vec![[0u8; 32]; 2]);
    }

    #[test]
    fn test_forged_signer_claim_rejected() {
        let mut h = Harness::new();
        let key = h.enroll_signer();
        let victim = address_of(&key);
        let (attacker, _) = rr_signature_verification::test_helpers::generate_keypair();

        let mut forged = h.sign_next(&attacker, 1, root(1));
        forged.signer = victim;

        assert_eq!(
            h.registry.set_chain_root_signed(&forged),
            Err(RegistryError::InvalidSignature(
                SignatureError::SignerMismatch {
                    expected: victim,
                    actual: address_of(&attacker),
                }
            ))
        );
        assert_eq!(h.registry.nonce_of(&victim), 0);
    }
}
