//! # Persistence and Telemetry Flows
//!
//! A registry saved to disk and resumed must keep its roots, roles and
//! nonce ledger, and must keep accepting signatures produced against the
//! domain it was deployed with.

#[cfg(test)]
mod tests {
    use crate::fixtures::{root, Harness, ADMIN, GENESIS_TIME, OWNER};
    use rr_root_registry::prelude::*;
    use rr_signature_verification::test_helpers::address_of;

    fn resume(snapshot: RegistrySnapshot, h: &Harness) -> crate::fixtures::TestRegistry {
        RootRegistryService::from_snapshot(snapshot, EcdsaVerifier, h.clock.clone(), h.sink.clone())
            .unwrap()
    }

    #[test]
    fn test_json_snapshot_resumes_signed_flow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");

        let mut h = Harness::new();
        let key = h.enroll_signer();
        let signer = address_of(&key);
        h.registry.set_global_root(ADMIN, root(0xAA)).unwrap();
        let first = h.sign_next(&key, 9, root(1));
        h.registry.set_chain_root_signed(&first).unwrap();
        // Signed before the restart, submitted after it
        let second = h.sign_update(&key, 9, root(2), 1);

        save_snapshot(&path, &h.registry.snapshot(), SnapshotFormat::from_path(&path)).unwrap();
        let loaded = load_snapshot(&path, SnapshotFormat::Json).unwrap();
        let mut resumed = resume(loaded, &h);

        assert_eq!(resumed.domain_separator(), h.registry.domain_separator());
        assert_eq!(resumed.global_root(), root(0xAA));
        assert_eq!(resumed.global_version(), 2);
        assert_eq!(resumed.nonce_of(&signer), 1);
        assert!(resumed.is_admin(&ADMIN));
        assert!(resumed.is_authorized_signer(&signer));

        assert_eq!(
            resumed.set_chain_root_signed(&first),
            Err(RegistryError::ReplayedNonce {
                signer,
                expected: 1,
                provided: 0,
            })
        );
        assert_eq!(resumed.set_chain_root_signed(&second), Ok(signer));
        assert_eq!(resumed.chain_root(9), root(2));
    }

    #[test]
    fn test_bincode_snapshot_preserves_history_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.bin");
        let mut h = Harness::new();
        for n in 1..=7u8 {
            h.clock.advance(1);
            h.registry.set_chain_root(ADMIN, 4, root(n)).unwrap();
        }

        let format = SnapshotFormat::from_path(&path);
        assert_eq!(format, SnapshotFormat::Bincode);
        save_snapshot(&path, &h.registry.snapshot(), format).unwrap();
        let mut resumed = resume(load_snapshot(&path, format).unwrap(), &h);

        assert_eq!(
            resumed.chain_history(4, 5).unwrap(),
            h.registry.chain_history(4, 5).unwrap()
        );
        assert_eq!(resumed.chain_update_time(4), h.registry.chain_update_time(4));

        // The write cursor continues where it stopped: root(3) is evicted
        h.clock.advance(1);
        resumed.set_chain_root(ADMIN, 4, root(8)).unwrap();
        let values: Vec<_> = resumed
            .chain_history(4, 5)
            .unwrap()
            .iter()
            .map(|e| e.value)
            .collect();
        assert_eq!(values, vec![root(8), root(7), root(6), root(5), root(4)]);
        assert_eq!(
            resumed.chain_history(4, 5).unwrap()[0].recorded_at,
            GENESIS_TIME + 8
        );
    }

    #[test]
    fn test_restart_keeps_pinned_domain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinned.json");
        let h = Harness::with_config(RegistryConfig::default());
        let pinned = h.registry.config().registry_address;
        assert!(pinned.is_some());

        save_snapshot(&path, &h.registry.snapshot(), SnapshotFormat::Json).unwrap();
        let resumed = resume(load_snapshot(&path, SnapshotFormat::Json).unwrap(), &h);

        assert_eq!(resumed.config().registry_address, pinned);
        assert_eq!(resumed.domain_separator(), h.registry.domain_separator());
    }

    #[test]
    fn test_paused_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paused.json");
        let mut h = Harness::new();
        h.registry.pause(OWNER).unwrap();

        save_snapshot(&path, &h.registry.snapshot(), SnapshotFormat::Json).unwrap();
        let mut resumed = resume(load_snapshot(&path, SnapshotFormat::Json).unwrap(), &h);

        assert!(resumed.is_paused());
        assert_eq!(
            resumed.set_chain_root(ADMIN, 1, root(1)),
            Err(RegistryError::Paused)
        );
    }

    #[test]
    fn test_corrupt_snapshot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{\"config\": 1}").unwrap();

        assert!(matches!(
            load_snapshot(&path, SnapshotFormat::Json),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_rejections_reach_prometheus() {
        registry_telemetry::register_metrics().unwrap();
        let mut h = Harness::new();
        h.registry.set_chain_root(ADMIN, 1, root(1)).unwrap();
        let _ = h.registry.set_chain_root(ADMIN, 1, root(1));

        let text = registry_telemetry::gather_text().unwrap();
        assert!(text.contains("rr_root_updates_total"));
        assert!(text.contains("reason=\"no_change\""));
    }
}
