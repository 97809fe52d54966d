//! # Signed Update Benchmarks
//!
//! Claims to validate:
//! - Digest construction is negligible next to recovery
//! - A full signed write is dominated by one public-key recovery

use crate::fixtures::{root, Harness};
use criterion::{black_box, Criterion};
use rr_root_registry::prelude::*;
use rr_signature_verification::test_helpers::{address_of, generate_keypair, sign};
use rr_signature_verification::{recover_address, signing_digest};
use std::time::Instant;

/// Domain-separated digest construction.
pub fn digest(c: &mut Criterion) {
    let domain = RegistryConfig::for_testing().domain_tag();
    c.bench_function("signing_digest", |b| {
        b.iter(|| black_box(signing_digest(&domain, black_box(7), &root(1), black_box(42))));
    });
}

/// Signer recovery from a low-S signature.
pub fn recovery(c: &mut Criterion) {
    let (key, _) = generate_keypair();
    let domain = RegistryConfig::for_testing().domain_tag();
    let message = signing_digest(&domain, 7, &root(1), 0);
    let signature = sign(&message, &key);

    c.bench_function("recover_signer", |b| {
        b.iter(|| black_box(recover_address(&message, &signature)));
    });
}

/// End-to-end signed chain-root write. Updates are signed outside the
/// timed section with consecutive nonces.
pub fn signed_write(c: &mut Criterion) {
    let mut h = Harness::new();
    let key = h.enroll_signer();
    let mut round = 0u32;

    c.bench_function("set_chain_root_signed", |b| {
        b.iter_custom(|iters| {
            let start_nonce = h.registry.nonce_of(&address_of(&key));
            let updates: Vec<_> = (0..iters)
                .map(|i| {
                    round = round.wrapping_add(1);
                    let mut new_root = [0xFFu8; 32];
                    new_root[..4].copy_from_slice(&round.to_be_bytes());
                    h.sign_update(&key, 1, new_root, start_nonce + i)
                })
                .collect();

            let started = Instant::now();
            for update in &updates {
                let _ = black_box(h.registry.set_chain_root_signed(update));
            }
            started.elapsed()
        });
    });
}

/// Register this module's benchmarks.
pub fn register_benchmarks(c: &mut Criterion) {
    digest(c);
    recovery(c);
    signed_write(c);
}
