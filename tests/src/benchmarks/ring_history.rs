//! # Ring History Benchmarks
//!
//! Claims to validate:
//! - Push is O(1) regardless of capacity
//! - `last_n` cost grows with the items read, not with total pushes
//! - Batch writes scale linearly in the number of pairs

use crate::fixtures::{root, Harness, ADMIN};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rr_root_registry::prelude::*;
use shared_types::{ChainKey, Root};

/// Push into a full ring at several capacities.
pub fn ring_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_history_push");

    for capacity in [16usize, 256, 4096] {
        let mut ring: RingHistory<Root> = RingHistory::new(capacity);
        for n in 0..capacity as u64 {
            ring.push(root(n as u8), n);
        }

        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, _| {
            let mut t = 0u64;
            b.iter(|| {
                t += 1;
                ring.push(black_box(root(t as u8)), t);
            });
        });
    }

    group.finish();
}

/// Read the newest `n` entries out of a wrapped ring.
pub fn ring_last_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_history_last_n");
    let capacity = 1024;
    let mut ring: RingHistory<Root> = RingHistory::new(capacity);
    for n in 0..(capacity as u64 * 3) {
        ring.push(root(n as u8), n);
    }

    for n in [1usize, 32, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(ring.last_n(n)));
        });
    }

    group.finish();
}

/// Batch chain-root writes through the service.
pub fn batch_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_batch_set");

    for size in [1usize, 16, 128] {
        let keys: Vec<ChainKey> = (0..size as u64).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut h = Harness::new();
            let mut round = 0u8;
            b.iter(|| {
                round = round.wrapping_add(1).max(1);
                let roots = vec![root(round); size];
                black_box(h.registry.batch_set_chain_roots(ADMIN, &keys, &roots))
            });
        });
    }

    group.finish();
}

/// Register this module's benchmarks.
pub fn register_benchmarks(c: &mut Criterion) {
    ring_push(c);
    ring_last_n(c);
    batch_writes(c);
}
