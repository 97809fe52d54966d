//! # Root Registry Benchmarks
//!
//! | Area | Claim |
//! |------|-------|
//! | Ring history | O(1) push, reads bounded by requested items |
//! | Batch writes | Linear in pairs |
//! | Signed writes | One recovery per update |

use criterion::{criterion_group, criterion_main, Criterion};
use rr_tests::benchmarks::{ring_history, signed_updates};
use std::time::Duration;

fn ring_benchmarks(c: &mut Criterion) {
    ring_history::register_benchmarks(c);
}

fn signature_benchmarks(c: &mut Criterion) {
    signed_updates::register_benchmarks(c);
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = ring_benchmarks, signature_benchmarks
}
criterion_main!(benches);
