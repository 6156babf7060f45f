//! Benchmarks for credential hashing and verification
//!
//! Costs are kept low so a run finishes quickly; relative numbers between
//! cost settings are what matter here.

use credhash::{Argon2Hasher, Credhash, ScryptHasher};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tokio::runtime::Runtime;

const PASSWORD: &str = "benchmark password";

fn argon2_hasher(memory: u32) -> Argon2Hasher {
    Credhash::argon2id()
        .memory(memory)
        .passes(1)
        .parallelism(1)
        .build()
        .unwrap()
}

fn scrypt_hasher(cost: u32) -> ScryptHasher {
    Credhash::scrypt()
        .cost(cost)
        .block_size(8)
        .parallelization(1)
        .build()
        .unwrap()
}

/// Hash throughput across memory costs
fn benchmark_hash(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("credential_hash");

    for memory in [256u32, 1024, 4096] {
        let hasher = argon2_hasher(memory);
        group.bench_with_input(BenchmarkId::new("argon2id", memory), &hasher, |b, hasher| {
            b.iter(|| {
                rt.block_on(async {
                    let stored = hasher.hash(PASSWORD).await.expect("hash should succeed");
                    std::hint::black_box(stored);
                });
            });
        });
    }

    for cost in [1u32 << 8, 1 << 10, 1 << 12] {
        let hasher = scrypt_hasher(cost);
        group.bench_with_input(BenchmarkId::new("scrypt", cost), &hasher, |b, hasher| {
            b.iter(|| {
                rt.block_on(async {
                    let stored = hasher.hash(PASSWORD).await.expect("hash should succeed");
                    std::hint::black_box(stored);
                });
            });
        });
    }
    group.finish();
}

/// Verification of a matching and a non-matching password
fn benchmark_verify(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("credential_verify");

    let argon2 = argon2_hasher(1024);
    let stored = rt.block_on(argon2.hash(PASSWORD)).unwrap();
    group.bench_function("argon2id_match", |b| {
        b.iter(|| rt.block_on(argon2.verify(PASSWORD, &stored)).unwrap());
    });
    group.bench_function("argon2id_mismatch", |b| {
        b.iter(|| rt.block_on(argon2.verify("wrong password", &stored)).unwrap());
    });

    let scrypt = scrypt_hasher(1 << 10);
    let stored = rt.block_on(scrypt.hash(PASSWORD)).unwrap();
    group.bench_function("scrypt_match", |b| {
        b.iter(|| rt.block_on(scrypt.verify(PASSWORD, &stored)).unwrap());
    });
    group.finish();
}

/// Rehash checks derive no key and should cost microseconds
fn benchmark_needs_rehash(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let hasher = argon2_hasher(1024);
    let stored = rt.block_on(hasher.hash(PASSWORD)).unwrap();

    c.bench_function("argon2id_needs_rehash", |b| {
        b.iter(|| rt.block_on(hasher.needs_rehash(std::hint::black_box(&stored))).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_hash,
    benchmark_verify,
    benchmark_needs_rehash
);
criterion_main!(benches);
