// Signing & recovery benchmarks for Thor transactions.
//
// Covers key loading, signature recovery, plain signing, and fee-delegated
// signing (one-step and the gas payer's half alone).

use alloy_primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use thor_tx_core::crypto::{recover_address, sign_hash, SecretKey};
use thor_tx_core::transaction::{self, Clause, TransactionBody, TransactionBodyBuilder};

const SENDER_KEY: [u8; 32] = [0x11; 32];
const GAS_PAYER_KEY: [u8; 32] = [0x22; 32];

fn body(delegated: bool) -> TransactionBody {
    TransactionBodyBuilder::new(0x27)
        .clause(Clause::transfer(Address::repeat_byte(0xaa), U256::from(1_000_000u64)))
        .nonce(42)
        .delegated(delegated)
        .build()
}

fn bench_key_loading(c: &mut Criterion) {
    c.bench_function("secp256k1/key_from_slice", |b| {
        b.iter(|| SecretKey::from_slice(black_box(&SENDER_KEY)).unwrap());
    });
}

fn bench_recover(c: &mut Criterion) {
    let key = SecretKey::from_slice(&SENDER_KEY).unwrap();
    let hash = thor_tx_core::crypto::blake2b256(b"bench");
    let signature = sign_hash(&key, &hash).unwrap();

    c.bench_function("secp256k1/recover_address", |b| {
        b.iter(|| recover_address(black_box(&hash), black_box(&signature)).unwrap());
    });
}

fn bench_sign(c: &mut Criterion) {
    let body = body(false);
    c.bench_function("tx/sign", |b| {
        b.iter(|| transaction::sign(black_box(&body), &SENDER_KEY).unwrap());
    });
}

fn bench_sign_with_delegator(c: &mut Criterion) {
    let body = body(true);
    c.bench_function("tx/sign_with_delegator", |b| {
        b.iter(|| {
            transaction::sign_with_delegator(black_box(&body), &SENDER_KEY, &GAS_PAYER_KEY)
                .unwrap()
        });
    });

    let partial = transaction::sign_for_delegator(&body, &SENDER_KEY).unwrap();
    let sender = partial.origin().unwrap();
    c.bench_function("tx/sign_as_delegator", |b| {
        b.iter(|| {
            transaction::sign_as_delegator(black_box(&partial), &sender, &GAS_PAYER_KEY).unwrap()
        });
    });
}

fn bench_origin(c: &mut Criterion) {
    let mut group = c.benchmark_group("tx/origin_by_clauses");

    for size in [1usize, 10, 50] {
        let body = TransactionBodyBuilder::new(0x27)
            .clauses((0..size).map(|i| {
                Clause::transfer(Address::repeat_byte(i as u8), U256::from(i as u64))
            }))
            .build();
        let tx = transaction::sign(&body, &SENDER_KEY).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tx, |b, tx| {
            b.iter(|| tx.origin().unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_key_loading,
    bench_recover,
    bench_sign,
    bench_sign_with_delegator,
    bench_origin,
);
criterion_main!(benches);
