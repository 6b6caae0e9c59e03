use criterion::{criterion_group, criterion_main, Criterion};

use validator_bls::{
    aggregate_signatures, derive_bls_private_key, private_to_public, sign_message,
    verify_aggregated_signature, verify_signature, PublicKeyCache, PRIVATEKEYBYTES,
};

fn aggregate_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("validator_set");
    group.sample_size(10);
    const NUM_VALIDATORS: usize = 100;
    let message = b"epoch block";

    let private_keys = (0..NUM_VALIDATORS)
        .map(|i| {
            let mut ecdsa_key = [0u8; PRIVATEKEYBYTES];
            ecdsa_key[..8].copy_from_slice(&(i as u64 + 1).to_le_bytes());
            derive_bls_private_key(&ecdsa_key).unwrap()
        })
        .collect::<Vec<_>>();
    let public_keys = private_keys
        .iter()
        .map(|sk| private_to_public(sk).unwrap())
        .collect::<Vec<_>>();
    let signatures = private_keys
        .iter()
        .map(|sk| sign_message(sk, message, &[], true, true).unwrap())
        .collect::<Vec<_>>();
    let aggregate = aggregate_signatures(&signatures).unwrap();
    let cache = PublicKeyCache::new();

    group.bench_function("individual verification", |b| {
        b.iter(|| {
            public_keys.iter().zip(&signatures).for_each(|(pk, sig)| {
                verify_signature(&cache, pk, message, &[], sig, true, true).unwrap()
            })
        })
    });

    group.bench_function("aggregate verification", |b| {
        b.iter(|| {
            verify_aggregated_signature(&cache, &public_keys, message, &[], &aggregate, true, true)
                .unwrap()
        })
    });

    // consecutive windows differ by one validator, as happens between epochs
    let rotating = [public_keys.clone(), public_keys.clone()].concat();
    let mut start = 0;
    group.bench_function("incremental aggregation", |b| {
        b.iter(|| {
            start = (start + 1) % NUM_VALIDATORS;
            cache
                .aggregate(&rotating[start..start + NUM_VALIDATORS - 1])
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, aggregate_verify);
criterion_main!(benches);
