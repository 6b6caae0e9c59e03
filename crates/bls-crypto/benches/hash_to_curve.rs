use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use bls_crypto::{
    hash_to_curve::{
        try_and_increment::{COMPOSITE_HASH_TO_G1, DIRECT_HASH_TO_G1},
        try_and_increment_cip22::COMPOSITE_HASH_TO_G1_CIP22,
    },
    test_helpers::seeded_rng,
    HashToCurve, PrivateKey, SIG_DOMAIN,
};

fn hash_to_g1(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_to_g1");
    group.sample_size(10);
    let rng = &mut seeded_rng();
    let message: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    let extra_data: Vec<u8> = (0..7).map(|_| rng.gen()).collect();

    // force the lazily evaluated CRH parameters outside of the measurement
    let _ = COMPOSITE_HASH_TO_G1.hash(SIG_DOMAIN, &message, &extra_data);

    group.bench_function("direct", |b| {
        b.iter(|| DIRECT_HASH_TO_G1.hash(SIG_DOMAIN, &message, &extra_data).unwrap())
    });
    group.bench_function("composite", |b| {
        b.iter(|| {
            COMPOSITE_HASH_TO_G1
                .hash(SIG_DOMAIN, &message, &extra_data)
                .unwrap()
        })
    });
    group.bench_function("composite cip22", |b| {
        b.iter(|| {
            COMPOSITE_HASH_TO_G1_CIP22
                .hash(SIG_DOMAIN, &message, &extra_data)
                .unwrap()
        })
    });
    group.finish();
}

fn sign_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls");
    group.sample_size(10);
    let rng = &mut seeded_rng();
    let message: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    let hasher = &*DIRECT_HASH_TO_G1;
    let sk = PrivateKey::generate(rng);
    let pk = sk.to_public();
    let sig = sk.sign(&message, &[], hasher).unwrap();

    group.bench_function("sign", |b| b.iter(|| sk.sign(&message, &[], hasher).unwrap()));
    group.bench_function("verify", |b| {
        b.iter(|| pk.verify(&message, &[], &sig, hasher).unwrap())
    });
    group.finish();
}

criterion_group!(benches, hash_to_g1, sign_and_verify);
criterion_main!(benches);
