use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use npvdkgrs::{
    CurvePoint, FieldElement, Fr, G2, PairingEngine, Participant, Pvsh, VerifiableHandoff,
};

/// Encode, verify and decode of a single handoff, measured separately.
pub fn bench_pvsh(c: &mut Criterion) {
    // Deterministic RNG for repeatable benchmarks
    let mut rng = StdRng::seed_from_u64(0xdead_beef);

    type BE = PairingEngine;

    let pvsh = Pvsh::<BE>::new();
    let (recipient, sk) = Participant::<BE>::generate(&mut rng, &G2::generator());
    let sh = Fr::random(&mut rng);
    let ph = G2::generator().mul_scalar(&sh);

    c.bench_function("pvsh_encode", |b| {
        b.iter(|| {
            let ct = pvsh
                .encode(&mut rng, &recipient.id, &recipient.public_key, &sh)
                .expect("encode failed");
            black_box(ct);
        })
    });

    let ct = pvsh
        .encode(&mut rng, &recipient.id, &recipient.public_key, &sh)
        .expect("encode failed");

    c.bench_function("pvsh_verify", |b| {
        b.iter(|| {
            let ok = pvsh.verify(&recipient.id, &recipient.public_key, &ph, &ct);
            black_box(ok).expect("verify failed");
        })
    });

    c.bench_function("pvsh_decode", |b| {
        b.iter(|| {
            let decoded = pvsh
                .decode(&recipient.id, &recipient.public_key, &sk, &ct)
                .expect("decode failed");
            black_box(decoded);
        })
    });
}

criterion_group!(benches, bench_pvsh);
criterion_main!(benches);
