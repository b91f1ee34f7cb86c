use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use npvdkgrs::{DistributedKeyGeneration, Npvdkgrs, PairingEngine, Participant, ThresholdParameters};

/// One round for a small roster (setup done once):
/// - building a single contribution is measured
/// - one participant's key calculation over all contributions is measured
pub fn bench_dkg(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xdead_beef);

    type BE = PairingEngine;

    let scheme = Npvdkgrs::<BE>::new();

    // Parameters
    let parties = 8usize;
    let threshold = 5usize;
    let params = ThresholdParameters::new(parties, threshold).expect("valid parameters");

    let members: Vec<_> = (0..parties)
        .map(|_| Participant::<BE>::generate(&mut rng, scheme.base()))
        .collect();
    let roster: Vec<_> = members.iter().map(|(p, _)| p.clone()).collect();

    c.bench_function("dkg_calculate_contribution", |b| {
        b.iter(|| {
            let contribution = scheme
                .calculate_contribution(&mut rng, &params, &roster[0], None, &roster)
                .expect("contribution failed");
            black_box(contribution);
        })
    });

    let contributions: Vec<_> = roster
        .iter()
        .map(|me| {
            scheme
                .calculate_contribution(&mut rng, &params, me, None, &roster)
                .expect("contribution failed")
        })
        .collect();

    let (me, sk) = &members[0];
    c.bench_function("dkg_calculate_my_key", |b| {
        b.iter(|| {
            let share = scheme
                .calculate_my_key(&contributions, &me.id, sk)
                .expect("calculate_my_key failed");
            black_box(share);
        })
    });
}

criterion_group!(benches, bench_dkg);
criterion_main!(benches);
