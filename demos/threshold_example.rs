use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::fmt;

use npvdkgrs::{
    CalculatedShare, Contribution, DistributedKeyGeneration, Fr, G2, HashDomains, Npvdkgrs,
    PairingEngine, Participant, SecretScalar, ThresholdParameters, bls, point_to_hex,
};

const PARTIES: usize = 3;
const THRESHOLD: usize = 2;
const MESSAGE: &[u8] = b"NPVDKGRS threshold signature";

type BE = PairingEngine;

/// A participant with its long-term key and the share of the current round.
struct Member {
    participant: Participant<BE>,
    secret_key: SecretScalar<Fr>,
    share: Option<CalculatedShare<BE>>,
}

impl Member {
    fn generate(rng: &mut StdRng, scheme: &Npvdkgrs<BE>) -> Self {
        let (participant, secret_key) = Participant::generate(rng, scheme.base());
        Self {
            participant,
            secret_key,
            share: None,
        }
    }

    fn own_share(&self) -> Option<&SecretScalar<Fr>> {
        self.share.as_ref()?.own_secret_share.as_ref()
    }

    fn group_key(&self) -> Option<G2> {
        self.share.as_ref()?.group_public_key
    }
}

/// Runs a round: `contributors` build contributions for `receivers`, then
/// every receiver calculates its key.
fn run_round(
    scheme: &Npvdkgrs<BE>,
    rng: &mut StdRng,
    threshold: usize,
    contributors: &[&Member],
    receivers: &mut [Member],
) -> Result<(), Box<dyn std::error::Error>> {
    let roster: Vec<_> = receivers.iter().map(|m| m.participant.clone()).collect();
    let params = ThresholdParameters::new(roster.len(), threshold)?;

    let mut contributions: Vec<Contribution<BE>> = Vec::with_capacity(contributors.len());
    for member in contributors {
        contributions.push(scheme.calculate_contribution(
            rng,
            &params,
            &member.participant,
            member.own_share(),
            &roster,
        )?);
    }
    info!(count = contributions.len(), "contributions built");

    for member in receivers.iter_mut() {
        let share =
            scheme.calculate_my_key(&contributions, &member.participant.id, &member.secret_key)?;
        if !share.is_ok() {
            for err in &share.errors {
                info!(reason = %err.reason, "contribution rejected");
            }
        }
        member.share = Some(share);
    }
    Ok(())
}

/// Signs with a growing random subset of members and checks the recovered signature.
fn sign_with_subsets(
    rng: &mut StdRng,
    g2: &G2,
    members: &[Member],
    threshold: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let domains = HashDomains::default();
    let Some(pg) = members[0].group_key() else {
        return Err("no group key".into());
    };

    let mut order: Vec<&Member> = members.iter().collect();
    order.shuffle(rng);

    let mut partials = Vec::<bls::PartialSignature<BE>>::new();
    for member in order.into_iter().take(threshold) {
        let Some(sh) = member.own_share() else {
            return Err("member without share".into());
        };
        partials.push(bls::PartialSignature {
            signer_id: member.participant.id,
            signature: bls::sign::<BE>(sh, MESSAGE, &domains),
        });
        let signature = bls::recover_signature(&partials)?;
        info!(
            signers = partials.len(),
            threshold,
            verified = bls::verify::<BE>(&pg, MESSAGE, &signature, g2, &domains),
            "recovered signature"
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    let scheme = Npvdkgrs::<BE>::new();

    // t-of-n key generation
    info!(parties = PARTIES, threshold = THRESHOLD, "key generation");
    let mut members: Vec<Member> = (0..PARTIES).map(|_| Member::generate(&mut rng, &scheme)).collect();
    let snapshot: Vec<Member> = members.iter().map(clone_member).collect();
    let contributors: Vec<&Member> = snapshot.iter().collect();
    run_round(&scheme, &mut rng, THRESHOLD, &contributors, &mut members)?;
    sign_with_subsets(&mut rng, scheme.base(), &members, THRESHOLD)?;
    let pg = members[0].group_key().ok_or("no group key")?;

    // Resharing to an entirely new roster, (t+1)-of-(n+1); t old members suffice
    info!(
        parties = PARTIES + 1,
        threshold = THRESHOLD + 1,
        "resharing to new members"
    );
    let mut new_members: Vec<Member> =
        (0..PARTIES + 1).map(|_| Member::generate(&mut rng, &scheme)).collect();
    let mut old: Vec<&Member> = members.iter().collect();
    old.shuffle(&mut rng);
    run_round(&scheme, &mut rng, THRESHOLD + 1, &old[..THRESHOLD], &mut new_members)?;
    sign_with_subsets(&mut rng, scheme.base(), &new_members, THRESHOLD + 1)?;

    // Resharing to the old roster plus two new members, (t+2)-of-(n+2)
    info!(
        parties = PARTIES + 2,
        threshold = THRESHOLD + 2,
        "resharing to extended roster"
    );
    let mut extended: Vec<Member> = members.iter().map(clone_member).collect();
    extended.push(Member::generate(&mut rng, &scheme));
    extended.push(Member::generate(&mut rng, &scheme));
    let old: Vec<&Member> = members.iter().collect();
    run_round(&scheme, &mut rng, THRESHOLD + 2, &old, &mut extended)?;
    sign_with_subsets(&mut rng, scheme.base(), &extended, THRESHOLD + 2)?;

    for (label, key) in [
        ("original", Some(pg)),
        ("new roster", new_members[0].group_key()),
        ("extended roster", extended[0].group_key()),
    ] {
        info!(
            roster = label,
            pg = %key.map(|k| point_to_hex::<Fr, G2>(&k)).unwrap_or_default(),
            unchanged = (key == Some(pg)),
            "group public key"
        );
    }

    Ok(())
}

fn clone_member(member: &Member) -> Member {
    Member {
        participant: member.participant.clone(),
        secret_key: member.secret_key.clone(),
        share: member.share.as_ref().map(|share| CalculatedShare {
            own_secret_share: share.own_secret_share.clone(),
            own_public_share: share.own_public_share,
            public_shares: share.public_shares.clone(),
            group_public_key: share.group_public_key,
            errors: share.errors.clone(),
        }),
    }
}
