use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::fmt;

use npvdkgrs::{
    CurvePoint, FieldElement, Fr, G2, PairingEngine, Participant, Pvsh, SecretScalar,
    VerifiableHandoff, point_to_hex,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_ansi(false)
        .init();

    let mut rng = StdRng::from_entropy();

    let pvsh = Pvsh::<PairingEngine>::new();
    let g2 = *pvsh.base();

    // Recipient key pair and the secret to hand off
    let (recipient, sk) = Participant::<PairingEngine>::generate(&mut rng, &g2);
    let sh = SecretScalar::<Fr>::random(&mut rng);
    let ph = g2.mul_scalar(sh.expose());

    info!(
        pk = %point_to_hex::<Fr, G2>(&recipient.public_key),
        ph = %point_to_hex::<Fr, G2>(&ph),
        "recipient and public share"
    );

    // Encrypt, verify publicly, decrypt
    let esh = pvsh.encode(&mut rng, &recipient.id, &recipient.public_key, sh.expose())?;
    let verification = pvsh.verify(&recipient.id, &recipient.public_key, &ph, &esh);
    let decoded = pvsh.decode(&recipient.id, &recipient.public_key, &sk, &esh)?;

    info!(esh = %esh, "ciphertext");
    info!(
        verified = verification.is_ok(),
        decoded_matches = (decoded == sh),
        "handoff finished"
    );

    // A ciphertext checked against the wrong public share is rejected
    let wrong = ph.add(&g2.mul_scalar(&Fr::one()));
    if let Err(reason) = pvsh.verify(&recipient.id, &recipient.public_key, &wrong, &esh) {
        info!(%reason, "wrong public share rejected");
    }

    Ok(())
}
