use std::marker::PhantomData;

use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument, trace};
use zeroize::Zeroize;

use crate::{
    BackendError, Ciphertext, CurvePoint, FailureReason, FieldElement, HashDomains, PairingBackend,
    SecretScalar, TargetGroup, VerifiableHandoff, errors::Error, hash_to_scalar, point_to_hex,
    scalar_to_hex,
};

/// The PVSH engine.
///
/// Holds the public base point `g2` and the hash domains. Every participant
/// of a round must use the same values.
#[derive(Debug)]
pub struct Pvsh<B: PairingBackend> {
    _phantom: PhantomData<B>,
    g2: B::G2,
    domains: HashDomains,
}

impl<B: PairingBackend> Pvsh<B> {
    /// Creates an engine over the standard G2 generator with the default domains.
    pub fn new() -> Self {
        Self::with_base(B::G2::generator(), HashDomains::default())
    }

    /// Creates an engine over a custom base point and hash domains.
    pub fn with_base(g2: B::G2, domains: HashDomains) -> Self {
        Self {
            _phantom: PhantomData,
            g2,
            domains,
        }
    }

    pub fn base(&self) -> &B::G2 {
        &self.g2
    }

    pub fn domains(&self) -> &HashDomains {
        &self.domains
    }

    /// `Q = H1(id || PK)`, binds a ciphertext to its recipient.
    fn recipient_point(&self, id: &B::Scalar, public_key: &B::G2) -> B::G1 {
        let mut msg = id.to_repr().as_ref().to_vec();
        msg.extend_from_slice(public_key.to_repr().as_ref());
        B::G1::hash_to_curve(&msg, &self.domains.q_point)
    }

    /// `H = H1("Q.c.U")` over the hex encodings.
    fn proof_point(&self, q: &B::G1, ciphertext_c: &str, ciphertext_u: &str) -> B::G1 {
        let msg = format!(
            "{}.{}.{}",
            point_to_hex::<B::Scalar, B::G1>(q),
            ciphertext_c,
            ciphertext_u
        );
        B::G1::hash_to_curve(msg.as_bytes(), &self.domains.proof_point)
    }

    /// One-time pad derived from the pairing value.
    fn mask(&self, e: &B::Target) -> Result<SecretScalar<B::Scalar>, BackendError> {
        let mut bytes = e.to_repr()?;
        let eh = hash_to_scalar(&self.domains.mask_scalar, bytes.as_ref());
        bytes.as_mut().zeroize();
        Ok(SecretScalar::new(eh))
    }
}

impl<B: PairingBackend> Default for Pvsh<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PairingBackend> Clone for Pvsh<B> {
    fn clone(&self) -> Self {
        Self::with_base(self.g2, self.domains.clone())
    }
}

impl<B: PairingBackend> VerifiableHandoff<B> for Pvsh<B> {
    #[instrument(level = "trace", skip_all, fields(recipient = %scalar_to_hex(id)))]
    fn encode<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        id: &B::Scalar,
        public_key: &B::G2,
        share: &B::Scalar,
    ) -> Result<Ciphertext<B>, Error> {
        let (r, r_inv) = loop {
            let r = SecretScalar::<B::Scalar>::random(rng);
            if let Some(inv) = r.expose().invert() {
                break (r, SecretScalar::new(inv));
            }
        };

        let q = self.recipient_point(id, public_key);
        let eh = self.mask(&B::pairing(&q, &public_key.mul_scalar(r.expose())))?;
        let c = *share + *eh.expose();
        let u = self.g2.mul_scalar(r.expose());

        let h = self.proof_point(
            &q,
            &scalar_to_hex(&c),
            &point_to_hex::<B::Scalar, B::G2>(&u),
        );
        let exponent = SecretScalar::new(*eh.expose() * *r_inv.expose());
        let v = h.mul_scalar(exponent.expose());

        Ok(Ciphertext { c, u, v })
    }

    #[instrument(level = "trace", skip_all, fields(recipient = %scalar_to_hex(id)))]
    fn verify(
        &self,
        id: &B::Scalar,
        public_key: &B::G2,
        public_share: &B::G2,
        ciphertext: &Ciphertext<B>,
    ) -> Result<(), FailureReason> {
        let q = self.recipient_point(id, public_key);
        let h = self.proof_point(&q, &ciphertext.c_hex(), &ciphertext.u_hex());

        let lhs = B::pairing(&h, &self.g2.mul_scalar(&ciphertext.c));
        let rhs = B::multi_pairing(&[h, ciphertext.v], &[*public_share, ciphertext.u])
            .map_err(|_| FailureReason::InconsistentCiphertext)?;

        if lhs == rhs {
            trace!("ciphertext verified");
            Ok(())
        } else {
            debug!("ciphertext failed the pairing check");
            Err(FailureReason::InconsistentCiphertext)
        }
    }

    #[instrument(level = "trace", skip_all, fields(recipient = %scalar_to_hex(id)))]
    fn decode(
        &self,
        id: &B::Scalar,
        public_key: &B::G2,
        secret_key: &SecretScalar<B::Scalar>,
        ciphertext: &Ciphertext<B>,
    ) -> Result<SecretScalar<B::Scalar>, Error> {
        let q = self.recipient_point(id, public_key);
        let eh = self.mask(&B::pairing(&q.mul_scalar(secret_key.expose()), &ciphertext.u))?;
        Ok(SecretScalar::new(ciphertext.c - *eh.expose()))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{Fr, G1, G2, PairingEngine};

    struct Recipient {
        id: Fr,
        sk: SecretScalar<Fr>,
        pk: G2,
    }

    fn recipient(rng: &mut StdRng) -> Recipient {
        let sk = SecretScalar::random(rng);
        Recipient {
            id: Fr::random(rng),
            pk: G2::generator().mul_scalar(sk.expose()),
            sk,
        }
    }

    #[test]
    fn decode_recovers_encoded_share() {
        let mut rng = StdRng::seed_from_u64(41);
        let pvsh = Pvsh::<PairingEngine>::new();
        for _ in 0..3 {
            let to = recipient(&mut rng);
            let sh = Fr::random(&mut rng);
            let ct = pvsh.encode(&mut rng, &to.id, &to.pk, &sh).unwrap();
            assert_eq!(*pvsh.decode(&to.id, &to.pk, &to.sk, &ct).unwrap().expose(), sh);
        }
    }

    #[test]
    fn honest_ciphertext_verifies() {
        let mut rng = StdRng::seed_from_u64(42);
        let pvsh = Pvsh::<PairingEngine>::new();
        let to = recipient(&mut rng);
        let sh = Fr::random(&mut rng);
        let ph = G2::generator().mul_scalar(&sh);
        let ct = pvsh.encode(&mut rng, &to.id, &to.pk, &sh).unwrap();
        assert_eq!(pvsh.verify(&to.id, &to.pk, &ph, &ct), Ok(()));

        // the wire form verifies as well
        let parsed: Ciphertext<PairingEngine> = ct.to_string().parse().unwrap();
        assert_eq!(pvsh.verify(&to.id, &to.pk, &ph, &parsed), Ok(()));
    }

    #[test]
    fn encoding_is_randomized() {
        let mut rng = StdRng::seed_from_u64(43);
        let pvsh = Pvsh::<PairingEngine>::new();
        let to = recipient(&mut rng);
        let sh = Fr::random(&mut rng);
        let a = pvsh.encode(&mut rng, &to.id, &to.pk, &sh).unwrap();
        let b = pvsh.encode(&mut rng, &to.id, &to.pk, &sh).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tampering_any_field_fails_verification() {
        let mut rng = StdRng::seed_from_u64(44);
        let pvsh = Pvsh::<PairingEngine>::new();
        let to = recipient(&mut rng);
        let sh = Fr::random(&mut rng);
        let ph = G2::generator().mul_scalar(&sh);
        let ct = pvsh.encode(&mut rng, &to.id, &to.pk, &sh).unwrap();

        let mut bad_c = ct.clone();
        bad_c.c += Fr::one();
        let mut bad_u = ct.clone();
        bad_u.u = bad_u.u.add(&G2::generator());
        let mut bad_v = ct.clone();
        bad_v.v = bad_v.v.add(&G1::generator());

        for bad in [bad_c, bad_u, bad_v] {
            assert_eq!(
                pvsh.verify(&to.id, &to.pk, &ph, &bad),
                Err(FailureReason::InconsistentCiphertext)
            );
        }
    }

    #[test]
    fn wrong_public_share_or_recipient_fails() {
        let mut rng = StdRng::seed_from_u64(45);
        let pvsh = Pvsh::<PairingEngine>::new();
        let to = recipient(&mut rng);
        let other = recipient(&mut rng);
        let sh = Fr::random(&mut rng);
        let ph = G2::generator().mul_scalar(&sh);
        let ct = pvsh.encode(&mut rng, &to.id, &to.pk, &sh).unwrap();

        let wrong_ph = ph.add(&G2::generator());
        assert!(pvsh.verify(&to.id, &to.pk, &wrong_ph, &ct).is_err());
        assert!(pvsh.verify(&other.id, &other.pk, &ph, &ct).is_err());

        // a different key decodes to garbage
        assert_ne!(*pvsh.decode(&to.id, &to.pk, &other.sk, &ct).unwrap().expose(), sh);
    }

    #[test]
    fn domains_must_match() {
        let mut rng = StdRng::seed_from_u64(46);
        let pvsh = Pvsh::<PairingEngine>::new();
        let mut domains = HashDomains::default();
        domains.mask_scalar = b"another-mask".to_vec();
        let other = Pvsh::<PairingEngine>::with_base(G2::generator(), domains);

        let to = recipient(&mut rng);
        let sh = Fr::random(&mut rng);
        let ct = pvsh.encode(&mut rng, &to.id, &to.pk, &sh).unwrap();
        assert_ne!(*other.decode(&to.id, &to.pk, &to.sk, &ct).unwrap().expose(), sh);
    }

    #[test]
    fn custom_base_point_roundtrip() {
        let mut rng = StdRng::seed_from_u64(47);
        let g2 = G2::generator().mul_scalar(&Fr::random(&mut rng));
        let pvsh = Pvsh::<PairingEngine>::with_base(g2, HashDomains::default());
        assert_eq!(*pvsh.base(), g2);

        let sk = SecretScalar::<Fr>::random(&mut rng);
        let id = Fr::random(&mut rng);
        let pk = g2.mul_scalar(sk.expose());
        let sh = Fr::random(&mut rng);
        let ct = pvsh.encode(&mut rng, &id, &pk, &sh).unwrap();
        assert!(pvsh.verify(&id, &pk, &g2.mul_scalar(&sh), &ct).is_ok());
        assert_eq!(*pvsh.decode(&id, &pk, &sk, &ct).unwrap().expose(), sh);
    }
}
