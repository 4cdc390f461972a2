//! EdDSA over the Baby JubJub curve.
//!
//! The message is a single element of the curve's base field (the BN254
//! scalar field), which keeps signatures verifiable by circuits operating
//! over the same field. The challenge is a Poseidon hash of
//! `(r.x, r.y, pk.x, pk.y, message)` and the nonce is derived
//! deterministically from the private key and the message.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{AdditiveGroup, BigInteger, PrimeField, UniformRand, Zero};
use light_poseidon::{Poseidon, PoseidonHasher};

pub type ScalarField = ark_ed_on_bn254::Fr;
pub type BaseField = ark_ed_on_bn254::Fq;
pub type Affine = ark_ed_on_bn254::EdwardsAffine;
pub type Projective = ark_ed_on_bn254::EdwardsProjective;

/// An EdDSA private key, a scalar of the Baby JubJub subgroup.
pub struct EdDSAPrivateKey {
    sk: ScalarField,
}

/// The public key matching an [`EdDSAPrivateKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdDSAPublicKey {
    pub pk: Affine,
}

/// A Schnorr-style signature `(r, s)` over one base-field element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdDSASignature {
    pub r: Affine,
    pub s: ScalarField,
}

impl EdDSAPrivateKey {
    /// Samples a fresh private key.
    pub fn random<R: rand::Rng + rand::CryptoRng>(rng: &mut R) -> Self {
        Self {
            sk: ScalarField::rand(rng),
        }
    }

    /// Builds a private key from 32 raw bytes (little-endian, reduced mod
    /// the subgroup order).
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            sk: ScalarField::from_le_bytes_mod_order(bytes),
        }
    }

    pub fn public(&self) -> EdDSAPublicKey {
        EdDSAPublicKey {
            pk: (Affine::generator() * self.sk).into_affine(),
        }
    }

    pub fn sign(&self, message: BaseField) -> EdDSASignature {
        let r = self.deterministic_nonce(message);
        let nonce_r = (Affine::generator() * r).into_affine();

        let pk = self.public().pk;
        let c = convert_base_to_scalar(challenge_hash(message, nonce_r, pk));
        // Clear the cofactor on the challenge term so that verification can
        // multiply the public key by 8 and stay in the prime-order subgroup.
        let c = c.double().double().double();
        EdDSASignature {
            r: nonce_r,
            s: r + c * self.sk,
        }
    }

    // We hash the private key and the message to produce the nonce r. The
    // 512-bit XOF output avoids bias in the modular reduction.
    fn deterministic_nonce(&self, message: BaseField) -> ScalarField {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.sk.into_bigint().to_bytes_le());
        hasher.update(&message.into_bigint().to_bytes_le());
        let mut xof = hasher.finalize_xof();
        let mut output = [0u8; 64];
        xof.fill(&mut output);
        ScalarField::from_le_bytes_mod_order(&output)
    }
}

impl std::fmt::Debug for EdDSAPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EdDSAPrivateKey(redacted)")
    }
}

impl EdDSASignature {
    /// Verifies the signature over `message` against `pk`.
    ///
    /// Fails closed: malformed points (off-curve, wrong subgroup, identity)
    /// return `false`, they never panic.
    pub fn verify(&self, message: BaseField, pk: Affine) -> bool {
        if [pk, self.r]
            .iter()
            .any(|p| !p.is_on_curve() || !p.is_in_correct_subgroup_assuming_on_curve())
        {
            return false;
        }
        if [pk, self.r].iter().any(|p| p.is_zero()) {
            return false;
        }

        let c = convert_base_to_scalar(challenge_hash(message, self.r, pk));
        let pk = pk.into_group().double().double().double();
        let lhs = Affine::generator() * self.s;
        let rhs = self.r + pk * c;
        lhs == rhs
    }
}

// This is just a modular reduction; applied to a uniform base-field element
// the bias is negligible since the base field is wider than the scalar
// field.
fn convert_base_to_scalar(f: BaseField) -> ScalarField {
    let bytes = f.into_bigint().to_bytes_le();
    ScalarField::from_le_bytes_mod_order(&bytes)
}

fn challenge_hash(message: BaseField, nonce_r: Affine, pk: Affine) -> BaseField {
    let mut sponge = Poseidon::<BaseField>::new_circom(5).expect("width-5 parameters exist");
    sponge
        .hash(&[nonce_r.x, nonce_r.y, pk.x, pk.y, message])
        .expect("input length matches the sponge arity")
}
