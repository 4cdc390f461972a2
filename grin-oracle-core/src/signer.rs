//! The oracle signing key and its lifecycle.
//!
//! The signer is a value-level state machine: `Uninitialized` until the
//! first key install, `Active` afterwards. Rotations produce a new signer
//! value instead of mutating in place, so a reader either sees the old key
//! or the new one, never a half-updated pair.

use eddsa_babyjubjub::{EdDSAPrivateKey, EdDSAPublicKey, EdDSASignature};

use crate::commitment::{sponge_hash, Commitment};
use crate::error::{EncodeError, SignerError};
use crate::BaseField;

/// The active oracle key pair.
#[derive(Debug)]
pub struct OracleKey {
    signing_key: EdDSAPrivateKey,
    public_key: EdDSAPublicKey,
}

/// Holds signing authority over oracle attestations.
#[derive(Debug)]
pub enum OracleSigner {
    Uninitialized,
    Active(OracleKey),
}

impl OracleSigner {
    /// Installs `signing_key` as the active key.
    ///
    /// The first install carries implicit authority (whoever deploys the
    /// oracle owns it). Every later install is a rotation and must present
    /// a signature by the currently active key over the new key's
    /// [rotation digest](Self::rotation_digest). There is no way back to
    /// `Uninitialized`; a rotated-out key simply stops being used.
    pub fn install(
        self,
        signing_key: EdDSAPrivateKey,
        authorization: Option<&EdDSASignature>,
    ) -> Result<Self, SignerError> {
        let public_key = signing_key.public();
        if let Self::Active(current) = &self {
            let digest = Self::rotation_digest(&public_key)?;
            let authorized = authorization
                .map(|signature| signature.verify(digest, current.public_key.pk))
                .unwrap_or(false);
            if !authorized {
                return Err(SignerError::UnauthorizedRotation);
            }
        }
        Ok(Self::Active(OracleKey {
            signing_key,
            public_key,
        }))
    }

    /// Signs the digest of `commitment` with the active key.
    pub fn sign(&self, commitment: &Commitment) -> Result<EdDSASignature, SignerError> {
        match self {
            Self::Uninitialized => Err(SignerError::NotInitialized),
            Self::Active(key) => Ok(key.signing_key.sign(commitment.digest()?)),
        }
    }

    /// The active public key, for distribution to the verifier.
    pub fn public_key(&self) -> Result<EdDSAPublicKey, SignerError> {
        match self {
            Self::Uninitialized => Err(SignerError::NotInitialized),
            Self::Active(key) => Ok(key.public_key),
        }
    }

    /// Authorizes rotating to `next` by signing its rotation digest with
    /// the active key.
    pub fn authorize_rotation(&self, next: &EdDSAPublicKey) -> Result<EdDSASignature, SignerError> {
        match self {
            Self::Uninitialized => Err(SignerError::NotInitialized),
            Self::Active(key) => Ok(key.signing_key.sign(Self::rotation_digest(next)?)),
        }
    }

    /// The field element a rotation authorization signs: the sponge hash of
    /// the new public key's affine coordinates.
    pub fn rotation_digest(public_key: &EdDSAPublicKey) -> Result<BaseField, EncodeError> {
        sponge_hash(&[public_key.pk.x, public_key.pk.y])
    }

    /// Checks `signature` over `commitment` against `public_key`.
    ///
    /// Pure and fail-closed: malformed signatures and undigestible
    /// commitments yield `false`, never a panic or an error.
    pub fn verify(
        public_key: &EdDSAPublicKey,
        commitment: &Commitment,
        signature: &EdDSASignature,
    ) -> bool {
        match commitment.digest() {
            Ok(digest) => signature.verify(digest, public_key.pk),
            Err(_) => false,
        }
    }
}
