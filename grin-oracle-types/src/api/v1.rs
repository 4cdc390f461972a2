//! # v1 API types
//!
//! Request and response payloads of the oracle's verification endpoint.
//! The request body is the [`PaymentProofRecord`] itself, re-exported from
//! the core crate so the wire shape and the encoding input cannot drift
//! apart.

use eddsa_babyjubjub::EdDSASignature;
use serde::{Deserialize, Serialize};

pub use grin_oracle_core::PaymentProofRecord;

use crate::fields;

/// An oracle attestation signature in wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSignature {
    /// The signature's nonce point, `[x, y]` decimal strings.
    #[serde(serialize_with = "fields::serialize_affine")]
    #[serde(deserialize_with = "fields::deserialize_affine")]
    pub r: ark_ed_on_bn254::EdwardsAffine,
    /// The signature scalar, decimal string.
    #[serde(serialize_with = "fields::serialize_fr")]
    #[serde(deserialize_with = "fields::deserialize_fr")]
    pub s: ark_ed_on_bn254::Fr,
}

/// Response of `POST /api/v1/verify`.
///
/// `signature` is `null` exactly when `valid` is `false`; a refusal never
/// discloses why the oracle declined to sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub signature: Option<ResponseSignature>,
}

/// Response of `GET /api/v1/public-key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    /// The active oracle public key, `[x, y]` decimal strings.
    #[serde(serialize_with = "fields::serialize_affine")]
    #[serde(deserialize_with = "fields::deserialize_affine")]
    pub public_key: ark_ed_on_bn254::EdwardsAffine,
    /// The commitment encoding this deployment signs (`six-element` or
    /// `single-element`).
    pub encoding: String,
}

impl VerifyResponse {
    /// The response for a record the oracle attests.
    pub fn valid(signature: EdDSASignature) -> Self {
        Self {
            valid: true,
            signature: Some(signature.into()),
        }
    }

    /// The response for a record the oracle refuses to sign.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            signature: None,
        }
    }
}

impl From<EdDSASignature> for ResponseSignature {
    fn from(signature: EdDSASignature) -> Self {
        Self {
            r: signature.r,
            s: signature.s,
        }
    }
}

impl From<ResponseSignature> for EdDSASignature {
    fn from(signature: ResponseSignature) -> Self {
        Self {
            r: signature.r,
            s: signature.s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddsa_babyjubjub::{BaseField, EdDSAPrivateKey};
    use ark_ff::UniformRand;

    #[test]
    fn signature_json_roundtrip_preserves_verification() {
        let mut rng = rand::thread_rng();
        let sk = EdDSAPrivateKey::random(&mut rng);
        let message = BaseField::rand(&mut rng);
        let signature = sk.sign(message);

        let response = VerifyResponse::valid(signature);
        let json = serde_json::to_string(&response).unwrap();
        let decoded: VerifyResponse = serde_json::from_str(&json).unwrap();

        assert!(decoded.valid);
        let roundtripped: EdDSASignature = decoded.signature.unwrap().into();
        assert!(roundtripped.verify(message, sk.public().pk));
    }

    #[test]
    fn invalid_response_serializes_null_signature() {
        let json = serde_json::to_value(VerifyResponse::invalid()).unwrap();
        assert_eq!(json["valid"], false);
        assert!(json["signature"].is_null());
    }

    #[test]
    fn off_curve_points_are_rejected() {
        let json = r#"{"valid":true,"signature":{"r":["1","1"],"s":"1"}}"#;
        assert!(serde_json::from_str::<VerifyResponse>(json).is_err());
    }

    #[test]
    fn payment_proof_record_uses_wallet_field_names() {
        let record = PaymentProofRecord {
            amount: "1".into(),
            excess: "00".into(),
            recipient_address: "a".into(),
            recipient_sig: "00".into(),
            sender_address: "b".into(),
            sender_sig: "00".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        for key in [
            "amount",
            "excess",
            "recipient_address",
            "recipient_sig",
            "sender_address",
            "sender_sig",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {key}");
        }
    }
}
