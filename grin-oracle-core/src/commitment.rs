//! Canonical commitment encoding of payment-proof records.
//!
//! Two wire-incompatible encodings exist in the deployed protocol and the
//! verifier's protocol version decides which one applies, so both are kept
//! behind [`EncodingStrategy`] instead of hard-coding either.

use std::fmt;
use std::str::FromStr;

use light_poseidon::{Poseidon, PoseidonHasher};
use serde::{Deserialize, Serialize};

use crate::address::decode_address;
use crate::error::EncodeError;
use crate::packing::{
    decode_hex, split_into_fields, ADDRESS_SPLIT, KERNEL_EXCESS_SPLIT, KERNEL_EXCESS_WIDTH,
    RECORD_SPLIT, RECORD_WIDTH, SIGNATURE_SPLIT, SIGNATURE_WIDTH,
};
use crate::BaseField;

/// A textual payment-proof record, exactly as exported by a Grin wallet.
///
/// Immutable once received; all encoding works on borrowed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProofRecord {
    /// Payment amount in nanogrin, as a decimal string.
    pub amount: String,
    /// Kernel excess commitment, hex, 33 bytes canonical.
    pub excess: String,
    /// Recipient wallet address, bech32.
    pub recipient_address: String,
    /// Recipient signature over the proof, hex, 64 bytes canonical.
    pub recipient_sig: String,
    /// Sender wallet address, bech32.
    pub sender_address: String,
    /// Sender signature over the proof, hex, 64 bytes canonical.
    pub sender_sig: String,
}

/// Selects the commitment encoding the deployed verifier expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingStrategy {
    /// One field element per proof sub-value; the verifier consumes all six.
    SixElement,
    /// The whole record packed and hashed into a single field element.
    SingleElement,
}

impl FromStr for EncodingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "six-element" => Ok(Self::SixElement),
            "single-element" => Ok(Self::SingleElement),
            other => Err(format!(
                "unknown encoding strategy \"{other}\", expected \"six-element\" or \"single-element\""
            )),
        }
    }
}

impl fmt::Display for EncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SixElement => f.write_str("six-element"),
            Self::SingleElement => f.write_str("single-element"),
        }
    }
}

/// The commitment of one payment-proof record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commitment {
    SixElement([BaseField; 6]),
    SingleElement(BaseField),
}

impl Commitment {
    /// The raw field elements, in record order.
    pub fn elements(&self) -> &[BaseField] {
        match self {
            Self::SixElement(elements) => elements,
            Self::SingleElement(element) => std::slice::from_ref(element),
        }
    }

    /// Compresses the commitment to the single field element the oracle
    /// signs.
    pub fn digest(&self) -> Result<BaseField, EncodeError> {
        match self {
            Self::SingleElement(element) => Ok(*element),
            Self::SixElement(elements) => sponge_hash(elements),
        }
    }
}

/// Canonicalizes and hashes `record` under the given strategy.
pub fn commit(
    record: &PaymentProofRecord,
    strategy: EncodingStrategy,
) -> Result<Commitment, EncodeError> {
    match strategy {
        EncodingStrategy::SixElement => Ok(Commitment::SixElement([
            amount_element(&record.amount)?,
            kernel_excess_element(&record.excess)?,
            address_element(&record.recipient_address)?,
            proof_signature_element("recipient_sig", &record.recipient_sig)?,
            address_element(&record.sender_address)?,
            proof_signature_element("sender_sig", &record.sender_sig)?,
        ])),
        EncodingStrategy::SingleElement => {
            let mut buf = Vec::with_capacity(RECORD_WIDTH);
            buf.extend_from_slice(&record.amount.parse::<u64>()?.to_be_bytes());
            buf.extend(decode_hex("excess", &record.excess, KERNEL_EXCESS_WIDTH)?);
            buf.extend(decode_address(&record.recipient_address)?);
            buf.extend(decode_hex(
                "recipient_sig",
                &record.recipient_sig,
                SIGNATURE_WIDTH,
            )?);
            buf.extend(decode_address(&record.sender_address)?);
            buf.extend(decode_hex("sender_sig", &record.sender_sig, SIGNATURE_WIDTH)?);
            let chunks = split_into_fields(&buf, &RECORD_SPLIT)?;
            Ok(Commitment::SingleElement(sponge_hash(&chunks)?))
        }
    }
}

pub(crate) fn sponge_hash(inputs: &[BaseField]) -> Result<BaseField, EncodeError> {
    let mut sponge = Poseidon::<BaseField>::new_circom(inputs.len())?;
    Ok(sponge.hash(inputs)?)
}

// The amount is small enough to be its own field element; it is the only
// sub-value that stays unhashed in the six-element encoding.
fn amount_element(amount: &str) -> Result<BaseField, EncodeError> {
    Ok(BaseField::from(amount.parse::<u64>()?))
}

fn kernel_excess_element(excess: &str) -> Result<BaseField, EncodeError> {
    let buf = decode_hex("excess", excess, KERNEL_EXCESS_WIDTH)?;
    sponge_hash(&split_into_fields(&buf, &KERNEL_EXCESS_SPLIT)?)
}

fn proof_signature_element(field: &'static str, signature: &str) -> Result<BaseField, EncodeError> {
    let buf = decode_hex(field, signature, SIGNATURE_WIDTH)?;
    sponge_hash(&split_into_fields(&buf, &SIGNATURE_SPLIT)?)
}

fn address_element(address: &str) -> Result<BaseField, EncodeError> {
    let raw = decode_address(address)?;
    sponge_hash(&split_into_fields(&raw, &ADDRESS_SPLIT)?)
}
