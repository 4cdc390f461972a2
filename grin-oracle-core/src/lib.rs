//! Commitment encoding and signing for Grin payment proofs.
//!
//! This crate contains the pure, synchronous half of the oracle: decoding
//! the textual fields of a payment-proof record, packing them into
//! elements of the Baby JubJub base field, hashing them into a commitment
//! and signing that commitment with the active oracle key. Everything here
//! is deterministic; the same record always produces the same commitment.

pub mod address;
pub mod commitment;
pub mod error;
pub mod packing;
pub mod signer;

pub use commitment::{commit, Commitment, EncodingStrategy, PaymentProofRecord};
pub use error::{EncodeError, SignerError};
pub use signer::{OracleKey, OracleSigner};

/// The field commitments live in: the Baby JubJub base field, i.e. the
/// BN254 scalar field.
pub type BaseField = ark_ed_on_bn254::Fq;
