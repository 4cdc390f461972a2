//! Error taxonomy for record encoding and oracle signing.

/// Errors raised while canonicalizing a payment-proof record into field
/// elements.
///
/// All of these are unrecoverable for the record that caused them; callers
/// must abort the verification of that record instead of producing a
/// partial commitment.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The bech32 decoding itself failed (bad charset, checksum, ...).
    #[error("malformed payment-proof address")]
    InvalidAddress(#[from] bech32::DecodeError),
    /// The address decoded fine but carries a prefix of another network.
    #[error("unsupported address network prefix: {0}")]
    UnsupportedNetwork(String),
    /// The address payload cannot be normalized to 32 bytes.
    #[error("address payload is {0} bytes, expected at most 32")]
    AddressTooLong(usize),
    /// A hex field did not parse as hex at all.
    #[error("{field} is not valid hex")]
    InvalidHex {
        field: &'static str,
        source: hex::FromHexError,
    },
    /// A hex field decodes to more bytes than its canonical width.
    #[error("{field} decodes to {len} bytes, exceeding the canonical width {width}")]
    InvalidHexLength {
        field: &'static str,
        len: usize,
        width: usize,
    },
    /// The amount is not a decimal unsigned 64-bit integer.
    #[error("amount is not an unsigned 64-bit decimal integer")]
    InvalidAmount(#[from] std::num::ParseIntError),
    /// A packed chunk does not fit into the field. Unreachable for the
    /// fixed chunk widths, but checked regardless.
    #[error("chunk value does not fit into the commitment field")]
    FieldOverflow,
    #[error(transparent)]
    Sponge(#[from] light_poseidon::PoseidonError),
}

/// Errors raised by the [`OracleSigner`](crate::OracleSigner) state machine.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// Signing or key access was attempted before the first key install.
    #[error("no oracle signing key has been installed")]
    NotInitialized,
    /// A key rotation was not authorized by the currently active key.
    #[error("key rotation requires authorization by the active key")]
    UnauthorizedRotation,
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
