//! Fixed-width byte packing into field elements.
//!
//! Every proof sub-value is first normalized to its canonical byte width
//! (left-padded with zero bytes), then split into chunks small enough to
//! fit losslessly into the commitment field. Chunks are interpreted as
//! big-endian unsigned integers. The split plans below are part of the
//! wire protocol; changing any of them changes every commitment.

use ark_ff::PrimeField;
use num_bigint::BigUint;

use crate::error::EncodeError;
use crate::BaseField;

/// Canonical width of the amount, in bytes.
pub const AMOUNT_WIDTH: usize = 8;
/// Canonical width of a kernel excess commitment, in bytes.
pub const KERNEL_EXCESS_WIDTH: usize = 33;
/// Canonical width of a decoded wallet address, in bytes.
pub const ADDRESS_WIDTH: usize = 32;
/// Canonical width of a payment-proof signature, in bytes.
pub const SIGNATURE_WIDTH: usize = 64;

pub(crate) const KERNEL_EXCESS_SPLIT: [usize; 2] = [16, 17];
pub(crate) const SIGNATURE_SPLIT: [usize; 3] = [21, 21, 22];
pub(crate) const ADDRESS_SPLIT: [usize; 2] = [16, 16];

/// Total width of the concatenated record in the single-element strategy.
pub(crate) const RECORD_WIDTH: usize =
    AMOUNT_WIDTH + KERNEL_EXCESS_WIDTH + 2 * ADDRESS_WIDTH + 2 * SIGNATURE_WIDTH;
pub(crate) const RECORD_SPLIT: [usize; 8] = [31, 31, 31, 31, 31, 31, 31, 16];

/// Left-pads `bytes` with zero bytes to exactly `width`.
pub fn left_pad(field: &'static str, bytes: &[u8], width: usize) -> Result<Vec<u8>, EncodeError> {
    if bytes.len() > width {
        return Err(EncodeError::InvalidHexLength {
            field,
            len: bytes.len(),
            width,
        });
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

/// Hex-decodes a record field and normalizes it to its canonical width.
pub fn decode_hex(
    field: &'static str,
    hex_str: &str,
    width: usize,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = hex::decode(hex_str).map_err(|source| EncodeError::InvalidHex { field, source })?;
    left_pad(field, &bytes, width)
}

/// Converts one chunk into a field element, treating it as a big-endian
/// unsigned integer.
///
/// The split plans guarantee chunks below the modulus, but the check stays:
/// a silent wrap-around would produce a commitment that verifies against
/// nothing.
pub fn bytes_to_field(chunk: &[u8]) -> Result<BaseField, EncodeError> {
    let value = BigUint::from_bytes_be(chunk);
    let modulus: BigUint = BaseField::MODULUS.into();
    if value >= modulus {
        return Err(EncodeError::FieldOverflow);
    }
    Ok(BaseField::from_be_bytes_mod_order(chunk))
}

/// Splits `buf` according to `plan` and converts each chunk.
pub fn split_into_fields(buf: &[u8], plan: &[usize]) -> Result<Vec<BaseField>, EncodeError> {
    debug_assert_eq!(plan.iter().sum::<usize>(), buf.len());
    let mut fields = Vec::with_capacity(plan.len());
    let mut offset = 0;
    for len in plan {
        fields.push(bytes_to_field(&buf[offset..offset + len])?);
        offset += len;
    }
    Ok(fields)
}
