//! Decoding of bech32-encoded Grin wallet addresses.

use crate::error::EncodeError;
use crate::packing::ADDRESS_WIDTH;

/// Human-readable prefix of mainnet addresses.
pub const MAINNET_HRP: &str = "grin";
/// Human-readable prefix of testnet addresses.
pub const TESTNET_HRP: &str = "tgrin";

/// Decodes a checksummed Grin address into its raw 32-byte payload.
///
/// Payloads shorter than 32 bytes are left-padded with zero bytes; this
/// normalization feeds the commitment encoding and must stay bit-exact.
pub fn decode_address(address: &str) -> Result<[u8; ADDRESS_WIDTH], EncodeError> {
    let (hrp, data) = bech32::decode(address)?;
    let hrp = hrp.to_string();
    if hrp != MAINNET_HRP && hrp != TESTNET_HRP {
        return Err(EncodeError::UnsupportedNetwork(hrp));
    }
    if data.len() > ADDRESS_WIDTH {
        return Err(EncodeError::AddressTooLong(data.len()));
    }
    let mut out = [0u8; ADDRESS_WIDTH];
    out[ADDRESS_WIDTH - data.len()..].copy_from_slice(&data);
    Ok(out)
}
