//! AES-256-GCM wire cipher of the v3 owner API.
//!
//! Every encrypted RPC call seals its JSON body under the session's shared
//! secret with a fresh 12-byte nonce; the 16-byte authentication tag is
//! appended to the ciphertext on the wire.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::Error;

/// Nonce size of the wire cipher, in bytes.
pub const NONCE_SIZE: usize = 12;
/// Authentication-tag size of the wire cipher, in bytes.
pub const TAG_SIZE: usize = 16;

/// Seals `plaintext`, returning `ciphertext ‖ tag`.
pub fn encrypt(
    secret: &[u8; 32],
    nonce: &[u8; NONCE_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, Error> {
    let cipher = Aes256Gcm::new_from_slice(secret).map_err(|_| Error::Encrypt)?;
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| Error::Encrypt)
}

/// Opens `sealed` (`ciphertext ‖ tag`), verifying the tag.
///
/// A tag mismatch may mean tampering, not a transient fault; callers must
/// abort the in-flight call instead of retrying.
pub fn decrypt(
    secret: &[u8; 32],
    nonce: &[u8; NONCE_SIZE],
    sealed: &[u8],
) -> Result<Vec<u8>, Error> {
    let cipher = Aes256Gcm::new_from_slice(secret).map_err(|_| Error::Decrypt)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| Error::Decrypt)
}
