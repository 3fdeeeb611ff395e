//! AES-256-GCM sealing and opening of secret strings.
//!
//! **Nonce discipline:** every seal draws a fresh 96-bit nonce from the OS
//! CSPRNG. GCM nonce reuse under one key breaks both confidentiality and
//! authentication, so there is no API that accepts a caller-chosen nonce.
//!
//! # Sealed record format
//!
//! ```text
//! base64-std-padded( nonce[12] || ciphertext || tag[16] )
//! ```

use std::str::FromStr;

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, OsRng},
    Nonce,
};
use zeroize::Zeroizing;

use crate::codec;
use crate::error::SecretError;
use crate::key::SymmetricKey;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Smallest decoded record that can hold a nonce and a tag.
pub const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

/// A parsed sealed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedRecord {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl SealedRecord {
    /// Pack `nonce || ciphertext+tag` without the text encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split a packed record.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::MalformedInput`] if `bytes` is shorter than
    /// [`MIN_SEALED_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SecretError> {
        if bytes.len() < MIN_SEALED_LEN {
            return Err(SecretError::MalformedInput("sealed record too short"));
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode this record to its storable string.
    pub fn encode(&self) -> String {
        codec::encode_base64(&self.to_bytes())
    }

    /// Parse a storable string back into a [`SealedRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::MalformedInput`] if the string is not valid
    /// base64 or is too short to hold a nonce and a tag.
    pub fn parse(s: &str) -> Result<Self, SecretError> {
        Self::from_bytes(&codec::decode_base64(s)?)
    }
}

impl FromStr for SealedRecord {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SealedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Seal raw bytes under `key` with a fresh random nonce and no associated data.
///
/// # Errors
///
/// Returns [`SecretError::UnsupportedEnvironment`] if no secure random source
/// is available.
pub fn seal_bytes(plaintext: &[u8], key: &SymmetricKey) -> Result<SealedRecord, SecretError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|_| SecretError::UnsupportedEnvironment("secure random source unavailable"))?;

    // Encryption only fails for plaintexts beyond GCM's 64 GiB limit.
    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| SecretError::UnsupportedEnvironment("aead encryption failed"))?;

    Ok(SealedRecord { nonce, ciphertext })
}

/// Open a [`SealedRecord`] back to raw bytes.
///
/// # Errors
///
/// Returns [`SecretError::AuthenticationFailed`] if the tag does not verify
/// (wrong key, tampered nonce, ciphertext or tag).
pub fn open_bytes(
    record: &SealedRecord,
    key: &SymmetricKey,
) -> Result<Zeroizing<Vec<u8>>, SecretError> {
    if record.ciphertext.len() < TAG_LEN {
        return Err(SecretError::MalformedInput("sealed record too short"));
    }
    key.cipher()
        .decrypt(Nonce::from_slice(&record.nonce), record.ciphertext.as_slice())
        .map(Zeroizing::new)
        .map_err(|_| SecretError::AuthenticationFailed)
}

/// Encrypt a secret string into a storable sealed record.
///
/// Two calls with the same plaintext and key return different strings.
///
/// # Errors
///
/// Only [`SecretError::UnsupportedEnvironment`]; any valid UTF-8 input,
/// including the empty string, seals successfully.
pub fn encrypt(plaintext: &str, key: &SymmetricKey) -> Result<String, SecretError> {
    let bytes = Zeroizing::new(codec::utf8_encode(plaintext));
    Ok(seal_bytes(&bytes, key)?.encode())
}

/// Decrypt a sealed record string back to the original secret.
///
/// All-or-nothing: no partial plaintext is ever returned.
///
/// # Errors
///
/// - [`SecretError::MalformedInput`] if `sealed` is not valid base64, is too
///   short to hold a nonce and a tag, or decrypts to invalid UTF-8.
/// - [`SecretError::AuthenticationFailed`] if the tag does not verify.
pub fn decrypt(sealed: &str, key: &SymmetricKey) -> Result<String, SecretError> {
    let record = SealedRecord::parse(sealed)?;
    let mut plaintext = open_bytes(&record, key)?;
    codec::utf8_decode(std::mem::take(&mut *plaintext)).map_err(|e| {
        tracing::debug!(kind = e.kind(), "decrypted secret is not valid utf-8");
        e
    })
}
