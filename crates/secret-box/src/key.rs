//! [`SymmetricKey`]: opaque handle over AES-256-GCM key material.
//!
//! # Lifecycle
//!
//! 1. A key is created by [`generate_key`] (fresh OS randomness) or
//!    [`import_key`] (previously exported raw bytes).
//! 2. The caller owns the handle. The engine only borrows it for a single
//!    `encrypt`/`decrypt` call and never caches or logs it.
//! 3. [`export_key`] is the only way to get the raw bytes back out, so the
//!    caller can persist them separately from any sealed record.
//! 4. When the handle (or any clone) is dropped its buffer is zeroed.

use aes_gcm::{
    aead::{rand_core::RngCore, KeyInit, OsRng},
    Aes256Gcm, Key,
};
use zeroize::Zeroizing;

use crate::codec;
use crate::error::SecretError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Opaque 256-bit AES-GCM key.
///
/// Cloning copies the key into a second buffer that is zeroed independently
/// on drop. There is deliberately no `Display`, `Serialize` or equality impl.
#[derive(Clone)]
pub struct SymmetricKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
}

impl SymmetricKey {
    fn from_array(bytes: Zeroizing<[u8; KEY_LEN]>) -> Self {
        Self { bytes }
    }

    /// Raw key bytes for external storage. Same as [`export_key`].
    pub fn export(&self) -> Zeroizing<[u8; KEY_LEN]> {
        Zeroizing::new(*self.bytes)
    }

    /// Exported key bytes as padded standard base64, e.g. for a key file.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(codec::encode_base64(&self.bytes[..]))
    }

    /// Import key material from its base64 text form.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::MalformedInput`] if `text` is not valid base64,
    /// or [`SecretError::InvalidKeyMaterial`] if it does not decode to
    /// exactly [`KEY_LEN`] bytes.
    pub fn from_base64(text: &str) -> Result<Self, SecretError> {
        let raw = Zeroizing::new(codec::decode_base64(text.trim())?);
        import_key(&raw)
    }

    /// Build the AEAD instance for one operation.
    pub(crate) fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.bytes[..]))
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Generate a fresh 256-bit key from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`SecretError::UnsupportedEnvironment`] if the platform has no
/// secure random source.
pub fn generate_key() -> Result<SymmetricKey, SecretError> {
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    OsRng
        .try_fill_bytes(&mut bytes[..])
        .map_err(|_| SecretError::UnsupportedEnvironment("secure random source unavailable"))?;
    Ok(SymmetricKey::from_array(bytes))
}

/// Export a key back to its raw 32 bytes.
pub fn export_key(key: &SymmetricKey) -> Zeroizing<[u8; KEY_LEN]> {
    key.export()
}

/// Import previously exported raw key bytes.
///
/// # Errors
///
/// Returns [`SecretError::InvalidKeyMaterial`] unless `raw` is exactly
/// [`KEY_LEN`] bytes.
pub fn import_key(raw: &[u8]) -> Result<SymmetricKey, SecretError> {
    if raw.len() != KEY_LEN {
        return Err(SecretError::InvalidKeyMaterial(raw.len()));
    }
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    bytes.copy_from_slice(raw);
    Ok(SymmetricKey::from_array(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_differ() {
        let a = generate_key().unwrap();
        let b = generate_key().unwrap();
        assert_ne!(*export_key(&a), *export_key(&b));
    }

    #[test]
    fn export_is_deterministic() {
        let key = generate_key().unwrap();
        assert_eq!(*export_key(&key), *export_key(&key));
        assert_eq!(export_key(&key).len(), KEY_LEN);
    }

    #[test]
    fn import_export_round_trip() {
        let raw = [0x42u8; KEY_LEN];
        let key = import_key(&raw).unwrap();
        assert_eq!(*export_key(&key), raw);
    }

    #[test]
    fn import_rejects_wrong_lengths() {
        for len in [0usize, 1, 16, 24, 31, 33, 64] {
            let raw = vec![0u8; len];
            assert_eq!(
                import_key(&raw).unwrap_err(),
                SecretError::InvalidKeyMaterial(len)
            );
        }
    }

    #[test]
    fn base64_form_round_trip() {
        let key = generate_key().unwrap();
        let text = key.to_base64();
        assert_eq!(text.len(), 44);
        assert!(text.ends_with('='));
        let back = SymmetricKey::from_base64(&text).unwrap();
        assert_eq!(*back.export(), *key.export());
    }

    #[test]
    fn base64_form_tolerates_trailing_newline() {
        let key = generate_key().unwrap();
        let line = format!("{}\n", key.to_base64().as_str());
        assert!(SymmetricKey::from_base64(&line).is_ok());
    }

    #[test]
    fn base64_form_rejects_garbage_and_short_keys() {
        assert!(matches!(
            SymmetricKey::from_base64("%%%"),
            Err(SecretError::MalformedInput(_))
        ));
        assert_eq!(
            SymmetricKey::from_base64("AAEC").unwrap_err(),
            SecretError::InvalidKeyMaterial(3)
        );
    }

    #[test]
    fn debug_is_redacted() {
        let key = import_key(&[0xAB; KEY_LEN]).unwrap();
        let s = format!("{key:?}");
        assert!(s.contains("REDACTED"));
        assert!(!s.contains("171"));
    }
}
