//! Error taxonomy for the secret-sealing core.

use thiserror::Error;

use crate::key::KEY_LEN;

/// Errors produced by key management, the codec, and the AEAD engine.
///
/// No variant ever carries plaintext, sealed record contents, or key bytes.
/// Callers branch on the variant:
/// - [`SecretError::UnsupportedEnvironment`] → disable secret storage entirely.
/// - [`SecretError::InvalidKeyMaterial`] → treat the stored key as lost.
/// - [`SecretError::MalformedInput`] → treat the record as corrupted storage.
/// - [`SecretError::AuthenticationFailed`] → "secret unusable", prompt for re-entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// The platform has no usable secure random source or cipher primitive.
    #[error("unsupported environment: {0}")]
    UnsupportedEnvironment(&'static str),

    /// Key material handed to `import_key` is not exactly [`KEY_LEN`] bytes.
    #[error("invalid key material: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyMaterial(usize),

    /// A sealed record is not valid base64, is too short, or is not UTF-8 after decryption.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),

    /// GCM tag verification failed: wrong key, or the record was tampered with.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl SecretError {
    /// Returns `true` for every kind except [`SecretError::UnsupportedEnvironment`].
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SecretError::UnsupportedEnvironment(_))
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SecretError::UnsupportedEnvironment(_) => "unsupported_environment",
            SecretError::InvalidKeyMaterial(_) => "invalid_key_material",
            SecretError::MalformedInput(_) => "malformed_input",
            SecretError::AuthenticationFailed => "authentication_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unsupported_environment_is_fatal() {
        assert!(!SecretError::UnsupportedEnvironment("no rng").is_recoverable());
        assert!(SecretError::InvalidKeyMaterial(3).is_recoverable());
        assert!(SecretError::MalformedInput("x").is_recoverable());
        assert!(SecretError::AuthenticationFailed.is_recoverable());
    }

    #[test]
    fn display_mentions_expected_key_length() {
        let e = SecretError::InvalidKeyMaterial(16);
        let msg = e.to_string();
        assert!(msg.contains("32"));
        assert!(msg.contains("16"));
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            SecretError::UnsupportedEnvironment("x").kind(),
            SecretError::InvalidKeyMaterial(0).kind(),
            SecretError::MalformedInput("x").kind(),
            SecretError::AuthenticationFailed.kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
