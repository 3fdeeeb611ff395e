//! [`KeySlot`]: caller-owned, thread-safe holder for the process key.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::cipher;
use crate::error::SecretError;
use crate::key::SymmetricKey;

/// Errors produced by the key slot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// No key has been installed yet (or it was cleared).
    #[error("key slot is empty")]
    Empty,

    /// The sealing core rejected the operation.
    #[error(transparent)]
    Secret(#[from] SecretError),
}

/// Holds at most one [`SymmetricKey`] for the lifetime of a caller.
///
/// Wraps an `Arc<RwLock<Option<SymmetricKey>>>` so that:
/// - Many concurrent readers (request handlers) can seal and open at once.
/// - A single writer can install or clear the key without tearing.
///
/// A slot is an ordinary value, not a global. Clones share the same key.
#[derive(Clone, Debug, Default)]
pub struct KeySlot {
    inner: Arc<RwLock<Option<SymmetricKey>>>,
}

impl KeySlot {
    /// Create a new, empty [`KeySlot`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot already holding `key`.
    pub fn with_key(key: SymmetricKey) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(key))),
        }
    }

    /// Returns `true` if a key is currently installed.
    pub async fn is_ready(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Install (or replace) the key.
    pub async fn install(&self, key: SymmetricKey) {
        let mut lock = self.inner.write().await;
        *lock = Some(key);
        tracing::debug!("key installed");
    }

    /// Drop the installed key. Its buffer is zeroed on drop.
    pub async fn clear(&self) {
        self.inner.write().await.take();
    }

    /// Borrow a clone of the current key.
    ///
    /// The clone is a short-lived copy; callers should use and drop it promptly.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Empty`] if no key is installed.
    pub async fn current(&self) -> Result<SymmetricKey, SlotError> {
        let lock = self.inner.read().await;
        lock.as_ref().cloned().ok_or(SlotError::Empty)
    }

    /// Seal `plaintext` under the installed key.
    pub async fn seal(&self, plaintext: &str) -> Result<String, SlotError> {
        let lock = self.inner.read().await;
        let key = lock.as_ref().ok_or(SlotError::Empty)?;
        Ok(cipher::encrypt(plaintext, key)?)
    }

    /// Open a sealed record under the installed key.
    pub async fn open(&self, sealed: &str) -> Result<String, SlotError> {
        let lock = self.inner.read().await;
        let key = lock.as_ref().ok_or(SlotError::Empty)?;
        Ok(cipher::decrypt(sealed, key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{export_key, generate_key};

    #[tokio::test]
    async fn initially_not_ready() {
        let slot = KeySlot::new();
        assert!(!slot.is_ready().await);
        assert_eq!(slot.current().await.unwrap_err(), SlotError::Empty);
        assert_eq!(slot.seal("x").await.unwrap_err(), SlotError::Empty);
        assert_eq!(slot.open("x").await.unwrap_err(), SlotError::Empty);
    }

    #[tokio::test]
    async fn install_and_retrieve() {
        let slot = KeySlot::new();
        let key = generate_key().unwrap();
        slot.install(key.clone()).await;
        assert!(slot.is_ready().await);
        let current = slot.current().await.unwrap();
        assert_eq!(*export_key(&current), *export_key(&key));
    }

    #[tokio::test]
    async fn install_replaces_key() {
        let slot = KeySlot::with_key(generate_key().unwrap());
        let sealed = slot.seal("old").await.unwrap();
        slot.install(generate_key().unwrap()).await;
        assert_eq!(
            slot.open(&sealed).await.unwrap_err(),
            SlotError::Secret(SecretError::AuthenticationFailed)
        );
    }

    #[tokio::test]
    async fn clear_empties_slot() {
        let slot = KeySlot::with_key(generate_key().unwrap());
        slot.clear().await;
        assert!(!slot.is_ready().await);
    }

    #[tokio::test]
    async fn clones_share_the_key() {
        let slot = KeySlot::new();
        let other = slot.clone();
        slot.install(generate_key().unwrap()).await;
        let sealed = other.seal("shared").await.unwrap();
        assert_eq!(slot.open(&sealed).await.unwrap(), "shared");
    }

    #[tokio::test]
    async fn concurrent_seal_and_open() {
        let slot = KeySlot::with_key(generate_key().unwrap());
        let mut handles = Vec::new();
        for i in 0..16 {
            let slot = slot.clone();
            handles.push(tokio::spawn(async move {
                let plaintext = format!("secret-{i}");
                let sealed = slot.seal(&plaintext).await.unwrap();
                assert_eq!(slot.open(&sealed).await.unwrap(), plaintext);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
    }

    #[tokio::test]
    async fn core_errors_pass_through() {
        let slot = KeySlot::with_key(generate_key().unwrap());
        assert!(matches!(
            slot.open("not-base64!!!").await,
            Err(SlotError::Secret(SecretError::MalformedInput(_)))
        ));
    }
}
