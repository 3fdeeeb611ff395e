//! Key file load and first-run provisioning.
//!
//! # Lifecycle
//!
//! 1. At startup, [`load_into`] reads the base64 key file named by
//!    `KEY_FILE` and installs the imported key in the [`KeySlot`].
//! 2. If the file does not exist and `GENERATE_KEY_IF_MISSING` is set, a
//!    fresh key is generated, written with owner-only permissions, and
//!    installed. An existing file is never overwritten.
//! 3. The key lives in process memory only inside the slot.
//!
//! # Security invariants
//!
//! - Key material is **never** logged or included in traces; only the path is.
//! - A key file that fails to import is a hard error. Replacing it would
//!   make every previously sealed record unreadable.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use secret_box::{generate_key, KeySlot, SymmetricKey};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::config::Config;

/// Where the installed key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Read from an existing key file.
    Loaded,
    /// Generated on this start and written to the key file.
    Generated,
}

/// Load the key from `cfg.key_file` (or provision one) and install it in `slot`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not hold a valid
/// base64-encoded 32-byte key, is missing while generation is disabled, or
/// cannot be written after generation.
pub async fn load_into(cfg: &Config, slot: &KeySlot) -> Result<KeyOrigin> {
    let path = cfg.key_file.as_path();
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            let key = SymmetricKey::from_base64(&text)
                .with_context(|| format!("key file {} is not a valid key", path.display()))?;
            slot.install(key).await;
            info!(path = %path.display(), "key loaded");
            Ok(KeyOrigin::Loaded)
        }
        Err(e) if e.kind() == ErrorKind::NotFound && cfg.generate_key_if_missing => {
            let key = generate_key().context("cannot generate a key on this platform")?;
            write_new(path, &key).await?;
            slot.install(key).await;
            warn!(path = %path.display(), "no key file found; generated a new key");
            Ok(KeyOrigin::Generated)
        }
        Err(e) => {
            Err(e).with_context(|| format!("failed to read key file {}", path.display()))
        }
    }
}

/// Write `key` to `path`, which must not exist yet.
///
/// The key goes to a sibling temp file first and is hard-linked into place
/// only after it is fully synced, so `path` never holds a partial key and an
/// existing file is never overwritten. The temp file is removed on every path.
async fn write_new(path: &Path, key: &SymmetricKey) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    // Leftover from a run killed mid-write; it was never installed.
    remove_if_present(&tmp).await?;

    let result = async {
        write_synced(&tmp, key).await?;
        tokio::fs::hard_link(&tmp, path)
            .await
            .with_context(|| format!("failed to create key file {}", path.display()))
    }
    .await;

    remove_if_present(&tmp).await?;
    result
}

async fn write_synced(tmp: &Path, key: &SymmetricKey) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(tmp)
        .await
        .with_context(|| format!("failed to create {}", tmp.display()))?;
    let text = key.to_base64();
    file.write_all(text.as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.sync_all().await?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn remove_if_present(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}
