//! Encrypted storage of short secrets such as user-supplied API keys.
//!
//! This crate is persistence-agnostic: it turns a secret string into an
//! opaque sealed record and back, given a caller-owned [`SymmetricKey`].
//! Calling code stores both the sealed record and the exported key.
//!
//! # Telemetry invariants
//!
//! - No plaintext, sealed record or key material appears in any log field
//!   or error message.
//!
//! ```
//! use secret_box::{decrypt, encrypt, generate_key};
//!
//! let key = generate_key()?;
//! let sealed = encrypt("sk-test-api-key-12345", &key)?;
//! assert_eq!(decrypt(&sealed, &key)?, "sk-test-api-key-12345");
//! # Ok::<(), secret_box::SecretError>(())
//! ```

pub mod cipher;
pub mod codec;
pub mod error;
pub mod key;
pub mod slot;

pub use cipher::{decrypt, encrypt, SealedRecord, NONCE_LEN, TAG_LEN};
pub use error::SecretError;
pub use key::{export_key, generate_key, import_key, SymmetricKey, KEY_LEN};
pub use slot::{KeySlot, SlotError};
