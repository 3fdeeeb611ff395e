//! Common types, protocol definitions, and errors shared across `vocab-secrets` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
