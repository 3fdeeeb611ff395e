//! Common error types shared across crates.

use secret_box::{SecretError, SlotError};
use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::SecretUnusable`] → 422
/// - [`ServiceError::Unavailable`] → 503
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request or the sealed record in it is malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The sealed record failed authentication under the current key.
    ///
    /// Callers must prompt the user to re-enter the secret; retrying is pointless.
    #[error("secret unusable: {0}")]
    SecretUnusable(String),

    /// The key is not yet loaded.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::SecretUnusable(_) => 422,
            ServiceError::Unavailable(_) => 503,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "malformed_input",
            ServiceError::SecretUnusable(_) => "secret_unusable",
            ServiceError::Unavailable(_) => "service_unavailable",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<SecretError> for ServiceError {
    fn from(e: SecretError) -> Self {
        match e {
            SecretError::MalformedInput(_) => ServiceError::BadRequest(e.to_string()),
            SecretError::AuthenticationFailed => {
                ServiceError::SecretUnusable("sealed record does not open with the current key".into())
            }
            SecretError::InvalidKeyMaterial(_) | SecretError::UnsupportedEnvironment(_) => {
                ServiceError::Internal(e.to_string())
            }
        }
    }
}

impl From<SlotError> for ServiceError {
    fn from(e: SlotError) -> Self {
        match e {
            SlotError::Empty => ServiceError::Unavailable("key not yet loaded".into()),
            SlotError::Secret(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::SecretUnusable("x".into()).http_status(), 422);
        assert_eq!(ServiceError::Unavailable("x".into()).http_status(), 503);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("missing plaintext".into());
        assert!(e.to_string().contains("missing plaintext"));
    }

    #[test]
    fn secret_errors_map_to_distinct_codes() {
        let malformed: ServiceError = SecretError::MalformedInput("invalid base64").into();
        let auth: ServiceError = SecretError::AuthenticationFailed.into();
        let env: ServiceError = SecretError::UnsupportedEnvironment("no rng").into();
        let key: ServiceError = SecretError::InvalidKeyMaterial(3).into();
        assert_eq!(malformed.code(), "malformed_input");
        assert_eq!(auth.code(), "secret_unusable");
        assert_eq!(env.http_status(), 500);
        assert_eq!(key.http_status(), 500);
    }

    #[test]
    fn empty_slot_is_unavailable() {
        let e: ServiceError = SlotError::Empty.into();
        assert_eq!(e.http_status(), 503);
        let e: ServiceError = SlotError::Secret(SecretError::AuthenticationFailed).into();
        assert_eq!(e.http_status(), 422);
    }
}
