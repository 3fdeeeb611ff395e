//! Request and response types exchanged with the sealing service.
//!
//! These types are serialised as JSON over the local HTTP API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Seal endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /seal`.
#[derive(Clone, Serialize, Deserialize)]
pub struct SealRequest {
    /// Secret to seal, e.g. a user-supplied API key.
    pub plaintext: String,
}

/// Successful response body for `POST /seal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealResponse {
    /// Base64 sealed record, ready for the external store.
    pub sealed: String,
}

// ---------------------------------------------------------------------------
// Open endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRequest {
    /// Sealed record previously returned by `POST /seal`.
    pub sealed: String,
}

/// Successful response body for `POST /open`.
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenResponse {
    /// The recovered secret.
    pub plaintext: String,
}

// Secrets never show up in debug output.
impl std::fmt::Debug for SealRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SealRequest { plaintext: [REDACTED] }")
    }
}

impl std::fmt::Debug for OpenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OpenResponse { plaintext: [REDACTED] }")
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"secret_unusable"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(e: &crate::ServiceError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the key is currently loaded.
    pub key_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seal_request_from_json() {
        let req: SealRequest =
            serde_json::from_value(json!({"plaintext": "sk-test-api-key-12345"})).unwrap();
        assert_eq!(req.plaintext, "sk-test-api-key-12345");
    }

    #[test]
    fn secrets_redacted_in_debug() {
        let req = SealRequest {
            plaintext: "sk-live-123".into(),
        };
        let resp = OpenResponse {
            plaintext: "sk-live-123".into(),
        };
        assert!(!format!("{req:?}").contains("sk-live"));
        assert!(!format!("{resp:?}").contains("sk-live"));
    }

    #[test]
    fn error_response_from_service_error() {
        let e = crate::ServiceError::SecretUnusable("wrong key".into());
        let body = ErrorResponse::from(&e);
        assert_eq!(body.code, "secret_unusable");
        assert!(body.message.contains("wrong key"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            key_ready: true,
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert!(decoded.key_ready);
    }
}
