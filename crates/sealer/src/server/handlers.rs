//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    ErrorResponse, HealthResponse, OpenRequest, OpenResponse, SealRequest, SealResponse,
};
use common::ServiceError;
use tracing::{debug, info, warn};

use super::state::AppState;

/// `POST /seal` — seal a secret under the process key.
///
/// Returns the base64 sealed record; the caller persists it.
pub async fn seal(
    State(state): State<AppState>,
    body: Result<Json<SealRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(&rejection, SEAL_BODY_SHAPE),
    };
    match state.key_slot.seal(&req.plaintext).await {
        Ok(sealed) => (StatusCode::OK, Json(SealResponse { sealed })).into_response(),
        Err(e) => {
            let err = ServiceError::from(e);
            warn!(code = err.code(), "seal failed");
            error_response(&err)
        }
    }
}

/// `POST /open` — recover a secret from a sealed record.
///
/// `422 secret_unusable` means the record does not authenticate under the
/// current key; the user must re-enter the secret.
pub async fn open(
    State(state): State<AppState>,
    body: Result<Json<OpenRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(&rejection, OPEN_BODY_SHAPE),
    };
    match state.key_slot.open(&req.sealed).await {
        Ok(plaintext) => (StatusCode::OK, Json(OpenResponse { plaintext })).into_response(),
        Err(e) => {
            let err = ServiceError::from(e);
            info!(code = err.code(), "open rejected");
            error_response(&err)
        }
    }
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when the key is loaded, `503 Service Unavailable` otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let key_ready = state.key_slot.is_ready().await;

    let (status_code, status_str) = if key_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        key_ready,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

const SEAL_BODY_SHAPE: &str = "request body must be a JSON object with a string `plaintext` field";
const OPEN_BODY_SHAPE: &str = "request body must be a JSON object with a string `sealed` field";

/// Answer an unreadable request body with an [`ErrorResponse`].
///
/// Everything except an oversized body becomes `400 malformed_input`; axum's
/// own 422 would collide with `secret_unusable`. The rejection text is not
/// echoed because serde messages can quote the submitted secret.
fn rejection_response(rejection: &JsonRejection, expected: &str) -> Response {
    debug!(status = %rejection.status(), "request body rejected");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let err = ErrorResponse::new("payload_too_large", "request body exceeds the size limit");
        return (StatusCode::PAYLOAD_TOO_LARGE, Json(err)).into_response();
    }
    error_response(&ServiceError::BadRequest(expected.into()))
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}
