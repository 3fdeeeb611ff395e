//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, and response compression.

use std::time::Duration;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest accepted request body. Secrets are short; this bounds a sealed
/// record of a 10,000-character multi-byte secret with room to spare.
pub const MAX_BODY_BYTES: usize = 256 * 1024;
