//! Shared application state injected into every Axum handler.

use secret_box::KeySlot;

/// Application state shared across all request handlers.
///
/// [`KeySlot`] is `Arc`-backed, so Axum can clone the state for each request
/// without copying key material.
#[derive(Clone, Default)]
pub struct AppState {
    /// Holder for the process key loaded at startup.
    pub key_slot: KeySlot,
}

impl AppState {
    /// Create a new [`AppState`] around the given slot.
    pub fn new(key_slot: KeySlot) -> Self {
        Self { key_slot }
    }
}
