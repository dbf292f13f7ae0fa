//! Typed errors for the view service layer.
//!
//! Missing preconditions (no workspace slug, unsaved record) are never
//! errors; the store skips those calls silently. Errors here mean the
//! call was attempted and the transport or server let us down.

use thiserror::Error;

/// Errors surfaced by `ViewService` implementations.
#[derive(Debug, Error)]
pub enum ViewServiceError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Failed to decode server response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
