//! Data-layer errors.

use thiserror::Error;

/// Errors surfaced by the DEX API client.
///
/// Every variant is transient from the engine's point of view: derived
/// state is cleared, the user is notified and the next interaction
/// re-triggers the request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("API rejected the request: {0}")]
    Rejected(&'static str),
}
