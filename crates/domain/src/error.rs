//! Error types for domain-level validation.

use thiserror::Error;

/// Errors produced while validating user-facing input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown asset code: {0}")]
    UnknownAsset(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
