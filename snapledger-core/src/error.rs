//! Core error types for `SnapLedger`.

use thiserror::Error;

/// Core error type for `SnapLedger` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tier name not recognized.
    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    /// Reset category name not recognized.
    #[error("Unknown reset category: {0}")]
    UnknownCategory(String),

    /// A credential value was empty or whitespace only.
    #[error("Credential value must not be empty")]
    EmptyCredential,

    /// Monetary amount could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
