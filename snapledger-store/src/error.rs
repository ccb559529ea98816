//! Store error types.

use snapledger_core::{CoreError, ResetCategory};
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Keychain access failed.
    #[error("Keychain error: {0}")]
    Keychain(String),

    /// A storage backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Deleting a reset category failed.
    #[error("Failed to delete {category}: {reason}")]
    DeleteFailed {
        /// Category being deleted.
        category: ResetCategory,
        /// Backend-provided reason.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Io(_) | StoreError::Keychain(_) | StoreError::Unavailable(_)
        )
    }
}
