//! Error types for lift-store.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while gating, loading, or persisting shared state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("shared-state gate not acquired within {0:?}")]
    GateTimeout(Duration),

    #[error("state persistence I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// `true` for failures worth retrying with backoff.  Persistence
    /// failures are not: they abort the current operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::GateTimeout(_))
    }
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
