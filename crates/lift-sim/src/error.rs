use lift_core::CoreError;
use lift_store::StoreError;
use thiserror::Error;

/// Errors from building or running the engine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("call script line {line}: {reason}")]
    Script { line: u64, reason: String },
}

impl SimError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SimError::Store(e) if e.is_retryable())
    }
}

pub type SimResult<T> = Result<T, SimError>;

/// Errors returned to request handlers by the
/// [`Controller`][crate::Controller].
#[derive(Debug, Error)]
pub enum ControlError {
    /// Rejected before touching state: bad floor, bad direction, unknown lift.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ControlError {
    /// `true` if the caller may retry (gate timeout).
    pub fn is_retryable(&self) -> bool {
        matches!(self, ControlError::Store(e) if e.is_retryable())
    }
}

pub type ControlResult<T> = Result<T, ControlError>;
