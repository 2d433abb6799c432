//! Core error type.
//!
//! Validation failures at the request boundary live here so every crate that
//! touches lifts can report them without depending on the controller.

use thiserror::Error;

use crate::LiftId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} does not exist")]
    InvalidLiftId(LiftId),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `lift-core`.
pub type CoreResult<T> = Result<T, CoreError>;
