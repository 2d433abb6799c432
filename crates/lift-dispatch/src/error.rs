use lift_core::{Direction, Floor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no lift available for call at floor {floor} going {direction}")]
    Unassignable {
        floor:     Floor,
        direction: Direction,
    },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
