//! `lift-dispatch` — stop ordering, lift scoring, and request assignment.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`reorder`]    | `reorder` — SCAN ordering of one lift's stop queue         |
//! | [`scoring`]    | `Scoring` — cost of sending a lift to a landing call       |
//! | [`dispatcher`] | `Dispatcher`, `Assignment`, `AssignStatus`                 |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                       |
//!
//! Everything here is pure with respect to the shared store: functions take
//! lifts by reference (or `&mut [Lift]` for `assign`) and never lock, load,
//! or persist.  The engine and the request controller call in while holding
//! the store's gate.
//!
//! # SCAN in one paragraph
//!
//! A lift serves every stop ahead of it in its direction of travel, in the
//! order it passes them, before turning around.  Stops behind it wait for the
//! return sweep.  Scoring mirrors this: a lift that can pick a call up on its
//! current sweep costs only its distance; any lift that would have to turn
//! around pays a fixed penalty on top.

pub mod dispatcher;
pub mod error;
pub mod reorder;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use dispatcher::{AssignStatus, Assignment, Dispatcher};
pub use error::{DispatchError, DispatchResult};
pub use reorder::{reorder, working_direction};
pub use scoring::Scoring;
