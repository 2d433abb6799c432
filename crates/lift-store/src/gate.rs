//! The process-wide exclusive gate over shared state.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

use tracing::warn;

use crate::{StoreError, StoreResult};

/// A mutual-exclusion gate whose holder is represented by a [`GateGuard`].
///
/// Unlike a plain `Mutex`, acquisition is bounded: a caller that cannot get
/// in within the timeout receives [`StoreError::GateTimeout`] and may retry.
/// The gate protects no data itself; it serializes load-mutate-save cycles
/// against the backend.
///
/// The internal flag is a plain `bool`, so a panic while it is locked cannot
/// leave it inconsistent; poisoning is ignored.
#[derive(Debug, Default)]
pub struct Gate {
    held:     Mutex<bool>,
    released: Condvar,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait up to `timeout` for the gate.
    ///
    /// # Errors
    ///
    /// [`StoreError::GateTimeout`] if another holder kept the gate for the
    /// whole period.
    pub fn acquire(&self, timeout: Duration) -> StoreResult<GateGuard<'_>> {
        let held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut held, _) = self
            .released
            .wait_timeout_while(held, timeout, |held| *held)
            .unwrap_or_else(PoisonError::into_inner);

        if *held {
            warn!(?timeout, "shared-state gate acquisition timed out");
            return Err(StoreError::GateTimeout(timeout));
        }
        *held = true;
        Ok(GateGuard { gate: self })
    }

    /// `true` while some caller holds the gate.
    pub fn is_held(&self) -> bool {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        *held = false;
        self.released.notify_one();
    }
}

/// Proof of holding the [`Gate`].  Dropping it releases the gate.
#[must_use = "the gate is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a Gate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}
