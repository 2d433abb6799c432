//! In-process backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use lift_core::SharedState;

use crate::{StateBackend, StoreResult};

/// Keeps the state in memory.  Counts saves so tests can tell whether a
/// mutation was committed.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<Option<SharedState>>,
    saves: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `state`.
    pub fn with_state(state: SharedState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> StoreResult<Option<SharedState>> {
        Ok(self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, state: &SharedState) -> StoreResult<()> {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
