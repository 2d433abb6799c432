//! `StateStore` — the gate and a backend behind one access primitive.

use std::time::Duration;

use lift_core::{EngineConfig, Floor, SharedState};
use tracing::{debug, info};

use crate::{Gate, StateBackend, StoreError, StoreResult};

/// The shared state with its exclusive gate.
///
/// Clone-free and `Sync`: share it between the engine thread and request
/// handlers behind an `Arc`.
#[derive(Debug)]
pub struct StateStore<B: StateBackend> {
    backend:      B,
    gate:         Gate,
    gate_timeout: Duration,
    lift_count:   usize,
    home_floor:   Floor,
}

impl<B: StateBackend> StateStore<B> {
    /// Open a store over `backend`, seeding a fresh fleet from `config` if
    /// the backend holds nothing yet.
    ///
    /// Does not validate `config`; callers do that once up front.
    pub fn open(backend: B, config: &EngineConfig) -> StoreResult<Self> {
        let store = Self {
            backend,
            gate: Gate::new(),
            gate_timeout: config.gate_timeout(),
            lift_count: config.lift_count,
            home_floor: config.home_floor,
        };

        {
            let _guard = store.gate.acquire(store.gate_timeout)?;
            let _lock = store.backend.lock(store.gate_timeout)?;
            if store.backend.load()?.is_none() {
                info!(
                    lifts = store.lift_count,
                    home = store.home_floor,
                    "seeding fresh shared state"
                );
                store.backend.save(&store.fresh())?;
            }
        }
        Ok(store)
    }

    /// Run `f` on the shared state while holding the gate and the
    /// backend's lock file, if it has one.
    ///
    /// The state is loaded after both are acquired and saved only when `f`
    /// returns `Ok`; an `Err` from `f` discards its changes.  The gate is
    /// released on every exit path, panics included.
    ///
    /// # Errors
    ///
    /// Gate timeouts and persistence failures are converted into `E`;
    /// errors from `f` pass through unchanged.
    pub fn with_exclusive_access<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut SharedState) -> Result<T, E>,
    {
        let _guard = self.gate.acquire(self.gate_timeout)?;
        let _lock = self.backend.lock(self.gate_timeout)?;
        let mut state = self.load_or_fresh()?;
        let out = f(&mut state)?;
        self.backend.save(&state)?;
        Ok(out)
    }

    /// Read the current state without taking the gate.
    pub fn snapshot(&self) -> StoreResult<SharedState> {
        self.load_or_fresh()
    }

    /// Replace the state with a fresh fleet: every lift idle at the home
    /// floor, empty queues, empty backlog.
    pub fn reset(&self) -> StoreResult<SharedState> {
        self.with_exclusive_access(|state| {
            *state = self.fresh();
            info!(lifts = self.lift_count, home = self.home_floor, "shared state reset");
            Ok::<_, StoreError>(state.clone())
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn gate_timeout(&self) -> Duration {
        self.gate_timeout
    }

    fn fresh(&self) -> SharedState {
        SharedState::fresh(self.lift_count, self.home_floor)
    }

    fn load_or_fresh(&self) -> StoreResult<SharedState> {
        match self.backend.load()? {
            Some(state) => Ok(state),
            None => {
                debug!("backend empty, using a fresh fleet");
                Ok(self.fresh())
            }
        }
    }
}
