//! The `StateBackend` trait implemented by every persistence mechanism.

use std::time::Duration;

use lift_core::SharedState;

use crate::{FileLock, StoreResult};

/// Where the shared state lives between mutations.
///
/// Serializing read-modify-write cycles is the job of
/// [`StateStore`][crate::StateStore]; a backend whose data outlives the
/// process supplies the cross-process half of that through [`lock`].
///
/// [`lock`]: StateBackend::lock
pub trait StateBackend: Send + Sync {
    /// Read the current state.  `Ok(None)` means nothing has been stored
    /// yet; the store then seeds a fresh fleet.
    fn load(&self) -> StoreResult<Option<SharedState>>;

    /// Replace the stored state.
    ///
    /// Must be all-or-nothing: a failed save leaves the previous state
    /// readable.
    fn save(&self, state: &SharedState) -> StoreResult<()>;

    /// Take the backend's cross-process lock for one load-mutate-save
    /// cycle, waiting up to `timeout`.  `None` for purely in-process
    /// backends.
    fn lock(&self, _timeout: Duration) -> StoreResult<Option<FileLock>> {
        Ok(None)
    }
}
