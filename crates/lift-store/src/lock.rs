//! `FileLock` — an OS advisory lock on a file next to the stored state.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fslock::LockFile;
use tracing::warn;

use crate::{StoreError, StoreResult};

/// How often a contended lock file is retried.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// An exclusive lock on a lock file, held until dropped.
///
/// The [`Gate`][crate::Gate] only serializes callers sharing one
/// `StateStore`.  File-backed stores also take this lock for each
/// load-mutate-save cycle, so two processes (or two stores) over the same
/// state file exclude each other as well.
pub struct FileLock {
    // Unlocked by `LockFile`'s own drop.
    _file: LockFile,
    path:  PathBuf,
}

impl FileLock {
    /// Open (creating if needed) and lock `path`, waiting up to `timeout`.
    ///
    /// # Errors
    ///
    /// [`StoreError::GateTimeout`] if another holder kept the lock for the
    /// whole period; [`StoreError::Io`] if the file cannot be opened.
    pub fn acquire(path: &Path, timeout: Duration) -> StoreResult<Self> {
        let mut file = LockFile::open(path).map_err(|e| StoreError::Io(e.into()))?;
        let deadline = Instant::now() + timeout;

        while !file.try_lock().map_err(|e| StoreError::Io(e.into()))? {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                warn!(path = %path.display(), ?timeout, "state lock file acquisition timed out");
                return Err(StoreError::GateTimeout(timeout));
            }
            thread::sleep(POLL_INTERVAL.min(left));
        }

        Ok(Self { _file: file, path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for FileLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLock").field("path", &self.path).finish()
    }
}
