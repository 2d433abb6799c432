//! `JsonFileBackend` — shared state as one JSON document on disk.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lift_core::{Lift, SharedState};
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{FileLock, StateBackend, StoreError, StoreResult};

/// Stores `SharedState` as pretty-printed JSON at `path`.
///
/// Saves go through a temporary file in the same directory followed by an
/// atomic rename, so concurrent readers (the ungated status query, another
/// process tailing the file) see either the old document or the new one.
///
/// Every gated cycle also holds an advisory lock on a sibling lock file
/// (`lifts.json` → `lifts.lock`), shared by every process using the same
/// state file.
///
/// On load the backend also accepts a bare JSON array of lifts, the layout
/// used before the landing-call backlog was persisted alongside them.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StateFile {
    Full(SharedState),
    LiftsOnly(Vec<Lift>),
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<Option<SharedState>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        // A freshly touched file counts as "nothing stored yet".
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let state = match serde_json::from_slice::<StateFile>(&bytes) {
            Ok(StateFile::Full(state)) => state,
            Ok(StateFile::LiftsOnly(lifts)) => {
                debug!(path = %self.path.display(), "loaded lifts-only state file");
                SharedState { lifts, pending: Vec::new() }
            }
            // Re-parse as the canonical layout so the error names the real problem.
            Err(_) => serde_json::from_slice::<SharedState>(&bytes)?,
        };
        Ok(Some(state))
    }

    fn save(&self, state: &SharedState) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(state)?;

        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn lock(&self, timeout: Duration) -> StoreResult<Option<FileLock>> {
        FileLock::acquire(&self.lock_path(), timeout).map(Some)
    }
}
