//! Unit tests for lift-store.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use lift_core::{Direction, EngineConfig, ExternalRequest, SharedState, Stop};

use crate::{
    FileLock, Gate, JsonFileBackend, MemoryBackend, StateBackend, StateStore, StoreError,
    StoreResult,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(lift_count: usize, gate_timeout_ms: u64) -> EngineConfig {
    EngineConfig {
        lift_count,
        gate_timeout_ms,
        ..EngineConfig::default()
    }
}

fn memory_store(lift_count: usize) -> StateStore<MemoryBackend> {
    StateStore::open(MemoryBackend::new(), &config(lift_count, 5_000)).unwrap()
}

/// Backend whose saves always fail.
struct BrokenDisk(MemoryBackend);

impl StateBackend for BrokenDisk {
    fn load(&self) -> StoreResult<Option<SharedState>> {
        self.0.load()
    }

    fn save(&self, _state: &SharedState) -> StoreResult<()> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }
}

// ── Gate ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gate {
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let gate = Gate::new();
        {
            let _g = gate.acquire(Duration::from_millis(10)).unwrap();
            assert!(gate.is_held());
            assert!(gate.acquire(Duration::ZERO).is_err());
        }
        assert!(!gate.is_held());
        assert!(gate.acquire(Duration::ZERO).is_ok());
    }

    #[test]
    fn acquire_times_out_while_held() {
        let gate = Gate::new();
        let _held = gate.acquire(Duration::ZERO).unwrap();

        let start = Instant::now();
        let err = gate.acquire(Duration::from_millis(50)).unwrap_err();
        assert!(matches!(err, StoreError::GateTimeout(d) if d == Duration::from_millis(50)));
        assert!(err.is_retryable());
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn waiter_gets_in_after_release() {
        let gate = Arc::new(Gate::new());
        let guard = gate.acquire(Duration::ZERO).unwrap();

        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.acquire(Duration::from_secs(5)).map(|_| ()))
        };
        thread::sleep(Duration::from_millis(20));
        drop(guard);

        assert!(waiter.join().unwrap().is_ok());
        assert!(!gate.is_held());
    }
}

// ── StateStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn open_seeds_fresh_fleet() {
        let store = memory_store(3);
        let state = store.snapshot().unwrap();
        assert_eq!(state.lifts.len(), 3);
        assert!(state.lifts.iter().all(|l| l.position == -4 && l.is_idle()));
        assert!(state.pending.is_empty());
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn open_keeps_existing_state() {
        let mut existing = SharedState::fresh(2, 5);
        existing.lifts[1].push_stop(Stop::destination(9));
        let store =
            StateStore::open(MemoryBackend::with_state(existing.clone()), &config(4, 100)).unwrap();
        assert_eq!(store.snapshot().unwrap(), existing);
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn committed_mutation_is_visible() {
        let store = memory_store(2);
        let n = store
            .with_exclusive_access(|state| {
                state.lifts[0].push_stop(Stop::call(3, Direction::Up));
                Ok::<_, StoreError>(state.queued_stops())
            })
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(store.snapshot().unwrap().lifts[0].queue, vec![Stop::call(3, Direction::Up)]);
    }

    #[test]
    fn failed_closure_discards_changes() {
        let store = memory_store(2);
        let saves = store.backend().save_count();

        let result: Result<(), StoreError> = store.with_exclusive_access(|state| {
            state.lifts[0].position = 10;
            Err(StoreError::GateTimeout(Duration::ZERO))
        });
        assert!(result.is_err());
        assert_eq!(store.snapshot().unwrap().lifts[0].position, -4);
        assert_eq!(store.backend().save_count(), saves);
        assert!(!store.gate().is_held());
    }

    #[test]
    fn failed_save_releases_gate_and_keeps_old_state() {
        let seeded = SharedState::fresh(1, 0);
        let store = StateStore::open(
            BrokenDisk(MemoryBackend::with_state(seeded.clone())),
            &config(1, 100),
        )
        .unwrap();

        let err = store
            .with_exclusive_access(|state| {
                state.lifts[0].position = 7;
                Ok::<_, StoreError>(())
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!err.is_retryable());
        assert!(!store.gate().is_held());
        assert_eq!(store.snapshot().unwrap(), seeded);
    }

    #[test]
    fn mutation_times_out_while_gate_held() {
        let store = StateStore::open(MemoryBackend::new(), &config(1, 30)).unwrap();
        let _held = store.gate().acquire(Duration::ZERO).unwrap();

        let err = store
            .with_exclusive_access(|_| Ok::<_, StoreError>(()))
            .unwrap_err();
        assert!(matches!(err, StoreError::GateTimeout(_)));
    }

    #[test]
    fn snapshot_skips_gate() {
        let store = memory_store(1);
        let _held = store.gate().acquire(Duration::ZERO).unwrap();
        assert_eq!(store.snapshot().unwrap().lifts.len(), 1);
    }

    #[test]
    fn reset_restores_fresh_fleet() {
        let store = memory_store(2);
        store
            .with_exclusive_access(|state| {
                state.lifts[1].position = 6;
                state.lifts[1].push_stop(Stop::destination(12));
                state.pending.push(ExternalRequest::at(2, Direction::Up, 1));
                Ok::<_, StoreError>(())
            })
            .unwrap();

        let fresh = store.reset().unwrap();
        assert_eq!(fresh, SharedState::fresh(2, -4));
        assert_eq!(store.snapshot().unwrap(), fresh);
    }

    #[test]
    fn concurrent_mutations_are_serialized() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 25;

        let store = Arc::new(memory_store(1));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..ROUNDS {
                        store
                            .with_exclusive_access(|state| {
                                // Read-modify-write with a yield in the middle:
                                // lost updates show up if the gate leaks.
                                let p = state.lifts[0].position;
                                thread::yield_now();
                                state.lifts[0].position = p + 1;
                                Ok::<_, StoreError>(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let expected = -4 + (THREADS * ROUNDS) as i32;
        assert_eq!(store.snapshot().unwrap().lifts[0].position, expected);
    }
}

// ── JsonFileBackend ───────────────────────────────────────────────────────────

#[cfg(test)]
mod json {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("state.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn empty_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(JsonFileBackend::new(&path).load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("state.json"));

        let mut state = SharedState::fresh(2, 0);
        state.lifts[0].push_stop(Stop::call(5, Direction::Down));
        state.lifts[0].dwell_ticks = 1;
        state.pending.push(ExternalRequest::at(3, Direction::Up, 17));
        backend.save(&state).unwrap();

        assert_eq!(backend.load().unwrap(), Some(state));
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("state.json"));
        backend.save(&SharedState::fresh(1, 0)).unwrap();
        backend.save(&SharedState::fresh(3, 0)).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(backend.load().unwrap().unwrap().lifts.len(), 3);
    }

    #[test]
    fn loads_lifts_only_layout_with_legacy_stops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifts.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "position": 2, "direction": "up",
                 "queue": [5, {"reqFloor": 7, "reqDirection": "down"}]},
                {"id": 2, "position": -4, "direction": "idle", "queue": []}
            ]"#,
        )
        .unwrap();

        let state = JsonFileBackend::new(&path).load().unwrap().unwrap();
        assert_eq!(state.lifts.len(), 2);
        assert_eq!(
            state.lifts[0].queue,
            vec![Stop::destination(5), Stop::call(7, Direction::Down)]
        );
        assert!(state.pending.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileBackend::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn store_over_json_file_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let cfg = config(2, 1_000);

        {
            let store = StateStore::open(JsonFileBackend::new(&path), &cfg).unwrap();
            store
                .with_exclusive_access(|state| {
                    state.lifts[1].push_stop(Stop::destination(4));
                    Ok::<_, StoreError>(())
                })
                .unwrap();
        }

        let reopened = StateStore::open(JsonFileBackend::new(&path), &cfg).unwrap();
        let state = reopened.snapshot().unwrap();
        assert_eq!(state.lifts[1].queue, vec![Stop::destination(4)]);
        assert_eq!(state.lifts[1].direction, Direction::Up);
    }

    #[test]
    fn lock_file_excludes_second_holder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifts.lock");

        let held = FileLock::acquire(&path, Duration::ZERO).unwrap();
        assert_eq!(held.path(), path.as_path());
        let err = FileLock::acquire(&path, Duration::from_millis(30)).unwrap_err();
        assert!(matches!(err, StoreError::GateTimeout(_)));

        drop(held);
        FileLock::acquire(&path, Duration::ZERO).unwrap();
    }

    #[test]
    fn stores_sharing_a_file_exclude_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifts.json");
        let engine_side = StateStore::open(JsonFileBackend::new(&path), &config(2, 1_000)).unwrap();
        let resetter = StateStore::open(JsonFileBackend::new(&path), &config(2, 50)).unwrap();
        assert!(dir.path().join("lifts.lock").exists());

        // The resetter has its own gate; only the lock file can stop it.
        let blocked = engine_side
            .with_exclusive_access(|state| {
                state.lifts[0].position = 7;
                Ok::<_, StoreError>(resetter.reset())
            })
            .unwrap();
        assert!(matches!(blocked, Err(StoreError::GateTimeout(_))));
        assert_eq!(resetter.snapshot().unwrap().lifts[0].position, 7);

        let fresh = resetter.reset().unwrap();
        assert_eq!(fresh.lifts[0].position, -4);
        assert_eq!(engine_side.snapshot().unwrap().lifts[0].position, -4);
    }

    #[test]
    fn memory_backend_has_no_lock_file() {
        assert!(MemoryBackend::new().lock(Duration::ZERO).unwrap().is_none());
    }
}
