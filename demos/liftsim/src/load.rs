//! Random landing-call load from worker threads.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use lift_core::CallRng;
use lift_sim::{CallStatus, Controller, ShutdownSignal};
use lift_store::JsonFileBackend;
use tracing::{debug, warn};

/// Per-worker tallies.
#[derive(Default, Debug, Clone, Copy)]
pub struct LoadStats {
    pub queued:         usize,
    pub already_queued: usize,
    pub pending:        usize,
    pub failed:         usize,
}

impl LoadStats {
    fn merge(mut self, other: LoadStats) -> Self {
        self.queued += other.queued;
        self.already_queued += other.already_queued;
        self.pending += other.pending;
        self.failed += other.failed;
        self
    }
}

/// Spawn `workers` threads sharing `total` random calls.
///
/// Each worker has its own generator derived from `seed`, fires one call per
/// `pace`, and stops early once `stop` fires.
pub fn spawn_workers(
    controller: &Controller<JsonFileBackend>,
    total:      usize,
    workers:    usize,
    seed:       u64,
    pace:       Duration,
    stop:       &ShutdownSignal,
) -> Vec<JoinHandle<LoadStats>> {
    let workers = workers.max(1);
    (0..workers)
        .map(|w| {
            let share = total / workers + usize::from(w < total % workers);
            let controller = controller.clone();
            let stop = stop.clone();
            thread::spawn(move || run_worker(&controller, w as u64, seed, share, pace, &stop))
        })
        .collect()
}

pub fn join_workers(handles: Vec<JoinHandle<LoadStats>>) -> LoadStats {
    handles
        .into_iter()
        .filter_map(|h| h.join().ok())
        .fold(LoadStats::default(), LoadStats::merge)
}

fn run_worker(
    controller: &Controller<JsonFileBackend>,
    worker:     u64,
    seed:       u64,
    calls:      usize,
    pace:       Duration,
    stop:       &ShutdownSignal,
) -> LoadStats {
    let mut rng = CallRng::new(seed, worker);
    let floors = controller.floors();
    let mut stats = LoadStats::default();

    for _ in 0..calls {
        let (floor, direction) = rng.call(floors);
        match controller.submit_call(floor, direction) {
            Ok(out) => match out.status {
                CallStatus::Queued        => stats.queued += 1,
                CallStatus::AlreadyQueued => stats.already_queued += 1,
                CallStatus::Pending       => stats.pending += 1,
            },
            Err(e) => {
                warn!(worker, floor, %direction, error = %e, retryable = e.is_retryable(), "random call failed");
                stats.failed += 1;
            }
        }
        if stop.wait(pace) {
            break;
        }
    }
    debug!(worker, ?stats, "load worker done");
    stats
}
