//! The `Engine` struct and its tick loop.

use std::cmp::Ordering;
use std::sync::Arc;

use lift_core::{Direction, EngineClock, EngineConfig, Lift, SharedState, Tick};
use lift_dispatch::{AssignStatus, Dispatcher, reorder, working_direction};
use lift_store::{StateBackend, StateStore};
use tracing::{debug, info, warn};

use crate::{Controller, EngineObserver, ShutdownSignal, SimError, SimResult, TickReport};

// ── Per-lift step outcome ─────────────────────────────────────────────────────

/// What happened to one lift during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LiftStep {
    /// Empty queue, not dwelling: the lift stays put.
    Idle,
    /// Holding at a floor after an arrival.
    Dwelling,
    /// Moved one floor; `arrived` if the new floor is the target.
    Moved { arrived: bool },
    /// Target was the current floor: served without moving.
    ServedInPlace,
}

/// Advance one lift by one tick.
///
/// A dwelling lift only counts down.  Otherwise the queue is reordered, the
/// direction follows the head stop (its requested direction when tagged,
/// the direction of travel when not), the lift moves one floor toward the
/// head, and an arrival pops the head and starts a dwell of `dwell_ticks`.
///
/// An untagged head turns the lift toward its floor rather than keeping the
/// stale direction, so a destination behind the lift never reads as ahead.
fn step_lift(lift: &mut Lift, dwell_ticks: u32) -> LiftStep {
    if lift.dwell_ticks > 0 {
        lift.dwell_ticks -= 1;
        return LiftStep::Dwelling;
    }

    lift.direction = working_direction(&lift.queue, lift.position, lift.direction);
    lift.queue = reorder(&lift.queue, lift.position, lift.direction);

    let Some(head) = lift.queue.first().copied() else {
        lift.direction = Direction::Idle;
        return LiftStep::Idle;
    };
    lift.direction = match head.requested_direction {
        Some(requested)                        => requested,
        None if head.floor != lift.position    => Direction::towards(lift.position, head.floor),
        None                                   => lift.direction,
    };

    let moved = match lift.position.cmp(&head.floor) {
        Ordering::Less    => { lift.position += 1; true }
        Ordering::Greater => { lift.position -= 1; true }
        Ordering::Equal   => false,
    };

    let arrived = lift.position == head.floor;
    if arrived {
        lift.queue.remove(0);
        lift.dwell_ticks = dwell_ticks;
        if lift.queue.is_empty() {
            lift.direction = Direction::Idle;
        }
    }

    if moved {
        LiftStep::Moved { arrived }
    } else {
        LiftStep::ServedInPlace
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The movement engine.
///
/// `Engine<B>` owns the clock and the dispatcher and shares the
/// [`StateStore`] with any number of [`Controller`]s.  Each tick runs as one
/// gated unit through [`StateStore::with_exclusive_access`]; the wait between
/// ticks happens outside the gate.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<B: StateBackend> {
    /// Configuration the engine was built with.
    pub config: EngineConfig,

    /// Tick counter and travel interval.
    pub clock: EngineClock,

    /// Stop after this many ticks in [`run`][Self::run]; `None` runs until
    /// shutdown.
    pub max_ticks: Option<u64>,

    pub(crate) store:       Arc<StateStore<B>>,
    pub(crate) dispatcher:  Dispatcher,
    pub(crate) dwell_ticks: u32,
}

impl<B: StateBackend> Engine<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the fixed-interval loop until `shutdown` fires or `max_ticks`
    /// ticks have run.  Returns the tick the loop stopped at.
    ///
    /// A failed tick is logged, reported through
    /// [`EngineObserver::on_tick_error`], and skipped; the loop carries on.
    pub fn run<O: EngineObserver>(&mut self, observer: &mut O, shutdown: &ShutdownSignal) -> Tick {
        let start = self.clock.current_tick;
        let stop_at = self.max_ticks.map(|n| start.offset(n));
        info!(lifts = self.config.lift_count, interval = ?self.clock.travel_interval, "engine started");

        loop {
            if stop_at.is_some_and(|end| self.clock.current_tick >= end) {
                break;
            }
            if shutdown.is_triggered() {
                break;
            }

            self.tick_observed(observer);

            if shutdown.wait(self.clock.travel_interval) {
                break;
            }
        }

        let end = self.clock.current_tick;
        info!(ticks = end - start, "engine stopped");
        observer.on_run_end(end);
        end
    }

    /// Run exactly `n` ticks back to back, without waiting between them.
    ///
    /// Useful for tests and for replaying a script as fast as possible.
    pub fn run_ticks<O: EngineObserver>(&mut self, n: u64, observer: &mut O) -> Tick {
        for _ in 0..n {
            self.tick_observed(observer);
        }
        let end = self.clock.current_tick;
        observer.on_run_end(end);
        end
    }

    /// Run one gated tick against the store and advance the clock.
    ///
    /// # Errors
    ///
    /// Gate timeouts and persistence failures.  On error nothing was
    /// persisted and the clock does not advance.
    pub fn tick(&mut self) -> SimResult<TickReport> {
        let (report, _) = self.commit_tick(false)?;
        self.clock.advance();
        Ok(report)
    }

    /// Apply one tick to `state` in memory: normalize, drain the backlog,
    /// step every lift.
    ///
    /// Pure with respect to the store; [`tick`][Self::tick] wraps this in the
    /// gate.
    pub fn advance(&self, state: &mut SharedState) -> TickReport {
        let mut report = TickReport::new(self.clock.current_tick);

        report.normalized = state.normalize();
        if report.normalized > 0 {
            debug!(lifts = report.normalized, "normalized stored lift state");
        }

        // ── Backlog drain (FIFO) ──────────────────────────────────────────
        for request in std::mem::take(&mut state.pending) {
            match self.dispatcher.assign(&request, &mut state.lifts) {
                Ok(a) if a.status == AssignStatus::Queued => {
                    report.assigned += 1;
                    info!(
                        lift = %state.lifts[a.lift].id,
                        floor = request.current_floor,
                        direction = %request.direction,
                        "backlog call assigned"
                    );
                }
                Ok(_) => report.discarded += 1,
                Err(e) => {
                    debug!(%e, "backlog call kept");
                    state.pending.push(request);
                }
            }
        }
        report.pending = state.pending.len();

        // ── Lifts ─────────────────────────────────────────────────────────
        for lift in &mut state.lifts {
            match step_lift(lift, self.dwell_ticks) {
                LiftStep::Moved { arrived } => {
                    report.moved.push(lift.id);
                    if arrived {
                        report.arrivals.push((lift.id, lift.position));
                    }
                }
                LiftStep::ServedInPlace => report.arrivals.push((lift.id, lift.position)),
                LiftStep::Idle | LiftStep::Dwelling => {}
            }
        }
        for &(lift, floor) in &report.arrivals {
            info!(%lift, floor, "arrived");
        }

        debug!(
            tick = %report.tick,
            assigned = report.assigned,
            discarded = report.discarded,
            pending = report.pending,
            moved = report.moved.len(),
            "tick advanced"
        );
        report
    }

    /// A [`Controller`] sharing this engine's store, floor range, and
    /// scoring.
    pub fn controller(&self) -> Controller<B> {
        Controller::new(Arc::clone(&self.store), self.config.floors(), self.dispatcher.clone())
    }

    pub fn store(&self) -> &Arc<StateStore<B>> {
        &self.store
    }

    /// Dwell length in ticks applied on every arrival.
    pub fn dwell_ticks(&self) -> u32 {
        self.dwell_ticks
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// One tick with observer callbacks.  The clock advances whether or not
    /// the tick committed.
    fn tick_observed<O: EngineObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        match self.commit_tick(self.snapshot_due(now)) {
            Ok((report, snapshot)) => {
                observer.on_tick_end(&report);
                if let Some(state) = snapshot {
                    observer.on_snapshot(now, &state);
                }
            }
            Err(e) => {
                warn!(tick = %now, error = %e, retryable = e.is_retryable(), "tick failed");
                observer.on_tick_error(now, &e);
            }
        }

        self.clock.advance();
    }

    fn commit_tick(&self, want_snapshot: bool) -> SimResult<(TickReport, Option<SharedState>)> {
        self.store.with_exclusive_access(|state| {
            let report = self.advance(state);
            let snapshot = want_snapshot.then(|| state.clone());
            Ok::<_, SimError>((report, snapshot))
        })
    }

    fn snapshot_due(&self, now: Tick) -> bool {
        let every = self.config.output_interval_ticks;
        every > 0 && now.0.is_multiple_of(every)
    }
}

