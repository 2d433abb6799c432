//! Engine observer trait for progress reporting and trace collection.

use lift_core::{SharedState, Tick};

use crate::{SimError, TickReport};

/// Callbacks invoked by [`Engine::run`][crate::Engine::run] and
/// [`Engine::run_ticks`][crate::Engine::run_ticks] at key points of the loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  None of them runs under the
/// shared-state gate, so an observer may submit requests through a
/// [`Controller`][crate::Controller].
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct Arrivals;
///
/// impl EngineObserver for Arrivals {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         for (lift, floor) in &report.arrivals {
///             println!("{}: {lift} reached {floor}", report.tick);
///         }
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called before the tick takes the gate.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after a tick was committed.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called after a committed tick every `config.output_interval_ticks`
    /// ticks with the state as persisted.
    fn on_snapshot(&mut self, _tick: Tick, _state: &SharedState) {}

    /// Called when a tick failed and was rolled back.  The loop keeps going.
    fn on_tick_error(&mut self, _tick: Tick, _error: &SimError) {}

    /// Called once when the loop ends.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

impl<O: EngineObserver> EngineObserver for Option<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        if let Some(o) = self {
            o.on_tick_start(tick);
        }
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        if let Some(o) = self {
            o.on_tick_end(report);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, state: &SharedState) {
        if let Some(o) = self {
            o.on_snapshot(tick, state);
        }
    }

    fn on_tick_error(&mut self, tick: Tick, error: &SimError) {
        if let Some(o) = self {
            o.on_tick_error(tick, error);
        }
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        if let Some(o) = self {
            o.on_run_end(final_tick);
        }
    }
}

/// Both observers, first `A` then `B`.
impl<A: EngineObserver, B: EngineObserver> EngineObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.0.on_tick_end(report);
        self.1.on_tick_end(report);
    }

    fn on_snapshot(&mut self, tick: Tick, state: &SharedState) {
        self.0.on_snapshot(tick, state);
        self.1.on_snapshot(tick, state);
    }

    fn on_tick_error(&mut self, tick: Tick, error: &SimError) {
        self.0.on_tick_error(tick, error);
        self.1.on_tick_error(tick, error);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.0.on_run_end(final_tick);
        self.1.on_run_end(final_tick);
    }
}
