//! Plain data row types written by trace backends.

use lift_core::{Direction, Lift, Tick};
use lift_sim::TickReport;

/// One lift's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftSnapshotRow {
    pub tick:        u64,
    pub lift_id:     u32,
    pub position:    i32,
    pub direction:   Direction,
    pub queue_len:   u32,
    /// Floor of `queue[0]`; `None` for an empty queue.
    pub next_floor:  Option<i32>,
    pub dwell_ticks: u32,
}

impl LiftSnapshotRow {
    pub fn from_lift(tick: Tick, lift: &Lift) -> Self {
        Self {
            tick:        tick.0,
            lift_id:     lift.id.0,
            position:    lift.position,
            direction:   lift.direction,
            queue_len:   u32::try_from(lift.queue.len()).unwrap_or(u32::MAX),
            next_floor:  lift.next_stop().map(|s| s.floor),
            dwell_ticks: lift.dwell_ticks,
        }
    }
}

/// Counters for one committed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub assigned:  u64,
    pub discarded: u64,
    pub pending:   u64,
    pub moved:     u64,
    pub arrivals:  u64,
}

impl From<&TickReport> for TickSummaryRow {
    fn from(report: &TickReport) -> Self {
        Self {
            tick:      report.tick.0,
            assigned:  report.assigned as u64,
            discarded: report.discarded as u64,
            pending:   report.pending as u64,
            moved:     report.moved.len() as u64,
            arrivals:  report.arrivals.len() as u64,
        }
    }
}
