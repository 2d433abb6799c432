//! Per-tick summary returned by the engine.

use lift_core::{Floor, LiftId, Tick};

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,

    /// Lifts whose stored shape had to be repaired by the normalize step.
    pub normalized: usize,

    /// Backlog calls that produced a new stop this tick.
    pub assigned: usize,

    /// Backlog calls dropped because a lift already held them.
    pub discarded: usize,

    /// Backlog calls still waiting after the drain.
    pub pending: usize,

    /// Lifts that changed floor, in fleet order.
    pub moved: Vec<LiftId>,

    /// Lifts that reached their target this tick, with the floor reached.
    pub arrivals: Vec<(LiftId, Floor)>,
}

impl TickReport {
    pub fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// `true` if the tick changed nothing observable.
    pub fn is_quiet(&self) -> bool {
        self.normalized == 0
            && self.assigned == 0
            && self.discarded == 0
            && self.moved.is_empty()
            && self.arrivals.is_empty()
    }
}
