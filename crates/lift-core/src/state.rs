//! `SharedState` — the single unit of truth shared by the engine and every
//! request handler.

use crate::{CoreError, CoreResult, Direction, ExternalRequest, Floor, Lift, LiftId};

/// All lifts plus the backlog of landing calls not yet bound to a lift.
///
/// Only ever mutated under the store's exclusive gate.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedState {
    pub lifts:   Vec<Lift>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pending: Vec<ExternalRequest>,
}

impl SharedState {
    /// `lift_count` idle lifts at `home_floor` and an empty backlog.
    pub fn fresh(lift_count: usize, home_floor: Floor) -> Self {
        Self {
            lifts:   (0..lift_count)
                .map(|i| Lift::new(LiftId::from_index(i), home_floor))
                .collect(),
            pending: Vec::new(),
        }
    }

    /// Fleet vector index of `id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidLiftId`] if `id` is `0` or beyond the fleet.
    pub fn lift_index(&self, id: LiftId) -> CoreResult<usize> {
        id.index()
            .filter(|&i| i < self.lifts.len())
            .ok_or(CoreError::InvalidLiftId(id))
    }

    pub fn lift(&self, id: LiftId) -> CoreResult<&Lift> {
        let i = self.lift_index(id)?;
        Ok(&self.lifts[i])
    }

    pub fn lift_mut(&mut self, id: LiftId) -> CoreResult<&mut Lift> {
        let i = self.lift_index(id)?;
        Ok(&mut self.lifts[i])
    }

    /// Index of the first lift already holding the landing call
    /// `(floor, direction)`, if any.
    pub fn lift_with_call(&self, floor: Floor, direction: Direction) -> Option<usize> {
        self.lifts
            .iter()
            .position(|l| l.has_stop(floor, Some(direction)))
    }

    /// `true` if an identical call is already waiting in the backlog.
    pub fn is_pending(&self, request: &ExternalRequest) -> bool {
        self.pending.iter().any(|r| r.same_call(request))
    }

    /// Bring every lift into canonical shape.
    ///
    /// Stray `Idle` stop tags become "no preference", empty queues force
    /// `Idle`, and an idle lift with queued stops is pointed at its head.
    /// Returns the number of lifts that needed a fix.
    pub fn normalize(&mut self) -> usize {
        let mut fixed = 0;
        for lift in &mut self.lifts {
            let mut changed = false;
            for stop in &mut lift.queue {
                changed |= stop.canonicalize();
            }
            changed |= lift.settle();
            if changed {
                fixed += 1;
            }
        }
        fixed
    }

    /// `true` if every lift satisfies `direction == Idle ⇔ queue.is_empty()`.
    pub fn idle_invariant_holds(&self) -> bool {
        self.lifts.iter().all(Lift::idle_invariant_holds)
    }

    /// Total queued stops across the fleet.
    pub fn queued_stops(&self) -> usize {
        self.lifts.iter().map(|l| l.queue.len()).sum()
    }
}
