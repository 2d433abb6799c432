//! Assigning landing calls to lifts.

use lift_core::{ExternalRequest, Lift};

use crate::{DispatchError, DispatchResult, Scoring};

/// Whether an assignment created a new stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignStatus {
    /// A new stop was appended to the chosen lift.
    Queued,
    /// The chosen lift already held a stop for the same floor and direction.
    AlreadyQueued,
}

/// Result of dispatching one call: the fleet index of the chosen lift.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub lift:   usize,
    pub status: AssignStatus,
}

/// Chooses the best lift for each landing call.
///
/// One duplicate policy applies everywhere: a call is already served when
/// some lift holds a stop with the same floor **and** the same requested
/// direction.  A destination stop (no direction) on the same floor does not
/// count; the landing call still gets its own stop.
#[derive(Clone, Debug, Default)]
pub struct Dispatcher {
    pub scoring: Scoring,
}

impl Dispatcher {
    pub fn new(scoring: Scoring) -> Self {
        Self { scoring }
    }

    /// Fleet index of the first lift that already holds `request`.
    pub fn find_duplicate(&self, request: &ExternalRequest, lifts: &[Lift]) -> Option<usize> {
        lifts
            .iter()
            .position(|l| l.has_stop(request.current_floor, Some(request.direction)))
    }

    /// Pick a lift for `request` without touching any queue.
    ///
    /// Returns the duplicate holder if there is one, otherwise the
    /// lowest-cost lift.  Ties go to the lowest fleet index, so the choice is
    /// a pure function of the lift states.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Unassignable`] if `lifts` is empty.
    pub fn select(&self, request: &ExternalRequest, lifts: &[Lift]) -> DispatchResult<Assignment> {
        if let Some(lift) = self.find_duplicate(request, lifts) {
            return Ok(Assignment { lift, status: AssignStatus::AlreadyQueued });
        }

        lifts
            .iter()
            .enumerate()
            .min_by_key(|&(i, l)| {
                (self.scoring.score(l, request.current_floor, request.direction), i)
            })
            .map(|(lift, _)| Assignment { lift, status: AssignStatus::Queued })
            .ok_or(DispatchError::Unassignable {
                floor:     request.current_floor,
                direction: request.direction,
            })
    }

    /// Pick a lift for `request` and append the call to its queue.
    ///
    /// An idle lift receiving its first stop is pointed toward it straight
    /// away; afterwards the engine keeps direction in step with the queue.
    pub fn assign(&self, request: &ExternalRequest, lifts: &mut [Lift]) -> DispatchResult<Assignment> {
        let assignment = self.select(request, lifts)?;
        if assignment.status == AssignStatus::Queued {
            lifts[assignment.lift].push_stop(request.to_stop());
        }
        Ok(assignment)
    }
}
