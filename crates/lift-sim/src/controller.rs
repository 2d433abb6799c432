//! Request handling: landing calls, in-car destinations, cancellations,
//! status, and reset.

use std::sync::Arc;

use lift_core::{
    Direction, ExternalRequest, Floor, FloorRange, LiftId, SharedState, Stop,
};
use lift_dispatch::{AssignStatus, Dispatcher};
use lift_store::{StateBackend, StateStore};
use tracing::{debug, info};

use crate::{ControlError, ControlResult};

/// Outcome of an immediate landing call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallStatus {
    /// A new stop was added to the chosen lift.
    Queued,
    /// A lift already held this floor and direction; nothing was added.
    AlreadyQueued,
    /// No lift could take the call; it waits in the backlog.
    Pending,
}

impl CallStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Queued        => "queued",
            CallStatus::AlreadyQueued => "already_queued",
            CallStatus::Pending       => "pending",
        }
    }
}

impl From<AssignStatus> for CallStatus {
    fn from(s: AssignStatus) -> Self {
        match s {
            AssignStatus::Queued        => CallStatus::Queued,
            AssignStatus::AlreadyQueued => CallStatus::AlreadyQueued,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    /// The lift serving the call; `None` while it is pending.
    pub lift_id: Option<LiftId>,
    pub status:  CallStatus,
}

/// Outcome of a deferred landing call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeferredStatus {
    /// Added to the backlog; the next tick assigns it.
    Queued,
    /// Already in the backlog or already on a lift.
    Ignored,
}

/// A lift's queue after a destination submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueOutcome {
    pub lift_id: LiftId,
    pub queue:   Vec<Stop>,
}

/// A lift's queue after a cancellation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelOutcome {
    pub lift_id: LiftId,
    pub queue:   Vec<Stop>,
    /// Stops removed by this cancellation.
    pub removed: usize,
}

/// Entry point for request handlers.
///
/// Cheap to clone; every clone shares the same store and therefore the same
/// gate as the engine.  Inputs are validated before the gate is taken, so a
/// malformed request never touches state.
pub struct Controller<B: StateBackend> {
    store:      Arc<StateStore<B>>,
    floors:     FloorRange,
    dispatcher: Dispatcher,
}

impl<B: StateBackend> Clone for Controller<B> {
    fn clone(&self) -> Self {
        Self {
            store:      Arc::clone(&self.store),
            floors:     self.floors,
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<B: StateBackend> Controller<B> {
    pub fn new(store: Arc<StateStore<B>>, floors: FloorRange, dispatcher: Dispatcher) -> Self {
        Self { store, floors, dispatcher }
    }

    pub fn floors(&self) -> FloorRange {
        self.floors
    }

    /// Assign a landing call right away.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a floor outside the building, an `idle`
    /// direction, `up` at the top floor, or `down` at the bottom floor.
    /// Store errors (gate timeout, persistence) otherwise.
    pub fn submit_call(&self, floor: Floor, direction: Direction) -> ControlResult<CallOutcome> {
        self.floors.check_call(floor, direction)?;
        let request = ExternalRequest::new(floor, direction);

        self.store.with_exclusive_access(|state| {
            match self.dispatcher.assign(&request, &mut state.lifts) {
                Ok(a) => {
                    let lift_id = state.lifts[a.lift].id;
                    let status = CallStatus::from(a.status);
                    info!(%lift_id, floor, %direction, status = status.as_str(), "landing call");
                    Ok(CallOutcome { lift_id: Some(lift_id), status })
                }
                Err(e) => {
                    debug!(%e, "landing call moved to backlog");
                    if !state.is_pending(&request) {
                        state.pending.push(request);
                    }
                    Ok(CallOutcome { lift_id: None, status: CallStatus::Pending })
                }
            }
        })
    }

    /// Leave a landing call for the next tick's backlog drain.
    ///
    /// # Errors
    ///
    /// Same validation as [`submit_call`][Self::submit_call].
    pub fn submit_deferred_call(
        &self,
        floor:     Floor,
        direction: Direction,
    ) -> ControlResult<DeferredStatus> {
        self.floors.check_call(floor, direction)?;
        let request = ExternalRequest::new(floor, direction);

        self.store.with_exclusive_access(|state| {
            if state.is_pending(&request) || state.lift_with_call(floor, direction).is_some() {
                return Ok(DeferredStatus::Ignored);
            }
            state.pending.push(request);
            debug!(floor, %direction, backlog = state.pending.len(), "deferred call queued");
            Ok(DeferredStatus::Queued)
        })
    }

    /// Add in-car destinations to `lift_id`.
    ///
    /// Floors already queued as destinations on that lift are skipped, as
    /// are repeats within `destinations`.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a floor outside the building (checked first),
    /// `InvalidLiftId` for an unknown lift.
    pub fn add_destinations(
        &self,
        lift_id:      LiftId,
        destinations: &[Floor],
    ) -> ControlResult<QueueOutcome> {
        for &floor in destinations {
            self.floors.check_floor(floor)?;
        }

        self.store.with_exclusive_access(|state| {
            let lift = state.lift_mut(lift_id)?;
            for &floor in destinations {
                if !lift.has_stop(floor, None) {
                    lift.push_stop(Stop::destination(floor));
                }
            }
            info!(%lift_id, ?destinations, queued = lift.queue.len(), "destinations added");
            Ok::<_, ControlError>(QueueOutcome { lift_id, queue: lift.queue.clone() })
        })
    }

    /// Remove every stop at the given floors from `lift_id`.  A lift left
    /// with an empty queue becomes idle.
    ///
    /// # Errors
    ///
    /// `InvalidLiftId` for an unknown lift.
    pub fn cancel_destinations(
        &self,
        lift_id: LiftId,
        floors:  &[Floor],
    ) -> ControlResult<CancelOutcome> {
        self.store.with_exclusive_access(|state| {
            let lift = state.lift_mut(lift_id)?;
            let removed = lift.remove_floors(floors);
            info!(%lift_id, ?floors, removed, "destinations cancelled");
            Ok::<_, ControlError>(CancelOutcome { lift_id, queue: lift.queue.clone(), removed })
        })
    }

    /// The full shared state.  Reads without the gate.
    pub fn status(&self) -> ControlResult<SharedState> {
        Ok(self.store.snapshot()?)
    }

    /// Put every lift back at the home floor, idle, with an empty queue and
    /// an empty backlog.
    pub fn reset(&self) -> ControlResult<SharedState> {
        Ok(self.store.reset()?)
    }
}
