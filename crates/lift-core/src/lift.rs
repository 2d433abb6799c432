//! Per-lift state: position, direction, ordered stop queue, and dwell.

use crate::{Direction, Floor, LiftId, Stop};

/// One lift car.
///
/// `queue[0]` is the next target.  Outside a tick, `direction` is `Idle`
/// exactly when `queue` is empty; use [`push_stop`][Self::push_stop] and
/// [`settle`][Self::settle] to keep it that way.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Lift {
    pub id:        LiftId,
    pub position:  Floor,
    pub direction: Direction,
    pub queue:     Vec<Stop>,

    /// Ticks the lift must still hold at its floor after an arrival (doors
    /// opening and closing).  The lift does not move while this is non-zero.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dwell_ticks: u32,
}

impl Lift {
    /// An idle lift with an empty queue at `position`.
    pub fn new(id: LiftId, position: Floor) -> Self {
        Self {
            id,
            position,
            direction:   Direction::Idle,
            queue:       Vec::new(),
            dwell_ticks: 0,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.direction.is_idle()
    }

    #[inline]
    pub fn is_dwelling(&self) -> bool {
        self.dwell_ticks > 0
    }

    #[inline]
    pub fn next_stop(&self) -> Option<&Stop> {
        self.queue.first()
    }

    /// `true` if the queue holds a stop for `floor` with exactly this
    /// direction tag.
    pub fn has_stop(&self, floor: Floor, requested_direction: Option<Direction>) -> bool {
        self.queue.iter().any(|s| s.matches(floor, requested_direction))
    }

    /// Direction the lift is about to travel: the next stop's requested
    /// direction when it has one, otherwise the current direction.
    ///
    /// Lets scoring anticipate a turn before the lift physically makes it.
    pub fn effective_direction(&self) -> Direction {
        self.queue
            .first()
            .and_then(|s| s.requested_direction)
            .unwrap_or(self.direction)
    }

    /// Append `stop`.  An idle lift is given a direction toward the stop.
    pub fn push_stop(&mut self, stop: Stop) {
        if self.direction.is_idle() {
            self.direction = Direction::towards(self.position, stop.floor);
        }
        self.queue.push(stop);
    }

    /// Remove every stop at any of `floors`.  Returns how many were removed.
    pub fn remove_floors(&mut self, floors: &[Floor]) -> usize {
        let before = self.queue.len();
        self.queue.retain(|s| !floors.contains(&s.floor));
        self.settle();
        before - self.queue.len()
    }

    /// Restore the idle invariant after the queue changed.
    ///
    /// An empty queue forces `Idle`; a non-empty queue on an idle lift gets a
    /// direction toward its head.  Returns `true` if the direction changed.
    pub fn settle(&mut self) -> bool {
        let settled = match self.queue.first() {
            None                              => Direction::Idle,
            Some(head) if self.is_idle()      => Direction::towards(self.position, head.floor),
            Some(_)                           => self.direction,
        };
        let changed = settled != self.direction;
        self.direction = settled;
        changed
    }

    /// `direction == Idle` ⇔ `queue` is empty.
    #[inline]
    pub fn idle_invariant_holds(&self) -> bool {
        self.direction.is_idle() == self.queue.is_empty()
    }
}
