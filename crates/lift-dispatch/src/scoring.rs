//! Cost of sending a lift to a landing call.

use lift_core::config::DEFAULT_PENALTY;
use lift_core::{Direction, Floor, Lift};

/// Lift scoring with a single tunable turn-around penalty.
///
/// | Lift (effective direction)                          | Cost               |
/// |-----------------------------------------------------|--------------------|
/// | idle                                                | distance           |
/// | same direction as the call, floor not yet passed    | distance           |
/// | opposite direction, or floor already passed         | distance + penalty |
///
/// The effective direction is the next stop's requested direction when it
/// has one (see [`Lift::effective_direction`]), so a lift about to turn is
/// scored for where it is going rather than where it has been.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scoring {
    pub penalty: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self { penalty: DEFAULT_PENALTY }
    }
}

impl Scoring {
    pub fn new(penalty: u32) -> Self {
        Self { penalty }
    }

    /// Cost of `lift` serving a call at `floor` travelling `direction`.
    /// Lower is better.
    pub fn score(&self, lift: &Lift, floor: Floor, direction: Direction) -> u32 {
        let distance = lift.position.abs_diff(floor);
        let heading = lift.effective_direction();

        let on_the_way = match heading {
            Direction::Idle => true,
            Direction::Up   => direction == Direction::Up && lift.position <= floor,
            Direction::Down => direction == Direction::Down && lift.position >= floor,
        };

        if on_the_way {
            distance
        } else {
            distance.saturating_add(self.penalty)
        }
    }
}
