//! SCAN ordering of a lift's stop queue.

use lift_core::{Direction, Floor, Stop};

/// The direction a sweep starts in.
///
/// A moving lift keeps its direction.  An idle lift heads toward its first
/// queued stop: `Up` if that stop is at or above `position`, `Down`
/// otherwise.  An idle lift with an empty queue stays `Idle`.
pub fn working_direction(queue: &[Stop], position: Floor, direction: Direction) -> Direction {
    match (direction, queue.first()) {
        (Direction::Idle, Some(first)) if first.floor >= position => Direction::Up,
        (Direction::Idle, Some(_))                                => Direction::Down,
        (d, _)                                                    => d,
    }
}

/// Reorder `queue` for a lift at `position` travelling `direction`.
///
/// Stops ahead of (or level with) the lift in the working direction come
/// first, in the order the lift reaches them: ascending when going up,
/// descending when going down.  Stops behind follow in ascending floor order
/// for the return sweep.
///
/// Both sorts are stable, so stops sharing a floor keep their relative input
/// order.  The lift's own direction is never changed here.
///
/// ```text
/// position 5, up, [2, 9, 3]  →  [9, 2, 3]
/// ```
pub fn reorder(queue: &[Stop], position: Floor, direction: Direction) -> Vec<Stop> {
    let working = working_direction(queue, position, direction);

    let (mut ahead, mut behind): (Vec<Stop>, Vec<Stop>) = queue
        .iter()
        .copied()
        .partition(|s| match working {
            Direction::Down => s.floor <= position,
            _               => s.floor >= position,
        });

    match working {
        Direction::Down => ahead.sort_by(|a, b| b.floor.cmp(&a.floor)),
        _               => ahead.sort_by_key(|s| s.floor),
    }
    behind.sort_by_key(|s| s.floor);

    ahead.extend(behind);
    ahead
}
