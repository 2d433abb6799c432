//! Unit tests for lift-dispatch.

use lift_core::{Direction, ExternalRequest, Floor, Lift, LiftId, Stop};

fn floors(q: &[Stop]) -> Vec<Floor> {
    q.iter().map(|s| s.floor).collect()
}

fn dest(list: &[Floor]) -> Vec<Stop> {
    list.iter().map(|&f| Stop::destination(f)).collect()
}

/// Lift `id` at `position`, moving `direction` (queue left empty).
fn lift_at(id: u32, position: Floor, direction: Direction) -> Lift {
    Lift { direction, ..Lift::new(LiftId(id), position) }
}

fn call(floor: Floor, direction: Direction) -> ExternalRequest {
    ExternalRequest::at(floor, direction, 0)
}

#[cfg(test)]
mod reorder {
    use super::*;
    use crate::{reorder, working_direction};

    #[test]
    fn up_sweep_then_return_ascending() {
        let q = reorder(&dest(&[2, 9, 3]), 5, Direction::Up);
        assert_eq!(floors(&q), vec![9, 2, 3]);
    }

    #[test]
    fn down_sweep_descending_then_return_ascending() {
        let q = reorder(&dest(&[7, 2, 4, 9]), 5, Direction::Down);
        assert_eq!(floors(&q), vec![4, 2, 7, 9]);
    }

    #[test]
    fn current_floor_counts_as_ahead() {
        assert_eq!(floors(&reorder(&dest(&[8, 5, 1]), 5, Direction::Up)), vec![5, 8, 1]);
        assert_eq!(floors(&reorder(&dest(&[8, 5, 1]), 5, Direction::Down)), vec![5, 1, 8]);
    }

    #[test]
    fn idle_lift_heads_for_first_stop() {
        assert_eq!(working_direction(&dest(&[3, 8]), 5, Direction::Idle), Direction::Down);
        assert_eq!(floors(&reorder(&dest(&[3, 8]), 5, Direction::Idle)), vec![3, 8]);

        assert_eq!(working_direction(&dest(&[8, 3]), 5, Direction::Idle), Direction::Up);
        assert_eq!(floors(&reorder(&dest(&[8, 3]), 5, Direction::Idle)), vec![8, 3]);

        // First stop level with the lift counts as up.
        assert_eq!(working_direction(&dest(&[5, 3]), 5, Direction::Idle), Direction::Up);
    }

    #[test]
    fn equal_floors_keep_input_order() {
        let input = vec![
            Stop::call(7, Direction::Down),
            Stop::destination(3),
            Stop::destination(7),
            Stop::call(3, Direction::Up),
        ];
        let q = reorder(&input, 0, Direction::Up);
        assert_eq!(q, vec![
            Stop::destination(3),
            Stop::call(3, Direction::Up),
            Stop::call(7, Direction::Down),
            Stop::destination(7),
        ]);
    }

    #[test]
    fn deterministic() {
        let input = dest(&[4, -2, 11, 0, 6, -4]);
        assert_eq!(reorder(&input, 1, Direction::Down), reorder(&input, 1, Direction::Down));
    }

    #[test]
    fn empty_queue() {
        assert!(reorder(&[], 3, Direction::Idle).is_empty());
        assert_eq!(working_direction(&[], 3, Direction::Idle), Direction::Idle);
    }

    #[test]
    fn no_stops_lost() {
        let input = dest(&[4, -2, 11, 0, 6, -4, 4]);
        let mut out = floors(&reorder(&input, 2, Direction::Up));
        let mut expected = floors(&input);
        out.sort_unstable();
        expected.sort_unstable();
        assert_eq!(out, expected);
    }
}

#[cfg(test)]
mod scoring {
    use super::*;
    use crate::Scoring;

    #[test]
    fn idle_lift_costs_distance() {
        let s = Scoring::default();
        assert_eq!(s.score(&lift_at(1, -4, Direction::Idle), 3, Direction::Up), 7);
        assert_eq!(s.score(&lift_at(1, 6, Direction::Idle), 3, Direction::Up), 3);
    }

    #[test]
    fn same_direction_not_passed_costs_distance() {
        let s = Scoring::default();
        assert_eq!(s.score(&lift_at(1, 0, Direction::Up), 4, Direction::Up), 4);
        assert_eq!(s.score(&lift_at(1, 9, Direction::Down), 4, Direction::Down), 5);
        // Level with the floor counts as not passed.
        assert_eq!(s.score(&lift_at(1, 4, Direction::Up), 4, Direction::Up), 0);
    }

    #[test]
    fn passed_floor_pays_penalty() {
        let s = Scoring::new(100);
        assert_eq!(s.score(&lift_at(1, 6, Direction::Up), 4, Direction::Up), 102);
        assert_eq!(s.score(&lift_at(1, 2, Direction::Down), 4, Direction::Down), 102);
    }

    #[test]
    fn opposite_direction_pays_penalty() {
        let s = Scoring::new(25);
        assert_eq!(s.score(&lift_at(1, 0, Direction::Up), 4, Direction::Down), 29);
    }

    #[test]
    fn next_stop_tag_overrides_current_direction() {
        // Physically going up toward a down-call at 9: scored as heading down.
        let mut l = lift_at(1, 2, Direction::Idle);
        l.push_stop(Stop::call(9, Direction::Down));
        assert_eq!(l.direction, Direction::Up);

        let s = Scoring::new(100);
        assert_eq!(s.score(&l, 5, Direction::Up), 103);
        assert_eq!(s.score(&l, 1, Direction::Down), 1);
    }
}

#[cfg(test)]
mod dispatcher {
    use super::*;
    use crate::{AssignStatus, DispatchError, Dispatcher, Scoring};

    fn idle_fleet(n: u32, position: Floor) -> Vec<Lift> {
        (1..=n).map(|id| lift_at(id, position, Direction::Idle)).collect()
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let mut lifts = idle_fleet(4, -4);
        let a = Dispatcher::default().assign(&call(3, Direction::Up), &mut lifts).unwrap();
        assert_eq!(a.lift, 0);
        assert_eq!(a.status, AssignStatus::Queued);
        assert_eq!(lifts[0].queue, vec![Stop::call(3, Direction::Up)]);
        assert_eq!(lifts[0].direction, Direction::Up);
        assert!(lifts[1..].iter().all(|l| l.queue.is_empty() && l.is_idle()));
    }

    #[test]
    fn duplicate_call_not_requeued() {
        let mut lifts = idle_fleet(4, -4);
        let d = Dispatcher::default();
        let first = d.assign(&call(3, Direction::Up), &mut lifts).unwrap();
        let second = d.assign(&call(3, Direction::Up), &mut lifts).unwrap();
        assert_eq!(second.lift, first.lift);
        assert_eq!(second.status, AssignStatus::AlreadyQueued);
        let total: usize = lifts.iter().map(|l| l.queue.len()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn same_floor_other_direction_is_not_duplicate() {
        let mut lifts = idle_fleet(1, 0);
        lifts[0].push_stop(Stop::destination(3));
        let d = Dispatcher::default();
        assert_eq!(d.assign(&call(3, Direction::Up), &mut lifts).unwrap().status, AssignStatus::Queued);
        assert_eq!(d.assign(&call(3, Direction::Down), &mut lifts).unwrap().status, AssignStatus::Queued);
        assert_eq!(lifts[0].queue.len(), 3);
    }

    #[test]
    fn prefers_lift_on_its_way() {
        // Lift 1 is closer but heading away; lift 2 will pass floor 5 going up.
        let mut lifts = vec![lift_at(1, 6, Direction::Up), lift_at(2, 0, Direction::Up)];
        lifts[0].queue.push(Stop::destination(10));
        lifts[1].queue.push(Stop::destination(9));
        let a = Dispatcher::default().assign(&call(5, Direction::Up), &mut lifts).unwrap();
        assert_eq!(a.lift, 1);
        // A moving lift keeps its direction.
        assert_eq!(lifts[1].direction, Direction::Up);
    }

    #[test]
    fn idle_lift_seeded_toward_call() {
        let mut lifts = idle_fleet(1, 8);
        Dispatcher::default().assign(&call(2, Direction::Up), &mut lifts).unwrap();
        assert_eq!(lifts[0].direction, Direction::Down);
    }

    #[test]
    fn empty_fleet_is_unassignable() {
        let mut lifts: Vec<Lift> = vec![];
        let err = Dispatcher::default().assign(&call(2, Direction::Up), &mut lifts).unwrap_err();
        assert!(matches!(err, DispatchError::Unassignable { floor: 2, direction: Direction::Up }));
    }

    #[test]
    fn select_is_deterministic_and_pure() {
        let mut lifts = vec![
            lift_at(1, 3, Direction::Down),
            lift_at(2, -1, Direction::Up),
            lift_at(3, 10, Direction::Idle),
        ];
        lifts[0].queue.push(Stop::destination(-4));
        lifts[1].queue.push(Stop::destination(12));
        let before = lifts.clone();
        let d = Dispatcher::new(Scoring::new(100));
        let r = call(6, Direction::Up);
        let first = d.select(&r, &lifts).unwrap();
        for _ in 0..10 {
            assert_eq!(d.select(&r, &lifts).unwrap(), first);
        }
        assert_eq!(lifts, before);
        // Idle lift 3 (cost 4) beats lift 2 on its way up (cost 7) and
        // lift 1 heading down (cost 103).
        assert_eq!(first.lift, 2);
    }
}
