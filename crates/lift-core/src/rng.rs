//! Deterministic RNG for generating landing calls.
//!
//! # Determinism strategy
//!
//! Load generators fire calls from several threads at once.  Each worker gets
//! its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (worker * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive worker indices across the seed space.  A run
//! with the same seed and worker count always produces the same calls, even
//! though the order in which they reach the store depends on scheduling.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Direction, Floor, FloorRange};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-worker RNG producing valid landing calls.
pub struct CallRng(SmallRng);

impl CallRng {
    /// Seed deterministically from the run's global seed and a worker index.
    pub fn new(global_seed: u64, worker: u64) -> Self {
        let seed = global_seed ^ worker.wrapping_mul(MIXING_CONSTANT);
        CallRng(SmallRng::seed_from_u64(seed))
    }

    /// A uniformly random floor in `floors`.
    pub fn floor(&mut self, floors: FloorRange) -> Floor {
        self.0.gen_range(floors.lowest..=floors.highest)
    }

    /// A random call that passes [`FloorRange::check_call`].
    ///
    /// Calls at the lowest floor always go up and calls at the highest floor
    /// always go down.  A single-floor building has no valid call, so the
    /// result is that floor going `Up` and will be rejected by validation.
    pub fn call(&mut self, floors: FloorRange) -> (Floor, Direction) {
        let floor = self.floor(floors);
        let direction = if floor == floors.lowest {
            Direction::Up
        } else if floor == floors.highest {
            Direction::Down
        } else if self.0.gen_bool(0.5) {
            Direction::Up
        } else {
            Direction::Down
        };
        (floor, direction)
    }
}
