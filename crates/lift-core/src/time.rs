//! Engine time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one floor
//! of travel: the engine moves every lift at most one floor per tick and then
//! waits one travel interval.  `EngineClock` maps ticks back to elapsed
//! real time:
//!
//!   elapsed = tick * travel_interval
//!
//! Door dwell is expressed in whole ticks (rounded up) so a lift's hold is
//! exact integer arithmetic rather than a wall-clock sleep inside the tick.

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute engine tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── EngineClock ───────────────────────────────────────────────────────────────

/// Current tick plus the real duration one tick stands for.
#[derive(Clone, Debug)]
pub struct EngineClock {
    /// Real time between two ticks (one floor of travel).
    pub travel_interval: Duration,
    /// The current tick, advanced by `EngineClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl EngineClock {
    pub fn new(travel_interval: Duration) -> Self {
        Self {
            travel_interval,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Real time represented by the ticks elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.travel_interval
            .saturating_mul(u32::try_from(self.current_tick.0).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for EngineClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed().as_secs_f64())
    }
}

/// Whole ticks of length `interval` covering `duration`, rounded up.
///
/// A zero interval makes every non-zero duration one tick.
pub(crate) fn ticks_for(duration: Duration, interval: Duration) -> u64 {
    let interval_ms = interval.as_millis();
    let duration_ms = duration.as_millis();
    if duration_ms == 0 {
        return 0;
    }
    if interval_ms == 0 {
        return 1;
    }
    u64::try_from(duration_ms.div_ceil(interval_ms)).unwrap_or(u64::MAX)
}
