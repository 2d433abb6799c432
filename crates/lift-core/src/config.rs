//! Engine configuration.

use std::time::Duration;

use crate::{CoreError, CoreResult, EngineClock, Floor, FloorRange};

/// Score penalty for a lift that is heading away from a call or has already
/// passed it.  Larger than any floor distance in a normal building, so a lift
/// that can pick the call up on its current sweep always wins.
pub const DEFAULT_PENALTY: u32 = 100;

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the engine builder.  Every field has a default, so a partial file is
/// enough.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EngineConfig {
    /// Number of lifts in the bank.
    pub lift_count: usize,

    /// Floor every lift starts at after a reset.
    pub home_floor: Floor,

    /// Lowest floor served (inclusive).
    pub lowest_floor: Floor,

    /// Highest floor served (inclusive).
    pub highest_floor: Floor,

    /// Real time for one floor of travel; also the pause between ticks.
    pub travel_interval_ms: u64,

    /// Door opening time after an arrival.
    pub door_open_ms: u64,

    /// Door closing time after an arrival.
    pub door_close_ms: u64,

    /// Longest any caller waits for the shared-state gate before giving up
    /// with a retryable timeout.
    pub gate_timeout_ms: u64,

    /// Penalty added to a lift's score when it would have to turn around to
    /// serve a call.
    pub scoring_penalty: u32,

    /// Emit a state snapshot to observers every N ticks.  0 disables
    /// snapshots.
    pub output_interval_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lift_count:            4,
            home_floor:            -4,
            lowest_floor:          -4,
            highest_floor:         12,
            travel_interval_ms:    1_000,
            door_open_ms:          1_000,
            door_close_ms:         1_000,
            gate_timeout_ms:       5_000,
            scoring_penalty:       DEFAULT_PENALTY,
            output_interval_ticks: 1,
        }
    }
}

impl EngineConfig {
    /// Check internal consistency.
    pub fn validate(&self) -> CoreResult<()> {
        let floors = self.floors();
        if floors.is_empty() {
            return Err(CoreError::Config(format!(
                "lowest floor {} is above highest floor {}",
                self.lowest_floor, self.highest_floor
            )));
        }
        if !floors.contains(self.home_floor) {
            return Err(CoreError::Config(format!(
                "home floor {} outside {}..={}",
                self.home_floor, self.lowest_floor, self.highest_floor
            )));
        }
        if self.travel_interval_ms == 0 {
            return Err(CoreError::Config("travel interval must be non-zero".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn floors(&self) -> FloorRange {
        FloorRange::new(self.lowest_floor, self.highest_floor)
    }

    #[inline]
    pub fn travel_interval(&self) -> Duration {
        Duration::from_millis(self.travel_interval_ms)
    }

    /// Door open plus door close.
    #[inline]
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.door_open_ms.saturating_add(self.door_close_ms))
    }

    /// Dwell expressed in ticks, rounded up.
    pub fn dwell_ticks(&self) -> u32 {
        let ticks = crate::time::ticks_for(self.dwell(), self.travel_interval());
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn gate_timeout(&self) -> Duration {
        Duration::from_millis(self.gate_timeout_ms)
    }

    /// Construct an `EngineClock` pre-configured for this run.
    pub fn make_clock(&self) -> EngineClock {
        EngineClock::new(self.travel_interval())
    }
}
