//! Travel direction of a lift, and the direction requested by a call.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, Floor};

/// Direction of travel.
///
/// A lift is `Idle` exactly when its stop queue is empty.  Calls placed on a
/// landing carry `Up` or `Down`; `Idle` is never a valid call direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    #[default]
    Idle,
}

impl Direction {
    /// Direction a lift at `from` takes to reach `to`.
    ///
    /// Equal floors resolve to `Down`, matching how a freshly assigned idle
    /// lift is seeded.
    #[inline]
    pub fn towards(from: Floor, to: Floor) -> Self {
        if from < to { Direction::Up } else { Direction::Down }
    }

    #[inline]
    pub fn is_idle(self) -> bool {
        self == Direction::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::Down => "down",
            Direction::Idle => "idle",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up"   => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "idle" => Ok(Direction::Idle),
            other  => Err(CoreError::InvalidRequest(format!(
                "invalid direction {other:?}: expected \"up\", \"down\", or \"idle\""
            ))),
        }
    }
}
