//! Floor numbering and the operational floor range.

use crate::{CoreError, CoreResult, Direction};

/// A floor number.  Basements are negative; the ground floor is `0`.
pub type Floor = i32;

/// Inclusive range of floors the building serves.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FloorRange {
    pub lowest:  Floor,
    pub highest: Floor,
}

impl FloorRange {
    pub const fn new(lowest: Floor, highest: Floor) -> Self {
        Self { lowest, highest }
    }

    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        (self.lowest..=self.highest).contains(&floor)
    }

    /// Number of floors served.  Zero for an inverted range.
    pub fn len(&self) -> usize {
        if self.highest < self.lowest {
            0
        } else {
            (self.highest.abs_diff(self.lowest) as usize).saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject a destination floor outside the building.
    pub fn check_floor(&self, floor: Floor) -> CoreResult<()> {
        if self.contains(floor) {
            Ok(())
        } else {
            Err(CoreError::InvalidRequest(format!(
                "floor {floor} outside {}..={}",
                self.lowest, self.highest
            )))
        }
    }

    /// Validate a landing call.
    ///
    /// The direction must be `Up` or `Down`, the floor must be in range, and
    /// the call must be physically possible: nobody can travel down from the
    /// lowest floor or up from the highest.
    pub fn check_call(&self, floor: Floor, direction: Direction) -> CoreResult<()> {
        self.check_floor(floor)?;
        match direction {
            Direction::Idle => Err(CoreError::InvalidRequest(
                "a landing call needs a direction (up or down)".into(),
            )),
            Direction::Up if floor == self.highest => Err(CoreError::InvalidRequest(format!(
                "top floor {floor}: cannot go up"
            ))),
            Direction::Down if floor == self.lowest => Err(CoreError::InvalidRequest(format!(
                "bottom floor {floor}: cannot go down"
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for FloorRange {
    /// Four basement levels up to floor 12.
    fn default() -> Self {
        Self::new(-4, 12)
    }
}
