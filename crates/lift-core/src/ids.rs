//! Strongly typed lift identifier.
//!
//! Lift IDs are 1-based (`1..=N`) because that is what callers see; the
//! fleet itself is stored in a `Vec` indexed from zero.  Conversion between
//! the two is explicit and checked so an out-of-range ID can never silently
//! index the wrong lift.

use std::fmt;

/// Public identifier of a lift.  `LiftId(1)` is the first lift in the fleet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LiftId(pub u32);

impl LiftId {
    /// The ID of the lift stored at `index` in the fleet vector.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        LiftId(index as u32 + 1)
    }

    /// Fleet vector index for this ID, or `None` for the invalid ID `0`.
    ///
    /// Does not check the upper bound; see
    /// [`SharedState::lift_index`][crate::SharedState::lift_index].
    #[inline]
    pub fn index(self) -> Option<usize> {
        self.0.checked_sub(1).map(|i| i as usize)
    }
}

impl fmt::Display for LiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiftId({})", self.0)
    }
}

impl From<u32> for LiftId {
    #[inline]
    fn from(n: u32) -> Self {
        LiftId(n)
    }
}
