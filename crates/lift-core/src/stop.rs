//! Queue entries (`Stop`) and landing calls waiting for a lift
//! (`ExternalRequest`).

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Direction, Floor};

// ── Stop ──────────────────────────────────────────────────────────────────────

/// A floor a lift must visit.
///
/// `requested_direction` is the travel direction of the landing call that
/// produced the stop, or `None` for a destination chosen inside the car.  It
/// is only ever `Some(Up)` or `Some(Down)`; constructors fold `Idle` into
/// `None`.
///
/// With the `serde` feature, older state files are accepted on read: a bare
/// integer floor, the field names `reqFloor` / `reqDirection`, and the tag
/// `"idle"` as the "no preference" marker.  Writing always uses the canonical
/// `{ "floor", "requestedDirection" }` shape.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StopRepr", rename_all = "camelCase"))]
pub struct Stop {
    pub floor:               Floor,
    pub requested_direction: Option<Direction>,
}

impl Stop {
    /// Build a stop, folding an `Idle` direction into "no preference".
    #[inline]
    pub fn new(floor: Floor, requested_direction: Option<Direction>) -> Self {
        Self {
            floor,
            requested_direction: requested_direction.filter(|d| !d.is_idle()),
        }
    }

    /// A stop produced by a landing call travelling `direction`.
    #[inline]
    pub fn call(floor: Floor, direction: Direction) -> Self {
        Self::new(floor, Some(direction))
    }

    /// A destination pressed inside the car.
    #[inline]
    pub fn destination(floor: Floor) -> Self {
        Self { floor, requested_direction: None }
    }

    /// `true` if this stop is the same floor with the same direction tag.
    #[inline]
    pub fn matches(&self, floor: Floor, requested_direction: Option<Direction>) -> bool {
        self.floor == floor && self.requested_direction == requested_direction
    }

    /// Rewrite a stray `Some(Idle)` (set through the public field) to `None`.
    /// Returns `true` if the stop changed.
    pub fn canonicalize(&mut self) -> bool {
        if self.requested_direction == Some(Direction::Idle) {
            self.requested_direction = None;
            true
        } else {
            false
        }
    }
}

/// Every stop shape ever written to a state file.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum StopRepr {
    Bare(Floor),
    Full {
        #[serde(alias = "reqFloor")]
        floor: Floor,
        #[serde(default, rename = "requestedDirection", alias = "reqDirection")]
        requested_direction: Option<Direction>,
    },
}

#[cfg(feature = "serde")]
impl From<StopRepr> for Stop {
    fn from(repr: StopRepr) -> Self {
        match repr {
            StopRepr::Bare(floor) => Stop::destination(floor),
            StopRepr::Full { floor, requested_direction } => Stop::new(floor, requested_direction),
        }
    }
}

// ── ExternalRequest ───────────────────────────────────────────────────────────

/// A landing call waiting in the backlog for a lift.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExternalRequest {
    #[cfg_attr(feature = "serde", serde(alias = "current_floor"))]
    pub current_floor: Floor,
    pub direction:     Direction,
    /// Unix seconds at submission.
    #[cfg_attr(feature = "serde", serde(default, alias = "ts"))]
    pub timestamp:     u64,
}

impl ExternalRequest {
    /// A call stamped with the current wall-clock time.
    pub fn new(current_floor: Floor, direction: Direction) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::at(current_floor, direction, timestamp)
    }

    /// A call with an explicit timestamp (tests, replayed scripts).
    pub fn at(current_floor: Floor, direction: Direction, timestamp: u64) -> Self {
        Self { current_floor, direction, timestamp }
    }

    /// The queue entry this call becomes once assigned.
    #[inline]
    pub fn to_stop(&self) -> Stop {
        Stop::call(self.current_floor, self.direction)
    }

    /// `true` if `other` asks for the same floor and direction.
    #[inline]
    pub fn same_call(&self, other: &ExternalRequest) -> bool {
        self.current_floor == other.current_floor && self.direction == other.direction
    }
}
