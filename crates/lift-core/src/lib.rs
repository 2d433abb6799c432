//! `lift-core` — foundational types for the lift dispatch engine.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `LiftId` (1-based)                                    |
//! | [`direction`]   | `Direction` (`up` / `down` / `idle`)                  |
//! | [`floor`]       | `FloorRange`, call validation at boundary floors      |
//! | [`stop`]        | `Stop`, `ExternalRequest`                             |
//! | [`lift`]        | `Lift` — position, direction, stop queue, dwell       |
//! | [`state`]       | `SharedState` — all lifts plus the pending backlog    |
//! | [`config`]      | `EngineConfig`                                        |
//! | [`time`]        | `Tick`, `EngineClock`                                 |
//! | [`rng`]         | `CallRng` — seeded random call generation             |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `lift-store`.                                  |

pub mod config;
pub mod direction;
pub mod error;
pub mod floor;
pub mod ids;
pub mod lift;
pub mod rng;
pub mod state;
pub mod stop;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use floor::{Floor, FloorRange};
pub use ids::LiftId;
pub use lift::Lift;
pub use rng::CallRng;
pub use state::SharedState;
pub use stop::{ExternalRequest, Stop};
pub use time::{EngineClock, Tick};
