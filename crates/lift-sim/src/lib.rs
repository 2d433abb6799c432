//! `lift-sim` — the movement engine and the request controller.
//!
//! # Tick pipeline
//!
//! ```text
//! every travel interval (until shutdown or max_ticks):
//!   ① Gate      — acquire the shared-state gate, load SharedState.
//!   ② Normalize — canonical stop shapes; empty queue ⇒ idle.
//!   ③ Backlog   — drain pending calls FIFO through the Dispatcher;
//!                 unassignable calls stay, duplicates are discarded.
//!   ④ Lifts     — per lift, in fleet order:
//!                   dwelling      → count one dwell tick down
//!                   queued stops  → reorder, sync direction, move one floor
//!                   arrival       → pop queue[0], start dwell, idle if empty
//!   ⑤ Persist   — save SharedState, release the gate.
//!   ⑥ Wait      — sleep one travel interval or stop on shutdown.
//! ```
//!
//! Request handlers use a [`Controller`], which shares the engine's
//! [`StateStore`][lift_store::StateStore] and runs every mutation under the
//! same gate.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::EngineConfig;
//! use lift_sim::{EngineBuilder, NoopObserver, shutdown_channel};
//! use lift_store::JsonFileBackend;
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default())
//!     .build(JsonFileBackend::new("lifts.json"))?;
//! let controller = engine.controller();
//! controller.submit_call(3, Direction::Up)?;
//!
//! let (handle, signal) = shutdown_channel();
//! engine.run(&mut NoopObserver, &signal);
//! ```

pub mod builder;
pub mod controller;
pub mod engine;
pub mod error;
pub mod observer;
pub mod report;
pub mod script;
pub mod shutdown;


pub use builder::EngineBuilder;
pub use controller::{CallOutcome, CallStatus, CancelOutcome, Controller, DeferredStatus, QueueOutcome};
pub use engine::Engine;
pub use error::{ControlError, ControlResult, SimError, SimResult};
pub use observer::{EngineObserver, NoopObserver};
pub use report::TickReport;
pub use script::{CallScript, ScriptAction, ScriptKind, ScriptPlayer, ScriptRow};
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownSignal};
