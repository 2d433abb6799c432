//! `lift-store` — the shared state store and its mutual-exclusion gate.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`gate`]    | `Gate` — process-wide exclusive gate with bounded acquisition     |
//! | [`lock`]    | `FileLock` — advisory lock file shared across processes           |
//! | [`backend`] | `StateBackend` trait — load / save a `SharedState`                |
//! | [`json`]    | `JsonFileBackend` — one JSON document, written via temp + rename  |
//! | [`memory`]  | `MemoryBackend` — in-process backend for tests and embedding      |
//! | [`store`]   | `StateStore<B>` — gate + backend behind `with_exclusive_access`   |
//! | [`error`]   | `StoreError`, `StoreResult<T>`                                    |
//!
//! # Access model
//!
//! Every mutation (engine tick, landing call, destination, cancellation,
//! reset) runs as one unit:
//!
//! 1. acquire the gate, then the backend's lock file if it has one (each
//!    bounded by the configured timeout),
//! 2. load the state from the backend,
//! 3. run the caller's closure on `&mut SharedState`,
//! 4. save the state if the closure succeeded,
//! 5. release both when the guards drop, on every exit path.
//!
//! The status query ([`StateStore::snapshot`]) is the one read that skips
//! the gate.  It can observe state between two mutations but never a
//! half-written file, because the JSON backend replaces the file atomically.

pub mod backend;
pub mod error;
pub mod gate;
pub mod json;
pub mod lock;
pub mod memory;
pub mod store;

#[cfg(test)]
mod tests;

pub use backend::StateBackend;
pub use error::{StoreError, StoreResult};
pub use gate::{Gate, GateGuard};
pub use json::JsonFileBackend;
pub use lock::FileLock;
pub use memory::MemoryBackend;
pub use store::StateStore;
