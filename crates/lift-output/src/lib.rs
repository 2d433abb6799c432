//! `lift-output` — trace writers for the lift dispatch engine.
//!
//! | Backend | Files created                                  |
//! |---------|------------------------------------------------|
//! | CSV     | `lift_snapshots.csv`, `tick_summaries.csv`     |
//!
//! Writers implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `lift_sim::EngineObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer);
//! engine.run(&mut obs, &signal);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{LiftSnapshotRow, TickSummaryRow};
pub use writer::TraceWriter;
