//! The `TraceWriter` trait implemented by trace backends.

use crate::{LiftSnapshotRow, OutputResult, TickSummaryRow};

/// Sink for engine trace rows.
///
/// Errors are stored by [`TraceObserver`][crate::TraceObserver] and
/// retrieved with [`take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    /// Write one row per lift for a snapshot tick.
    fn write_snapshots(&mut self, rows: &[LiftSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush everything.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
