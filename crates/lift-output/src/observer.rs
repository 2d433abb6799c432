//! `TraceObserver<W>` — bridges `EngineObserver` to a `TraceWriter`.

use lift_core::{SharedState, Tick};
use lift_sim::{EngineObserver, TickReport};
use tracing::debug;

use crate::row::{LiftSnapshotRow, TickSummaryRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// An [`EngineObserver`] that writes lift snapshots and tick summaries to any
/// [`TraceWriter`].
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run returns, check with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> EngineObserver for TraceObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(report));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, state: &SharedState) {
        let rows: Vec<LiftSnapshotRow> = state
            .lifts
            .iter()
            .map(|lift| LiftSnapshotRow::from_lift(tick, lift))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        let result = self.writer.finish();
        debug!(%final_tick, ok = result.is_ok(), "trace finished");
        self.store_err(result);
    }
}
