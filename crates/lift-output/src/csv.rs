//! CSV trace backend.
//!
//! Creates two files in the configured output directory:
//! - `lift_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{LiftSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_FILE: &str = "lift_snapshots.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes engine traces to two CSV files.
pub struct CsvTraceWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Create `dir` if needed, open (truncating) the two CSV files, and write
    /// the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record([
            "tick", "lift_id", "position", "direction", "queue_len", "next_floor", "dwell_ticks",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["tick", "assigned", "discarded", "pending", "moved", "arrivals"])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_snapshots(&mut self, rows: &[LiftSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.lift_id.to_string(),
                row.position.to_string(),
                row.direction.as_str().to_string(),
                row.queue_len.to_string(),
                row.next_floor.map(|f| f.to_string()).unwrap_or_default(),
                row.dwell_ticks.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.assigned.to_string(),
            row.discarded.to_string(),
            row.pending.to_string(),
            row.moved.to_string(),
            row.arrivals.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
