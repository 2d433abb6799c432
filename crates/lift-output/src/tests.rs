//! Tests for lift-output.

use std::path::Path;

use lift_core::{Direction, EngineConfig, Lift, LiftId, SharedState, Stop, Tick};
use lift_sim::{EngineBuilder, EngineObserver, TickReport};
use lift_store::MemoryBackend;

use crate::{
    CsvTraceWriter, LiftSnapshotRow, OutputError, OutputResult, TickSummaryRow, TraceObserver,
    TraceWriter,
};

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(String::from).collect();
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

/// Writer whose writes always fail.
struct BrokenWriter {
    finished: usize,
}

impl TraceWriter for BrokenWriter {
    fn write_snapshots(&mut self, _rows: &[LiftSnapshotRow]) -> OutputResult<()> {
        Err(OutputError::Io(std::io::Error::other("snapshot sink gone")))
    }

    fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
        Err(OutputError::Io(std::io::Error::other("summary sink gone")))
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished += 1;
        Ok(())
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::*;

    #[test]
    fn snapshot_row_reads_head_of_queue() {
        let mut lift = Lift::new(LiftId(2), 4);
        lift.push_stop(Stop::call(9, Direction::Down));
        lift.push_stop(Stop::destination(1));
        lift.dwell_ticks = 1;

        let row = LiftSnapshotRow::from_lift(Tick(12), &lift);
        assert_eq!(row.tick, 12);
        assert_eq!(row.lift_id, 2);
        assert_eq!(row.direction, Direction::Up);
        assert_eq!(row.queue_len, 2);
        assert_eq!(row.next_floor, Some(9));
        assert_eq!(row.dwell_ticks, 1);
    }

    #[test]
    fn summary_row_counts_report_lists() {
        let report = TickReport {
            tick:       Tick(3),
            normalized: 0,
            assigned:   2,
            discarded:  1,
            pending:    4,
            moved:      vec![LiftId(1), LiftId(3)],
            arrivals:   vec![(LiftId(3), 7)],
        };
        let row = TickSummaryRow::from(&report);
        assert_eq!(
            row,
            TickSummaryRow { tick: 3, assigned: 2, discarded: 1, pending: 4, moved: 2, arrivals: 1 }
        );
    }
}

// ── CsvTraceWriter ────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_writer {
    use super::*;

    #[test]
    fn creates_directory_and_headers() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("trace");

        let mut writer = CsvTraceWriter::new(&out).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();

        let (headers, rows) = read_rows(&out.join("lift_snapshots.csv"));
        assert_eq!(
            headers,
            ["tick", "lift_id", "position", "direction", "queue_len", "next_floor", "dwell_ticks"]
        );
        assert!(rows.is_empty());

        let (headers, _) = read_rows(&out.join("tick_summaries.csv"));
        assert_eq!(headers, ["tick", "assigned", "discarded", "pending", "moved", "arrivals"]);
    }

    #[test]
    fn empty_queue_leaves_next_floor_blank() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvTraceWriter::new(dir.path()).unwrap();
        let state = SharedState::fresh(1, 0);
        writer
            .write_snapshots(&[LiftSnapshotRow::from_lift(Tick(0), &state.lifts[0])])
            .unwrap();
        writer.finish().unwrap();

        let (_, rows) = read_rows(&dir.path().join("lift_snapshots.csv"));
        assert_eq!(rows, vec![vec!["0", "1", "0", "idle", "0", "", "0"]]);
    }
}

// ── TraceObserver ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;

    #[test]
    fn engine_run_writes_snapshots_and_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig { lift_count: 2, ..EngineConfig::default() };
        let mut engine = EngineBuilder::new(config).build(MemoryBackend::new()).unwrap();
        engine.controller().submit_call(3, Direction::Up).unwrap();

        let mut obs = TraceObserver::new(CsvTraceWriter::new(dir.path()).unwrap());
        engine.run_ticks(3, &mut obs);
        assert!(obs.take_error().is_none());

        let (_, snapshots) = read_rows(&dir.path().join("lift_snapshots.csv"));
        assert_eq!(snapshots.len(), 6);
        assert_eq!(snapshots[0], vec!["0", "1", "-3", "up", "1", "3", "0"]);
        assert_eq!(snapshots[1], vec!["0", "2", "-4", "idle", "0", "", "0"]);
        assert_eq!(snapshots[4][..3], ["2", "1", "-1"]);

        let (_, summaries) = read_rows(&dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0], vec!["0", "0", "0", "0", "1", "0"]);
    }

    #[test]
    fn first_write_error_is_kept() {
        let mut obs = TraceObserver::new(BrokenWriter { finished: 0 });
        obs.on_tick_end(&TickReport::new(Tick(0)));
        obs.on_snapshot(Tick(0), &SharedState::fresh(1, 0));
        obs.on_run_end(Tick(1));

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("summary sink gone"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().finished, 1);
    }

    #[test]
    fn empty_fleet_writes_no_snapshot_rows() {
        let mut obs = TraceObserver::new(BrokenWriter { finished: 0 });
        obs.on_snapshot(Tick(0), &SharedState::fresh(0, 0));
        assert!(obs.take_error().is_none());
    }
}
