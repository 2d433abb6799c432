//! Call scripts: timed requests replayed through a [`Controller`].
//!
//! A script is a CSV file with the header `tick,kind,floor,direction,lift_id`:
//!
//! ```text
//! tick,kind,floor,direction,lift_id
//! 0,call,3,up,
//! 0,deferred,7,down,
//! 2,inside,10,,1
//! 5,cancel,10,,1
//! ```
//!
//! `call` and `deferred` rows need a direction; `inside` and `cancel` rows
//! need a lift id.  Rows are submitted at the start of their tick, before the
//! engine takes the gate, in file order within a tick.

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use lift_core::{Direction, Floor, LiftId, Tick};
use lift_store::StateBackend;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{ControlResult, Controller, EngineObserver, SimError, SimResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Call,
    Deferred,
    Inside,
    Cancel,
}

/// One CSV record as written.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ScriptRow {
    pub tick:      u64,
    pub kind:      ScriptKind,
    pub floor:     Floor,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub lift_id:   Option<u32>,
}

/// A validated script entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScriptAction {
    Call { floor: Floor, direction: Direction },
    Deferred { floor: Floor, direction: Direction },
    Inside { lift: LiftId, floor: Floor },
    Cancel { lift: LiftId, floor: Floor },
}

impl ScriptRow {
    fn into_action(self) -> Result<(Tick, ScriptAction), String> {
        let floor = self.floor;
        let action = match (self.kind, self.direction, self.lift_id) {
            (ScriptKind::Call, Some(direction), _)     => ScriptAction::Call { floor, direction },
            (ScriptKind::Deferred, Some(direction), _) => ScriptAction::Deferred { floor, direction },
            (ScriptKind::Inside, _, Some(id))          => ScriptAction::Inside { lift: LiftId(id), floor },
            (ScriptKind::Cancel, _, Some(id))          => ScriptAction::Cancel { lift: LiftId(id), floor },
            (ScriptKind::Call | ScriptKind::Deferred, None, _) => {
                return Err(format!("{:?} row needs a direction", self.kind).to_lowercase());
            }
            (ScriptKind::Inside | ScriptKind::Cancel, _, None) => {
                return Err(format!("{:?} row needs a lift_id", self.kind).to_lowercase());
            }
        };
        Ok((Tick(self.tick), action))
    }
}

/// A parsed script, ordered by tick (stable within a tick).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallScript {
    pub entries: Vec<(Tick, ScriptAction)>,
}

impl CallScript {
    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| SimError::Script {
            line:   0,
            reason: format!("cannot open {}: {e}", path.as_ref().display()),
        })?;
        Self::from_reader(file)
    }

    /// Parse a script from any reader.
    ///
    /// # Errors
    ///
    /// [`SimError::Script`] naming the first malformed line.
    pub fn from_reader<R: io::Read>(reader: R) -> SimResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers().map_err(script_err)?.clone();

        let mut entries = Vec::new();
        let mut record = csv::StringRecord::new();
        while rdr.read_record(&mut record).map_err(script_err)? {
            let line = record.position().map_or(0, |p| p.line());
            let row: ScriptRow = record
                .deserialize(Some(&headers))
                .map_err(|e| SimError::Script { line, reason: e.to_string() })?;
            let entry = row
                .into_action()
                .map_err(|reason| SimError::Script { line, reason })?;
            entries.push(entry);
        }

        entries.sort_by_key(|&(tick, _)| tick);
        debug!(entries = entries.len(), "call script loaded");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn script_err(e: csv::Error) -> SimError {
    SimError::Script {
        line:   e.position().map_or(0, |p| p.line()),
        reason: e.to_string(),
    }
}

// ── ScriptPlayer ──────────────────────────────────────────────────────────────

/// An [`EngineObserver`] that submits each script entry at the start of its
/// tick.
///
/// A rejected entry (invalid floor, unknown lift, gate timeout) is logged and
/// counted; replay continues with the next one.
pub struct ScriptPlayer<B: StateBackend> {
    controller: Controller<B>,
    remaining:  VecDeque<(Tick, ScriptAction)>,
    submitted:  usize,
    rejected:   usize,
}

impl<B: StateBackend> ScriptPlayer<B> {
    pub fn new(controller: Controller<B>, script: CallScript) -> Self {
        Self {
            controller,
            remaining: script.entries.into(),
            submitted: 0,
            rejected:  0,
        }
    }

    /// Entries accepted by the controller so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Entries the controller rejected so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    fn apply(&self, action: ScriptAction) -> ControlResult<()> {
        match action {
            ScriptAction::Call { floor, direction } => {
                self.controller.submit_call(floor, direction)?;
            }
            ScriptAction::Deferred { floor, direction } => {
                self.controller.submit_deferred_call(floor, direction)?;
            }
            ScriptAction::Inside { lift, floor } => {
                self.controller.add_destinations(lift, &[floor])?;
            }
            ScriptAction::Cancel { lift, floor } => {
                self.controller.cancel_destinations(lift, &[floor])?;
            }
        }
        Ok(())
    }
}

impl<B: StateBackend> EngineObserver for ScriptPlayer<B> {
    fn on_tick_start(&mut self, tick: Tick) {
        while self.remaining.front().is_some_and(|&(at, _)| at <= tick) {
            let Some((_, action)) = self.remaining.pop_front() else { break };
            match self.apply(action) {
                Ok(()) => self.submitted += 1,
                Err(e) => {
                    warn!(%tick, ?action, error = %e, "script entry rejected");
                    self.rejected += 1;
                }
            }
        }
    }
}
