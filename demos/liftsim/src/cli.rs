//! Command-line interface and configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lift_core::EngineConfig;

#[derive(Parser)]
#[command(name = "liftsim", about = "Lift bank dispatch engine driver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the engine against a state file.
    Run(RunArgs),

    /// Print the stored state as JSON.
    Status {
        /// Shared state file
        #[arg(short, long, default_value = "lifts.json")]
        state: PathBuf,
    },

    /// Put every lift back at the home floor with empty queues.
    Reset {
        /// Shared state file
        #[arg(short, long, default_value = "lifts.json")]
        state: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Shared state file
    #[arg(short, long, default_value = "lifts.json")]
    pub state: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Stop after this many ticks (default: run until killed)
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Start from a fresh fleet instead of the stored state
    #[arg(long)]
    pub reset: bool,

    /// CSV call script replayed during the run
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Directory for lift_snapshots.csv and tick_summaries.csv
    #[arg(long)]
    pub trace_dir: Option<PathBuf>,

    /// Random landing calls fired from worker threads during the run
    #[arg(long, default_value_t = 0)]
    pub random_calls: usize,

    /// Worker threads sharing the random calls
    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// Seed for the random call generators
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Engine configuration: an optional JSON file plus flag overrides.
#[derive(Args)]
pub struct ConfigArgs {
    /// JSON engine configuration (camelCase keys; missing keys use defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of lifts
    #[arg(long)]
    pub lifts: Option<usize>,

    /// Override the travel interval (ms per floor and between ticks)
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

impl ConfigArgs {
    /// Load, override, and validate.
    pub fn resolve(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None       => EngineConfig::default(),
        };
        if let Some(n) = self.lifts {
            config.lift_count = n;
        }
        if let Some(ms) = self.interval_ms {
            config.travel_interval_ms = ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
