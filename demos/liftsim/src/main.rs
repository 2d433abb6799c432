//! liftsim — drives the lift dispatch engine against a JSON state file.
//!
//! ```text
//! liftsim run --state lifts.json --ticks 60 --random-calls 40 --trace-dir trace
//! liftsim run --state lifts.json --reset --script calls.csv --interval-ms 100
//! liftsim status --state lifts.json
//! liftsim reset --state lifts.json --lifts 6
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

mod cli;
mod load;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lift_output::{CsvTraceWriter, TraceObserver};
use lift_sim::{shutdown_channel, CallScript, EngineBuilder, ScriptPlayer};
use lift_store::{JsonFileBackend, StateBackend, StateStore};
use tracing::info;

use cli::{Cli, Command, RunArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match Cli::parse().command {
        Command::Run(args)              => run(args),
        Command::Status { state }       => status(&state),
        Command::Reset { state, config } => {
            let config = config.resolve()?;
            let store = StateStore::open(JsonFileBackend::new(&state), &config)?;
            let fresh = store.reset()?;
            println!("{}", serde_json::to_string_pretty(&fresh)?);
            Ok(())
        }
    }
}

fn status(path: &Path) -> Result<()> {
    let state = JsonFileBackend::new(path)
        .load()?
        .with_context(|| format!("no state stored in {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let config = args.config.resolve()?;
    info!(
        state = %args.state.display(),
        lifts = config.lift_count,
        floors = %format_args!("{}..={}", config.lowest_floor, config.highest_floor),
        interval_ms = config.travel_interval_ms,
        "starting liftsim"
    );

    let mut builder = EngineBuilder::new(config).reset_on_start(args.reset);
    if let Some(n) = args.ticks {
        builder = builder.max_ticks(n);
    }
    let mut engine = builder.build(JsonFileBackend::new(&args.state))?;
    let controller = engine.controller();

    // ── Observers ─────────────────────────────────────────────────────────
    let trace = match &args.trace_dir {
        Some(dir) => Some(TraceObserver::new(CsvTraceWriter::new(dir)?)),
        None      => None,
    };
    let script = match &args.script {
        Some(path) => {
            let script = CallScript::from_path(path)?;
            info!(entries = script.len(), path = %path.display(), "call script loaded");
            Some(ScriptPlayer::new(controller.clone(), script))
        }
        None => None,
    };
    let mut observer = (trace, script);

    // ── Load workers ──────────────────────────────────────────────────────
    let (shutdown, signal) = shutdown_channel();
    let workers = if args.random_calls > 0 {
        load::spawn_workers(
            &controller,
            args.random_calls,
            args.workers,
            args.seed,
            engine.clock.travel_interval,
            &signal,
        )
    } else {
        Vec::new()
    };

    // ── Run ───────────────────────────────────────────────────────────────
    let t0 = Instant::now();
    let end = engine.run(&mut observer, &signal);
    let elapsed = t0.elapsed();

    drop(shutdown);
    let stats = load::join_workers(workers);

    let (trace, script) = observer;
    if let Some(mut trace) = trace {
        if let Some(e) = trace.take_error() {
            return Err(e).context("writing trace output");
        }
    }
    if let Some(player) = &script {
        info!(
            submitted = player.submitted(),
            rejected = player.rejected(),
            finished = player.is_finished(),
            "call script replayed"
        );
    }
    if args.random_calls > 0 {
        info!(
            queued = stats.queued,
            already_queued = stats.already_queued,
            pending = stats.pending,
            failed = stats.failed,
            "random calls submitted"
        );
    }

    let state = controller.status()?;
    println!("Run complete: {end} in {:.2}s", elapsed.as_secs_f64());
    for lift in &state.lifts {
        println!(
            "  {}  floor {:>3}  {:<4}  queue {}",
            lift.id,
            lift.position,
            lift.direction.as_str(),
            lift.queue.len()
        );
    }
    if !state.pending.is_empty() {
        println!("  backlog: {} call(s)", state.pending.len());
    }
    Ok(())
}
