//! Fluent builder for constructing an [`Engine`].

use std::sync::Arc;

use lift_core::EngineConfig;
use lift_dispatch::{Dispatcher, Scoring};
use lift_store::{StateBackend, StateStore};
use tracing::info;

use crate::{Engine, SimResult};

/// Fluent builder for [`Engine<B>`].
///
/// # Required inputs
///
/// - [`EngineConfig`]: fleet size, floor range, timings, penalty, …
/// - a backend (`build`) or an already-open store (`build_with_store`)
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                          |
/// |------------------------|----------------------------------|
/// | `.scoring(s)`          | `config.scoring_penalty`         |
/// | `.max_ticks(n)`        | run until shutdown               |
/// | `.reset_on_start(b)`   | `false` (keep the stored state)  |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config)
///     .max_ticks(100)
///     .reset_on_start(true)
///     .build(JsonFileBackend::new("lifts.json"))?;
/// engine.run(&mut NoopObserver, &ShutdownSignal::never());
/// ```
pub struct EngineBuilder {
    config:         EngineConfig,
    scoring:        Option<Scoring>,
    max_ticks:      Option<u64>,
    reset_on_start: bool,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            scoring:        None,
            max_ticks:      None,
            reset_on_start: false,
        }
    }

    /// Override the scoring derived from `config.scoring_penalty`.
    pub fn scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = Some(scoring);
        self
    }

    /// Stop [`Engine::run`] after `n` ticks.
    pub fn max_ticks(mut self, n: u64) -> Self {
        self.max_ticks = Some(n);
        self
    }

    /// Replace whatever the backend holds with a fresh fleet before the
    /// first tick.
    pub fn reset_on_start(mut self, reset: bool) -> Self {
        self.reset_on_start = reset;
        self
    }

    /// Validate the configuration, open a store over `backend`, and return a
    /// ready-to-run [`Engine`].
    pub fn build<B: StateBackend>(self, backend: B) -> SimResult<Engine<B>> {
        self.config.validate()?;
        let store = StateStore::open(backend, &self.config)?;
        self.build_with_store(Arc::new(store))
    }

    /// Like [`build`][Self::build], but over a store the caller already
    /// shares with other components.
    pub fn build_with_store<B: StateBackend>(self, store: Arc<StateStore<B>>) -> SimResult<Engine<B>> {
        self.config.validate()?;
        if self.reset_on_start {
            store.reset()?;
        }

        let scoring = self
            .scoring
            .unwrap_or_else(|| Scoring::new(self.config.scoring_penalty));
        let dwell_ticks = self.config.dwell_ticks();
        info!(
            lifts = self.config.lift_count,
            floors = %format_args!("{}..={}", self.config.lowest_floor, self.config.highest_floor),
            dwell_ticks,
            penalty = scoring.penalty,
            "engine built"
        );

        Ok(Engine {
            clock: self.config.make_clock(),
            max_ticks: self.max_ticks,
            store,
            dispatcher: Dispatcher::new(scoring),
            dwell_ticks,
            config: self.config,
        })
    }
}
