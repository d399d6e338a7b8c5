//! Fluent builder for constructing a [`Simulation`].

use tl_core::{CoreResult, RandomTraffic, SimRng, Tick, TrafficSource, TrafficState};
use tl_planner::Planner;

use crate::{SimConfig, SimResult, Simulation, SimulationStats};

/// Fluent builder for [`Simulation<P, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total steps, horizon, min green time, seed, …
/// - `P: Planner` — the action-selection strategy
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                          |
/// |-----------------------|--------------------------------------------------|
/// | `.traffic(s)`         | `RandomTraffic` over `config.traffic`, seeded from `config.seed` |
/// | `.initial_state(s)`   | `TrafficState::INITIAL` (empty, NS, t=0)         |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, AStar::default())
///     .traffic(ScriptedTraffic::constant(1, 2))
///     .build()?;
/// let result = sim.run_to_end(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: Planner, S: TrafficSource = RandomTraffic> {
    config:  SimConfig,
    planner: P,
    /// An invalid `config.traffic` profile is reported by `build`.
    source:  CoreResult<S>,
    initial: TrafficState,
}

impl<P: Planner> SimBuilder<P, RandomTraffic> {
    /// Create a builder with random traffic drawn from `config.traffic` and
    /// seeded from `config.seed` (OS entropy when `None`).
    pub fn new(config: SimConfig, planner: P) -> Self {
        let rng = SimRng::from_seed_opt(config.seed);
        let source = RandomTraffic::with_profile(rng, config.traffic.clone());
        Self {
            config,
            planner,
            source,
            initial: TrafficState::INITIAL,
        }
    }
}

impl<P: Planner, S: TrafficSource> SimBuilder<P, S> {
    /// Create a builder around an explicit arrival / discharge source.
    pub fn with_traffic(config: SimConfig, planner: P, source: S) -> Self {
        Self {
            config,
            planner,
            source: Ok(source),
            initial: TrafficState::INITIAL,
        }
    }

    /// Replace the arrival / discharge source.
    pub fn traffic<T: TrafficSource>(self, source: T) -> SimBuilder<P, T> {
        SimBuilder {
            config:  self.config,
            planner: self.planner,
            source:  Ok(source),
            initial: self.initial,
        }
    }

    /// Start from `state` instead of an empty intersection.
    pub fn initial_state(mut self, state: TrafficState) -> Self {
        self.initial = state;
        self
    }

    /// Validate the configuration and return a ready-to-run [`Simulation`].
    pub fn build(self) -> SimResult<Simulation<P, S>> {
        self.config.validate()?;
        let source = self.source?;

        Ok(Simulation {
            config:  self.config,
            planner: self.planner,
            source,
            initial: self.initial,
            state:   self.initial,
            tick:    Tick::ZERO,
            stats:   SimulationStats::new(),
        })
    }
}
