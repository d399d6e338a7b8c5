//! The `Simulation` struct and its step loop.

use std::thread;
use std::time::Instant;

use log::{debug, trace};
use tl_core::{RandomTraffic, Tick, TrafficSource, TrafficState, transition_for_simulation};
use tl_planner::Planner;

use crate::{
    RunControl, RunResult, SimBuilder, SimConfig, SimObserver, SimResult, SimulationStats,
    StepRecord,
};

/// One intersection driven by one planner.
///
/// Each step:
///
/// 1. **Plan**: show the planner the current state and time the call.
/// 2. **Advance**: apply the stochastic transition with the chosen action.
/// 3. **Record**: count the switch request and add the new waiting total.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<P: Planner, S: TrafficSource = RandomTraffic> {
    /// Run parameters (total steps, horizon, min green time, …).
    pub config: SimConfig,

    /// The planner queried once per step.
    pub planner: P,

    /// Arrival / discharge randomness for the stochastic transition.
    pub source: S,

    pub(crate) initial: TrafficState,
    pub(crate) state:   TrafficState,
    pub(crate) tick:    Tick,
    pub(crate) stats:   SimulationStats,
}

impl<P: Planner, S: TrafficSource> Simulation<P, S> {
    // ── Accessors ─────────────────────────────────────────────────────────

    /// Current observed state.
    pub fn state(&self) -> &TrafficState {
        &self.state
    }

    /// Steps executed so far.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// `true` once `config.total_steps` steps have run.
    pub fn is_finished(&self) -> bool {
        self.tick.0 >= self.config.total_steps
    }

    /// Return to the initial state with zeroed statistics.
    pub fn reset(&mut self) {
        self.state = self.initial;
        self.tick = Tick::ZERO;
        self.stats.reset();
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Execute exactly one step, regardless of `total_steps`.
    pub fn step(&mut self) -> StepRecord {
        let before = self.state;

        let started = Instant::now();
        let action = self.planner.plan(&before, self.config.horizon);
        let plan_time = started.elapsed();

        let state = transition_for_simulation(
            &before,
            action,
            self.config.min_green_time,
            &mut self.source,
        );

        let record = StepRecord {
            step: self.tick,
            before,
            action,
            state,
            waiting: state.total_waiting(),
            plan_time,
        };

        self.state = state;
        self.stats.record(&record);
        self.tick = self.tick + 1;

        trace!("{} {}: {} -> {} {}", self.planner.name(), record.step, before, action, state);
        record
    }

    /// Run from the current step to `config.total_steps`.
    ///
    /// `control` is checked before every step: a pause blocks in place and a
    /// stop ends the run early with `cancelled = true`.  A configured step
    /// delay is slept after each step.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O, control: &RunControl) -> RunResult {
        let name = self.planner.name().to_owned();
        debug!("{name}: run starting at {} of {} steps", self.tick, self.config.total_steps);
        observer.on_run_start(&name, &self.config);

        let mut cancelled = false;
        while !self.is_finished() {
            if !control.wait_while_paused() {
                cancelled = true;
                break;
            }

            let record = self.step();
            observer.on_step(&record);
            if record.step.is_every(self.config.progress_interval) {
                observer.on_progress(&record);
            }

            let delay = control.step_delay();
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        let result = self.result(cancelled);
        debug!(
            "{name}: run {} after {} steps, total waiting {}",
            if cancelled { "cancelled" } else { "finished" },
            result.steps,
            result.total_waiting,
        );
        observer.on_run_end(&result);
        result
    }

    /// Run to completion without external control.
    pub fn run_to_end<O: SimObserver>(&mut self, observer: &mut O) -> RunResult {
        self.run(observer, &RunControl::new())
    }

    /// Summary of the steps executed so far.
    pub fn result(&self, cancelled: bool) -> RunResult {
        RunResult::from_stats(self.planner.name(), &self.stats, cancelled)
    }
}

/// One complete run of `planner` with entropy- or seed-backed traffic.
pub fn run_simulation<P: Planner, O: SimObserver>(
    planner:  P,
    config:   &SimConfig,
    observer: &mut O,
) -> SimResult<RunResult> {
    let mut sim = SimBuilder::new(config.clone(), planner).build()?;
    Ok(sim.run_to_end(observer))
}
