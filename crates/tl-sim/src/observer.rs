//! Simulation observer trait for progress reporting and data collection.

use std::sync::mpsc::Sender;

use log::info;

use crate::{RunResult, SimConfig, StepRecord};

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — waiting-cars printer
///
/// ```rust,ignore
/// struct WaitingPrinter;
///
/// impl SimObserver for WaitingPrinter {
///     fn on_progress(&mut self, record: &StepRecord) {
///         println!("step {}: {} cars waiting", record.step, record.waiting);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first step of a run.
    fn on_run_start(&mut self, _algorithm: &str, _config: &SimConfig) {}

    /// Called after every step.
    fn on_step(&mut self, _record: &StepRecord) {}

    /// Called after `on_step` on every `config.progress_interval`-th step.
    fn on_progress(&mut self, _record: &StepRecord) {}

    /// Called once when the run completes or is cancelled.
    fn on_run_end(&mut self, _result: &RunResult) {}
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_run_start(&mut self, algorithm: &str, config: &SimConfig) {
        (**self).on_run_start(algorithm, config);
    }

    fn on_step(&mut self, record: &StepRecord) {
        (**self).on_step(record);
    }

    fn on_progress(&mut self, record: &StepRecord) {
        (**self).on_progress(record);
    }

    fn on_run_end(&mut self, result: &RunResult) {
        (**self).on_run_end(result);
    }
}

/// Fan out to two observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_run_start(&mut self, algorithm: &str, config: &SimConfig) {
        self.0.on_run_start(algorithm, config);
        self.1.on_run_start(algorithm, config);
    }

    fn on_step(&mut self, record: &StepRecord) {
        self.0.on_step(record);
        self.1.on_step(record);
    }

    fn on_progress(&mut self, record: &StepRecord) {
        self.0.on_progress(record);
        self.1.on_progress(record);
    }

    fn on_run_end(&mut self, result: &RunResult) {
        self.0.on_run_end(result);
        self.1.on_run_end(result);
    }
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

// ── ProgressLogger ────────────────────────────────────────────────────────────

/// Logs one line per progress step and a summary per run at `info` level.
#[derive(Default)]
pub struct ProgressLogger {
    algorithm: String,
}

impl ProgressLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for ProgressLogger {
    fn on_run_start(&mut self, algorithm: &str, config: &SimConfig) {
        self.algorithm = algorithm.to_owned();
        info!(
            "{algorithm}: {} steps, horizon {}, min green {}",
            config.total_steps, config.horizon, config.min_green_time
        );
    }

    fn on_progress(&mut self, r: &StepRecord) {
        let s = &r.state;
        info!(
            "{} step {:>4}: N={:<3} S={:<3} E={:<3} W={:<3} {} {:<6} waiting={}",
            self.algorithm,
            r.step.0,
            s.north(),
            s.south(),
            s.east(),
            s.west(),
            s.phase(),
            r.action,
            r.waiting,
        );
    }

    fn on_run_end(&mut self, result: &RunResult) {
        info!(
            "{}: avg waiting {:.2}, switches {}, {:.3} ms/step{}",
            result.algorithm,
            result.avg_waiting,
            result.switches,
            result.avg_step_time_ms(),
            if result.cancelled { " (cancelled)" } else { "" },
        );
    }
}

// ── ChannelObserver ───────────────────────────────────────────────────────────

/// Events forwarded by [`ChannelObserver`].
#[derive(Clone, Debug)]
pub enum SimEvent {
    Started { algorithm: String, total_steps: u64 },
    Step(StepRecord),
    Finished(RunResult),
}

/// Forwards every step to another thread (e.g. a renderer) over a channel.
///
/// A dropped receiver is not an error: the run carries on unobserved.
pub struct ChannelObserver {
    tx: Sender<SimEvent>,
}

impl ChannelObserver {
    pub fn new(tx: Sender<SimEvent>) -> Self {
        Self { tx }
    }
}

impl SimObserver for ChannelObserver {
    fn on_run_start(&mut self, algorithm: &str, config: &SimConfig) {
        let _ = self.tx.send(SimEvent::Started {
            algorithm:   algorithm.to_owned(),
            total_steps: config.total_steps,
        });
    }

    fn on_step(&mut self, record: &StepRecord) {
        let _ = self.tx.send(SimEvent::Step(*record));
    }

    fn on_run_end(&mut self, result: &RunResult) {
        let _ = self.tx.send(SimEvent::Finished(result.clone()));
    }
}
