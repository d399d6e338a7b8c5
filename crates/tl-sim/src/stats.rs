//! Per-run accumulators and the records they produce.

use std::time::Duration;

use tl_core::{Action, Tick, TrafficState};

// ── StepRecord ────────────────────────────────────────────────────────────────

/// What happened during one step, as handed to observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// Zero-based index of the step.
    pub step:      Tick,
    /// State the planner was shown.
    pub before:    TrafficState,
    /// Action the planner chose.
    pub action:    Action,
    /// State after the stochastic transition.
    pub state:     TrafficState,
    /// Vehicles waiting in `state`.
    pub waiting:   u32,
    /// Wall-clock time spent inside `Planner::plan`.
    pub plan_time: Duration,
}

// ── SimulationStats ───────────────────────────────────────────────────────────

/// Accumulators owned by one simulation run.
///
/// `switches` counts SWITCH *requests*, including ones the minimum green time
/// blocked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Sum over steps of the vehicles waiting after the step.
    pub total_waiting: u64,
    pub switches:      u64,
    /// Planning latency of every step, in order.
    pub step_times:    Vec<Duration>,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every accumulator.
    pub fn reset(&mut self) {
        self.total_waiting = 0;
        self.switches = 0;
        self.step_times.clear();
    }

    pub fn record(&mut self, record: &StepRecord) {
        self.total_waiting += record.waiting as u64;
        if record.action == Action::Switch {
            self.switches += 1;
        }
        self.step_times.push(record.plan_time);
    }

    /// Steps recorded so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.step_times.len() as u64
    }

    /// `total_waiting / steps`, or 0 when no step has run.
    pub fn average_waiting(&self) -> f64 {
        match self.steps() {
            0 => 0.0,
            n => self.total_waiting as f64 / n as f64,
        }
    }

    /// Mean planning latency in seconds, or 0 when no step has run.
    pub fn average_step_time(&self) -> f64 {
        match self.steps() {
            0 => 0.0,
            n => self.step_times.iter().map(Duration::as_secs_f64).sum::<f64>() / n as f64,
        }
    }
}

// ── RunResult ─────────────────────────────────────────────────────────────────

/// Summary of one driver run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    pub algorithm:     String,
    pub total_waiting: u64,
    pub avg_waiting:   f64,
    pub switches:      u64,
    /// Mean planning latency in seconds.
    pub avg_step_time: f64,
    /// Steps actually executed.  Equals the configured total unless cancelled.
    pub steps:         u64,
    /// `true` when the run was stopped before reaching the configured total.
    pub cancelled:     bool,
}

impl RunResult {
    pub fn from_stats(algorithm: &str, stats: &SimulationStats, cancelled: bool) -> Self {
        Self {
            algorithm:     algorithm.to_owned(),
            total_waiting: stats.total_waiting,
            avg_waiting:   stats.average_waiting(),
            switches:      stats.switches,
            avg_step_time: stats.average_step_time(),
            steps:         stats.steps(),
            cancelled,
        }
    }

    /// Mean planning latency in milliseconds.
    pub fn avg_step_time_ms(&self) -> f64 {
        self.avg_step_time * 1_000.0
    }
}
