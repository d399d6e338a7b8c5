//! Plain data row types written by output backends.

use tl_core::{Action, Phase};
use tl_sim::{RunResult, StepRecord};

/// One simulation step of one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub algorithm:    String,
    pub step:         u64,
    pub north:        u32,
    pub south:        u32,
    pub east:         u32,
    pub west:         u32,
    /// Phase after the step.
    pub phase:        Phase,
    pub action:       Action,
    pub waiting:      u32,
    pub plan_time_ms: f64,
}

impl StepRow {
    pub fn from_record(algorithm: &str, record: &StepRecord) -> Self {
        let s = &record.state;
        Self {
            algorithm:    algorithm.to_owned(),
            step:         record.step.0,
            north:        s.north(),
            south:        s.south(),
            east:         s.east(),
            west:         s.west(),
            phase:        s.phase(),
            action:       record.action,
            waiting:      record.waiting,
            plan_time_ms: record.plan_time.as_secs_f64() * 1_000.0,
        }
    }
}

/// Summary of one run, as written to `comparison.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub algorithm:        String,
    pub total_waiting:    u64,
    pub avg_waiting:      f64,
    pub switches:         u64,
    pub avg_step_time_ms: f64,
    pub steps:            u64,
    pub cancelled:        bool,
}

impl From<&RunResult> for ResultRow {
    fn from(r: &RunResult) -> Self {
        Self {
            algorithm:        r.algorithm.clone(),
            total_waiting:    r.total_waiting,
            avg_waiting:      r.avg_waiting,
            switches:         r.switches,
            avg_step_time_ms: r.avg_step_time_ms(),
            steps:            r.steps,
            cancelled:        r.cancelled,
        }
    }
}
