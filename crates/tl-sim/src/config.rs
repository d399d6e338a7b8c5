//! Run configuration.

use tl_core::{DEFAULT_MIN_GREEN_TIME, PlanningModel, TrafficProfile};

use crate::{SimError, SimResult};

/// Parameters shared by a single run and by every run in a comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Steps to simulate.  Default: 300.
    pub total_steps: u64,

    /// Planner lookahead depth.  Must be at least 1.  Default: 10.
    pub horizon: u32,

    /// Minimum green time for both the planning and the simulation
    /// transition.  Default: 3.
    pub min_green_time: u32,

    /// Observers get `on_progress` every N steps (step 0 included).
    /// 0 disables it.  Default: 10.
    pub progress_interval: u64,

    /// Master RNG seed.  `None` draws from OS entropy, so every run differs.
    pub seed: Option<u64>,

    /// Arrival and discharge ranges for the stochastic transition.
    pub traffic: TrafficProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_steps:       300,
            horizon:           10,
            min_green_time:    DEFAULT_MIN_GREEN_TIME,
            progress_interval: 10,
            seed:              None,
            traffic:           TrafficProfile::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.horizon == 0 {
            return Err(SimError::Config("horizon must be at least 1".into()));
        }
        self.traffic.validate()?;
        Ok(())
    }

    /// The deterministic model planners should search with.
    pub fn planning_model(&self) -> PlanningModel {
        PlanningModel::with_min_green_time(self.min_green_time)
    }
}
