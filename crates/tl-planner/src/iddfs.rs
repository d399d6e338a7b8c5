//! Iterative-deepening planner.

use tl_core::{Action, PlanningModel, TrafficState};

use crate::dfs::depth_limited;
use crate::{Planner, SearchOutcome};

/// Runs [`depth_limited`] for every depth `1..=horizon`, each with a fresh
/// visited set, and answers with the final (`depth == horizon`) run.
///
/// Shallower runs are computed and discarded; they only cost time, which is
/// what the comparison harness measures.
#[derive(Clone, Debug, Default)]
pub struct IterativeDeepening {
    model: PlanningModel,
}

impl IterativeDeepening {
    pub fn new(model: PlanningModel) -> Self {
        Self { model }
    }

    /// Outcome of the deepest iteration.  `horizon == 0` runs no iteration
    /// and falls back to `Hold`.
    pub fn search(&self, state: &TrafficState, horizon: u32) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        for depth in 1..=horizon {
            outcome = depth_limited(&self.model, state, depth);
        }
        outcome
    }
}

impl Planner for IterativeDeepening {
    fn name(&self) -> &str {
        "IDDFS"
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        self.search(state, horizon).action
    }
}
