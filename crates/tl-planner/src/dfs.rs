//! Depth-first planner and the depth-limited search it shares with IDDFS.

use tl_core::{Action, PlanningModel, TrafficState};

use crate::frontier::cheapest_leaf;
use crate::{Planner, SearchOutcome};

/// Depth-limited DFS from `state`: stack order, cheapest leaf at exactly
/// `depth_limit` wins (ties favour the leaf popped first).
pub fn depth_limited(model: &PlanningModel, state: &TrafficState, depth_limit: u32) -> SearchOutcome {
    cheapest_leaf(model, state, depth_limit, Vec::new())
}

/// Stack-order expansion to the horizon.
#[derive(Clone, Debug, Default)]
pub struct DepthFirst {
    model: PlanningModel,
}

impl DepthFirst {
    pub fn new(model: PlanningModel) -> Self {
        Self { model }
    }

    pub fn search(&self, state: &TrafficState, horizon: u32) -> SearchOutcome {
        depth_limited(&self.model, state, horizon)
    }
}

impl Planner for DepthFirst {
    fn name(&self) -> &str {
        "DFS"
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        self.search(state, horizon).action
    }
}
