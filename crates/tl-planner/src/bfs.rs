//! Breadth-first planner.

use std::collections::VecDeque;

use tl_core::{Action, PlanningModel, TrafficState};

use crate::frontier::cheapest_leaf;
use crate::{Planner, SearchOutcome};

/// Level-order expansion to the horizon; the cheapest leaf wins, ties go to
/// the leaf reached first.
#[derive(Clone, Debug, Default)]
pub struct BreadthFirst {
    model: PlanningModel,
}

impl BreadthFirst {
    pub fn new(model: PlanningModel) -> Self {
        Self { model }
    }

    pub fn search(&self, state: &TrafficState, horizon: u32) -> SearchOutcome {
        cheapest_leaf(&self.model, state, horizon, VecDeque::new())
    }
}

impl Planner for BreadthFirst {
    fn name(&self) -> &str {
        "BFS"
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        self.search(state, horizon).action
    }
}
