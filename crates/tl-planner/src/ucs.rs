//! Uniform-cost planner.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tl_core::{Action, PlanningModel, TrafficState, cost};

use crate::tree::{NodeIdx, SearchTree, Visited, successors};
use crate::{Planner, SearchOutcome};

/// Expands the path with the lowest accumulated cost first, where a path's
/// cost is the sum of `cost(state)` over every state on it, root included.
/// The first path popped at the horizon is returned.
#[derive(Clone, Debug, Default)]
pub struct UniformCost {
    model: PlanningModel,
}

impl UniformCost {
    pub fn new(model: PlanningModel) -> Self {
        Self { model }
    }

    pub fn search(&self, state: &TrafficState, horizon: u32) -> SearchOutcome {
        let mut tree = SearchTree::new(*state, cost(state) as u64);
        let mut visited = Visited::default();

        // Min-heap on (path cost, generation order).  The secondary key keeps
        // equal-cost paths in FIFO order.
        let mut open: BinaryHeap<Reverse<(u64, NodeIdx)>> = BinaryHeap::new();
        open.push(Reverse((tree.g(NodeIdx::ROOT), NodeIdx::ROOT)));

        while let Some(Reverse((g, idx))) = open.pop() {
            let current = *tree.state(idx);
            if !visited.insert(current) {
                continue;
            }

            if tree.depth(idx) == horizon {
                return SearchOutcome::finish(&tree, Some(idx), visited);
            }

            for (action, next) in successors(&self.model, &current) {
                let next_g = g + cost(&next) as u64;
                let child = tree.push_child(idx, action, next, next_g);
                open.push(Reverse((next_g, child)));
            }
        }

        SearchOutcome::finish(&tree, None, visited)
    }
}

impl Planner for UniformCost {
    fn name(&self) -> &str {
        "UCS"
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        self.search(state, horizon).action
    }
}
