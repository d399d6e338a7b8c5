//! A* planner.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tl_core::{Action, PlanningModel, TrafficState, cost, heuristic};

use crate::tree::{NodeIdx, SearchTree, Visited, successors};
use crate::{Planner, SearchOutcome};

/// Best-first on `f = g + heuristic(state)`, with `g` the sum of
/// `cost(next_state)` along the path (the root contributes 0).
///
/// Expanded states go into a closed set.  A successor already closed is not
/// generated, and a closed state popped again is not re-expanded, but an
/// open state is never updated when a cheaper path to it appears.  The
/// search is therefore not a strict shortest-path search; the first path
/// popped at the horizon is returned as-is.
#[derive(Clone, Debug, Default)]
pub struct AStar {
    model: PlanningModel,
}

impl AStar {
    pub fn new(model: PlanningModel) -> Self {
        Self { model }
    }

    pub fn search(&self, state: &TrafficState, horizon: u32) -> SearchOutcome {
        let mut tree = SearchTree::new(*state, 0);
        let mut closed = Visited::default();

        // Min-heap on (f, generation order); ties go to the older entry.
        let mut open: BinaryHeap<Reverse<(u64, NodeIdx)>> = BinaryHeap::new();
        open.push(Reverse((heuristic(state) as u64, NodeIdx::ROOT)));

        while let Some(Reverse((_f, idx))) = open.pop() {
            let current = *tree.state(idx);
            if !closed.insert(current) {
                continue;
            }

            if tree.depth(idx) == horizon {
                return SearchOutcome::finish(&tree, Some(idx), closed);
            }

            let g = tree.g(idx);
            for (action, next) in successors(&self.model, &current) {
                if closed.contains(&next) {
                    continue;
                }
                let next_g = g + cost(&next) as u64;
                let child = tree.push_child(idx, action, next, next_g);
                open.push(Reverse((next_g + heuristic(&next) as u64, child)));
            }
        }

        SearchOutcome::finish(&tree, None, closed)
    }
}

impl Planner for AStar {
    fn name(&self) -> &str {
        "A*"
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        self.search(state, horizon).action
    }
}
