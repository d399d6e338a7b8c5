//! Exhaustive leaf-cost search shared by BFS and depth-limited DFS.
//!
//! Both planners expand every non-pruned node down to a fixed depth, score
//! each leaf by `cost(leaf_state)`, and keep the first strictly-cheapest leaf
//! in the order leaves are popped.  They differ only in frontier discipline,
//! captured by the [`Frontier`] trait.

use std::collections::VecDeque;

use tl_core::{PlanningModel, TrafficState, cost};

use crate::tree::{NodeIdx, SearchOutcome, SearchTree, Visited, successors};

/// Order in which generated nodes are taken back out.
pub(crate) trait Frontier {
    fn push(&mut self, idx: NodeIdx);
    fn pop(&mut self) -> Option<NodeIdx>;
}

/// FIFO — level order.
impl Frontier for VecDeque<NodeIdx> {
    #[inline]
    fn push(&mut self, idx: NodeIdx) {
        self.push_back(idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<NodeIdx> {
        self.pop_front()
    }
}

/// LIFO — the most recently generated child (SWITCH) is expanded first.
impl Frontier for Vec<NodeIdx> {
    #[inline]
    fn push(&mut self, idx: NodeIdx) {
        Vec::push(self, idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<NodeIdx> {
        Vec::pop(self)
    }
}

/// Expand from `start` to exactly `depth_limit` and pick the cheapest leaf.
///
/// A state already expanded (full equality, `time_in_phase` included) is
/// skipped when popped, so distinct paths reaching an identical state are
/// collapsed into the first one popped.
pub(crate) fn cheapest_leaf<F: Frontier>(
    model:       &PlanningModel,
    start:       &TrafficState,
    depth_limit: u32,
    mut frontier: F,
) -> SearchOutcome {
    let mut tree = SearchTree::new(*start, 0);
    let mut visited = Visited::default();
    let mut best: Option<(u32, NodeIdx)> = None;

    frontier.push(NodeIdx::ROOT);

    while let Some(idx) = frontier.pop() {
        let state = *tree.state(idx);
        if !visited.insert(state) {
            continue;
        }

        if tree.depth(idx) == depth_limit {
            let leaf_cost = cost(&state);
            if best.is_none_or(|(best_cost, _)| leaf_cost < best_cost) {
                best = Some((leaf_cost, idx));
            }
            continue;
        }

        for (action, next) in successors(model, &state) {
            let child = tree.push_child(idx, action, next, 0);
            frontier.push(child);
        }
    }

    SearchOutcome::finish(&tree, best.map(|(_, idx)| idx), visited)
}
