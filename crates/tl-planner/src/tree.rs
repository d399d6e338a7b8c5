//! Arena-backed search tree shared by all planners.
//!
//! # Representation
//!
//! Nodes live in one `Vec` and refer to their parent by index, so a frontier
//! entry is a single `NodeIdx` instead of a copied path.  The first action of
//! a path is recovered by walking parent links back to the root.
//!
//! Nodes are appended in generation order, which makes `NodeIdx` double as a
//! FIFO sequence number for tie-breaking in the priority-ordered planners.
//!
//! A tree is built for one planning call and dropped when it returns.

use rustc_hash::FxHashSet;
use tl_core::{Action, PlanningModel, TrafficState};

// ── NodeIdx ───────────────────────────────────────────────────────────────────

/// Index of a node in a [`SearchTree`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIdx(pub u32);

impl NodeIdx {
    pub const ROOT: NodeIdx = NodeIdx(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── SearchTree ────────────────────────────────────────────────────────────────

struct Node {
    state:  TrafficState,
    /// Action that produced this node; `None` only for the root.
    action: Option<Action>,
    parent: Option<NodeIdx>,
    depth:  u32,
    /// Accumulated path cost; meaning depends on the planner.
    g:      u64,
}

/// Parent-pointer tree of every node generated during one search.
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Tree holding only `root`, at depth 0 with accumulated cost `g`.
    pub fn new(root: TrafficState, g: u64) -> Self {
        Self {
            nodes: vec![Node { state: root, action: None, parent: None, depth: 0, g }],
        }
    }

    /// Append a child of `parent` reached via `action`.
    pub fn push_child(
        &mut self,
        parent: NodeIdx,
        action: Action,
        state:  TrafficState,
        g:      u64,
    ) -> NodeIdx {
        let depth = self.nodes[parent.index()].depth + 1;
        let idx = NodeIdx(self.nodes.len() as u32);
        self.nodes.push(Node { state, action: Some(action), parent: Some(parent), depth, g });
        idx
    }

    #[inline]
    pub fn state(&self, idx: NodeIdx) -> &TrafficState {
        &self.nodes[idx.index()].state
    }

    #[inline]
    pub fn depth(&self, idx: NodeIdx) -> u32 {
        self.nodes[idx.index()].depth
    }

    #[inline]
    pub fn g(&self, idx: NodeIdx) -> u64 {
        self.nodes[idx.index()].g
    }

    /// The action taken at the root on the path to `idx`.
    ///
    /// `None` for the root itself.
    pub fn first_action(&self, idx: NodeIdx) -> Option<Action> {
        let mut cur = &self.nodes[idx.index()];
        loop {
            match cur.parent {
                None => return None,
                Some(p) if p == NodeIdx::ROOT => return cur.action,
                Some(p) => cur = &self.nodes[p.index()],
            }
        }
    }

    /// Actions from the root to `idx`, in order.
    pub fn path_actions(&self, idx: NodeIdx) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.depth(idx) as usize);
        let mut cur = &self.nodes[idx.index()];
        while let (Some(action), Some(parent)) = (cur.action, cur.parent) {
            actions.push(action);
            cur = &self.nodes[parent.index()];
        }
        actions.reverse();
        actions
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Both successors of `state`, in expansion order (HOLD, then SWITCH).
#[inline]
pub fn successors(model: &PlanningModel, state: &TrafficState) -> [(Action, TrafficState); 2] {
    Action::ALL.map(|action| (action, model.successor(state, action)))
}

// ── Visited ───────────────────────────────────────────────────────────────────

/// Set of expanded states, compared by full tuple equality.
///
/// Keeps insertion order alongside the hash set so a finished search can
/// report exactly which states it expanded.
#[derive(Default)]
pub struct Visited {
    seen:  FxHashSet<TrafficState>,
    order: Vec<TrafficState>,
}

impl Visited {
    /// Record `state`; returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, state: TrafficState) -> bool {
        if self.seen.insert(state) {
            self.order.push(state);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, state: &TrafficState) -> bool {
        self.seen.contains(state)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_order(self) -> Vec<TrafficState> {
        self.order
    }
}

// ── SearchOutcome ─────────────────────────────────────────────────────────────

/// Everything a search learned, for diagnostics and tests.
///
/// [`Planner::plan`][crate::Planner::plan] returns only `action`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchOutcome {
    /// First action of the selected path; `Hold` when nothing reached the horizon.
    pub action: Action,
    /// `false` when the frontier emptied before any path reached the horizon.
    pub reached_horizon: bool,
    /// Actions along the selected path (empty on fallback).
    pub path: Vec<Action>,
    /// States in the order they were expanded (visited / closed set).
    pub expanded: Vec<TrafficState>,
    /// Total nodes placed in the tree, root included.
    pub nodes_generated: usize,
}

impl SearchOutcome {
    /// Build the outcome for a finished search that selected `goal`.
    pub(crate) fn finish(tree: &SearchTree, goal: Option<NodeIdx>, visited: Visited) -> Self {
        match goal {
            Some(idx) => Self {
                action:          tree.first_action(idx).unwrap_or(Action::Hold),
                reached_horizon: true,
                path:            tree.path_actions(idx),
                expanded:        visited.into_order(),
                nodes_generated: tree.len(),
            },
            None => Self {
                action:          Action::Hold,
                reached_horizon: false,
                path:            Vec::new(),
                expanded:        visited.into_order(),
                nodes_generated: tree.len(),
            },
        }
    }
}
