//! `tl-planner` — the `Planner` trait and five lookahead search strategies.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`planner`]  | `Planner` trait, `HoldPlanner` baseline                         |
//! | [`tree`]     | `SearchTree` arena, `Visited` set, `SearchOutcome`              |
//! | [`bfs`]      | `BreadthFirst`                                                  |
//! | [`dfs`]      | `DepthFirst`, `depth_limited`                                   |
//! | [`ucs`]      | `UniformCost`                                                   |
//! | [`astar`]    | `AStar`                                                         |
//! | [`iddfs`]    | `IterativeDeepening`                                            |
//! | [`kind`]     | `PlannerKind` registry (name ↔ planner)                         |
//! | [`error`]    | `PlannerError`, `PlannerResult<T>`                              |
//!
//! # Design notes
//!
//! All five planners expand both actions at every node with the same
//! deterministic [`PlanningModel`][tl_core::PlanningModel] and share the same
//! cost and heuristic, so they are directly comparable.  They differ only in
//! search order and in how the winning path is selected:
//!
//! | Planner | Frontier                   | Selection                              |
//! |---------|----------------------------|----------------------------------------|
//! | BFS     | FIFO                       | cheapest leaf at the horizon           |
//! | DFS     | LIFO                       | cheapest leaf at the horizon           |
//! | UCS     | min accumulated path cost  | first path popped at the horizon       |
//! | A*      | min `g + h`                | first path popped at the horizon       |
//! | IDDFS   | DFS per depth `1..=H`      | result of the depth-`H` iteration      |
//!
//! Visited-state pruning compares whole states, `time_in_phase` included,
//! which can collapse distinct paths into one and under-explore.  When the
//! frontier empties before the horizon, every planner answers `Hold`.

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod error;
mod frontier;
pub mod iddfs;
pub mod kind;
pub mod planner;
pub mod tree;
pub mod ucs;

#[cfg(test)]
mod tests;

pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use dfs::{DepthFirst, depth_limited};
pub use error::{PlannerError, PlannerResult};
pub use iddfs::IterativeDeepening;
pub use kind::PlannerKind;
pub use planner::{HoldPlanner, Planner};
pub use tree::{NodeIdx, SearchOutcome, SearchTree, Visited};
pub use ucs::UniformCost;
