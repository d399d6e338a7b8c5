//! Registry of the bundled search planners.

use std::fmt;
use std::str::FromStr;

use tl_core::PlanningModel;

use crate::{AStar, BreadthFirst, DepthFirst, IterativeDeepening, Planner, PlannerError, UniformCost};

/// One of the five bundled search strategies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PlannerKind {
    AStar,
    Bfs,
    Dfs,
    Ucs,
    Iddfs,
}

impl PlannerKind {
    /// All kinds in comparison order.
    pub const ALL: [PlannerKind; 5] = [
        PlannerKind::AStar,
        PlannerKind::Bfs,
        PlannerKind::Dfs,
        PlannerKind::Ucs,
        PlannerKind::Iddfs,
    ];

    /// Display name; matches [`Planner::name`] of the built planner.
    pub fn name(self) -> &'static str {
        match self {
            PlannerKind::AStar => "A*",
            PlannerKind::Bfs => "BFS",
            PlannerKind::Dfs => "DFS",
            PlannerKind::Ucs => "UCS",
            PlannerKind::Iddfs => "IDDFS",
        }
    }

    /// Construct the planner over `model`.
    pub fn build(self, model: PlanningModel) -> Box<dyn Planner> {
        match self {
            PlannerKind::AStar => Box::new(AStar::new(model)),
            PlannerKind::Bfs => Box::new(BreadthFirst::new(model)),
            PlannerKind::Dfs => Box::new(DepthFirst::new(model)),
            PlannerKind::Ucs => Box::new(UniformCost::new(model)),
            PlannerKind::Iddfs => Box::new(IterativeDeepening::new(model)),
        }
    }

    /// Build every kind, in comparison order.
    pub fn build_all(model: PlanningModel) -> Vec<Box<dyn Planner>> {
        Self::ALL.iter().map(|kind| kind.build(model)).collect()
    }
}

impl fmt::Display for PlannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlannerKind {
    type Err = PlannerError;

    /// Case-insensitive; accepts `a*`, `astar` and `a-star` for A*.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a*" | "astar" | "a-star" => Ok(PlannerKind::AStar),
            "bfs" => Ok(PlannerKind::Bfs),
            "dfs" => Ok(PlannerKind::Dfs),
            "ucs" => Ok(PlannerKind::Ucs),
            "iddfs" => Ok(PlannerKind::Iddfs),
            _ => Err(PlannerError::UnknownPlanner(s.to_owned())),
        }
    }
}
