use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("unknown planner {0:?} (expected one of A*, BFS, DFS, UCS, IDDFS)")]
    UnknownPlanner(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
