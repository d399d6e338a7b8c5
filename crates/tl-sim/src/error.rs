use thiserror::Error;
use tl_core::CoreError;
use tl_planner::PlannerError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no planners to compare")]
    NoPlanners,

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
