//! `tl-sim` — step loop driver and comparison harness.
//!
//! # Step loop
//!
//! ```text
//! for step in 0..config.total_steps:
//!   ① Control  — block while paused; exit early if stopped.
//!   ② Plan     — action = planner.plan(state, horizon), timed.
//!   ③ Advance  — state = transition_for_simulation(state, action).
//!   ④ Record   — switches += (action == SWITCH); total_waiting += waiting(state).
//!   ⑤ Observe  — on_step every step, on_progress every progress_interval.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tl_planner::AStar;
//! use tl_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), AStar::default()).build()?;
//! let result = sim.run_to_end(&mut NoopObserver);
//! println!("{}: {:.2} cars waiting on average", result.algorithm, result.avg_waiting);
//! ```

pub mod builder;
pub mod compare;
pub mod config;
pub mod control;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use compare::{Comparison, best_algorithm, compare_algorithms, compare_named, compare_planners};
pub use config::SimConfig;
pub use control::RunControl;
pub use error::{SimError, SimResult};
pub use observer::{ChannelObserver, NoopObserver, ProgressLogger, SimEvent, SimObserver};
pub use sim::{Simulation, run_simulation};
pub use stats::{RunResult, SimulationStats, StepRecord};
