//! `tl-core` — state and transition model for the intersection planner.
//!
//! This crate is a dependency of every other `tl-*` crate.  It has no `tl-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`state`]     | `TrafficState`, `Phase`, `Approach`                          |
//! | [`action`]    | `Action` (`Hold`, `Switch`)                                  |
//! | [`model`]     | `PlanningModel`, planning transition, `cost`, `heuristic`    |
//! | [`traffic`]   | `TrafficSource`, `RandomTraffic`, simulation transition      |
//! | [`rng`]       | `SimRng`                                                     |
//! | [`time`]      | `Tick`                                                       |
//! | [`error`]     | `CoreError`, `CoreResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod action;
pub mod error;
pub mod model;
pub mod rng;
pub mod state;
pub mod time;
pub mod traffic;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::Action;
pub use error::{CoreError, CoreResult};
pub use model::{
    DEFAULT_MIN_GREEN_TIME, PlanningModel, cost, heuristic, resolve_phase,
    transition_for_planning,
};
pub use rng::SimRng;
pub use state::{Approach, Phase, TrafficState};
pub use time::Tick;
pub use traffic::{
    RandomTraffic, ScriptedTraffic, TrafficProfile, TrafficSource, transition_for_simulation,
};
