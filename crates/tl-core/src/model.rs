//! Deterministic transition model used for lookahead, plus the cost and
//! heuristic every planner shares.
//!
//! # Step semantics
//!
//! ```text
//! 1. arrivals   — every approach gains vehicles
//! 2. phase      — HOLD keeps the phase; SWITCH flips it only once
//!                 time_in_phase >= min_green_time (otherwise acts as HOLD)
//! 3. discharge  — the two approaches green under the *resulting* phase
//!                 lose vehicles, floored at zero
//! ```
//!
//! The planning transition fixes arrivals at 1 and discharge at 2 per
//! approach so that lookahead trees are reproducible.  The stochastic
//! counterpart lives in [`crate::traffic`] and must never be used inside a
//! planner.

use crate::{Action, Phase, TrafficState};

/// Steps a phase must stay green before a `SWITCH` is honoured.
pub const DEFAULT_MIN_GREEN_TIME: u32 = 3;

/// Resolve the phase after `action`, returning `(phase, time_in_phase)`.
///
/// Shared by the planning and the simulation transition.
#[inline]
pub fn resolve_phase(state: &TrafficState, action: Action, min_green_time: u32) -> (Phase, u32) {
    match action {
        Action::Switch if state.time_in_phase() >= min_green_time => {
            (state.phase().flipped(), 0)
        }
        Action::Hold | Action::Switch => (state.phase(), state.time_in_phase() + 1),
    }
}

/// Total vehicles waiting.  Additive; planners minimise it.
#[inline]
pub fn cost(state: &TrafficState) -> u32 {
    state.total_waiting()
}

/// Longest single queue.  Used by A* as its remaining-cost estimate.
#[inline]
pub fn heuristic(state: &TrafficState) -> u32 {
    state.longest_queue()
}

// ── PlanningModel ─────────────────────────────────────────────────────────────

/// Parameters of the deterministic planning transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanningModel {
    /// Minimum steps in a phase before `SWITCH` takes effect.  Default: 3.
    pub min_green_time: u32,
    /// Vehicles added to every approach per step.  Default: 1.
    pub arrivals_per_step: u32,
    /// Vehicles removed from each green approach per step.  Default: 2.
    pub discharge_per_step: u32,
}

impl Default for PlanningModel {
    fn default() -> Self {
        Self {
            min_green_time:     DEFAULT_MIN_GREEN_TIME,
            arrivals_per_step:  1,
            discharge_per_step: 2,
        }
    }
}

impl PlanningModel {
    /// Default arrival/discharge rates with a custom minimum green time.
    pub fn with_min_green_time(min_green_time: u32) -> Self {
        Self { min_green_time, ..Self::default() }
    }

    /// Pure, reproducible successor of `state` under `action`.
    pub fn successor(&self, state: &TrafficState, action: Action) -> TrafficState {
        let mut queues = state.queues().map(|q| q.saturating_add(self.arrivals_per_step));

        let (phase, time_in_phase) = resolve_phase(state, action, self.min_green_time);

        for approach in phase.green_approaches() {
            let q = &mut queues[approach as usize];
            *q = q.saturating_sub(self.discharge_per_step);
        }

        TrafficState::from_parts(queues, phase, time_in_phase)
    }
}

/// Planning transition with default rates and the given minimum green time.
pub fn transition_for_planning(
    state:          &TrafficState,
    action:         Action,
    min_green_time: u32,
) -> TrafficState {
    PlanningModel::with_min_green_time(min_green_time).successor(state, action)
}
