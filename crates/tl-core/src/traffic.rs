//! Stochastic "real world" transition and its injectable randomness.
//!
//! The driver advances the observed intersection with
//! [`transition_for_simulation`], which draws arrivals and discharge from a
//! [`TrafficSource`].  Production runs use [`RandomTraffic`]; tests can
//! substitute a seeded `RandomTraffic` or a [`ScriptedTraffic`] that replays
//! fixed values.
//!
//! Draw order per step is fixed: four arrival draws (N, S, E, W), then one
//! discharge draw for each green approach in the same order.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use crate::model::resolve_phase;
use crate::{Action, Approach, CoreError, CoreResult, SimRng, TrafficState};

// ── TrafficSource ─────────────────────────────────────────────────────────────

/// Supplies arrival and discharge counts for the simulation transition.
pub trait TrafficSource {
    /// Vehicles arriving on `approach` this step.
    fn arrivals(&mut self, approach: Approach) -> u32;

    /// Vehicles leaving the green `approach` this step.
    fn discharge(&mut self, approach: Approach) -> u32;
}

impl<T: TrafficSource + ?Sized> TrafficSource for &mut T {
    fn arrivals(&mut self, approach: Approach) -> u32 {
        (**self).arrivals(approach)
    }

    fn discharge(&mut self, approach: Approach) -> u32 {
        (**self).discharge(approach)
    }
}

impl<T: TrafficSource + ?Sized> TrafficSource for Box<T> {
    fn arrivals(&mut self, approach: Approach) -> u32 {
        (**self).arrivals(approach)
    }

    fn discharge(&mut self, approach: Approach) -> u32 {
        (**self).discharge(approach)
    }
}

/// Advance the observed intersection by one step.
///
/// Identical phase logic to the planning transition; only the arrival and
/// discharge amounts come from `source`.
pub fn transition_for_simulation<S: TrafficSource + ?Sized>(
    state:          &TrafficState,
    action:         Action,
    min_green_time: u32,
    source:         &mut S,
) -> TrafficState {
    let mut queues = state.queues();
    for approach in Approach::ALL {
        let q = &mut queues[approach as usize];
        *q = q.saturating_add(source.arrivals(approach));
    }

    let (phase, time_in_phase) = resolve_phase(state, action, min_green_time);

    for approach in phase.green_approaches() {
        let q = &mut queues[approach as usize];
        *q = q.saturating_sub(source.discharge(approach));
    }

    TrafficState::from_parts(queues, phase, time_in_phase)
}

// ── TrafficProfile ────────────────────────────────────────────────────────────

/// Uniform ranges for the stochastic transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficProfile {
    /// Per-approach arrivals per step.  Default: `0..=2`.
    pub arrivals: RangeInclusive<u32>,
    /// Per-green-approach discharge per step.  Default: `1..=3`.
    pub discharge: RangeInclusive<u32>,
}

impl Default for TrafficProfile {
    fn default() -> Self {
        Self { arrivals: 0..=2, discharge: 1..=3 }
    }
}

impl TrafficProfile {
    /// Reject empty ranges, which `gen_range` would panic on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.arrivals.is_empty() {
            return Err(CoreError::EmptyRange { what: "arrivals" });
        }
        if self.discharge.is_empty() {
            return Err(CoreError::EmptyRange { what: "discharge" });
        }
        Ok(())
    }
}

// ── RandomTraffic ─────────────────────────────────────────────────────────────

/// Uniformly random arrivals and discharge drawn from a [`SimRng`].
pub struct RandomTraffic {
    rng:     SimRng,
    profile: TrafficProfile,
}

impl RandomTraffic {
    /// Default profile (arrivals 0–2, discharge 1–3).
    pub fn new(rng: SimRng) -> Self {
        Self { rng, profile: TrafficProfile::default() }
    }

    pub fn with_profile(rng: SimRng, profile: TrafficProfile) -> CoreResult<Self> {
        profile.validate()?;
        Ok(Self { rng, profile })
    }

    /// Deterministic source for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SimRng::new(seed))
    }

    /// Entropy-backed source; every run differs.
    pub fn from_entropy() -> Self {
        Self::new(SimRng::from_entropy())
    }

    pub fn profile(&self) -> &TrafficProfile {
        &self.profile
    }
}

impl TrafficSource for RandomTraffic {
    #[inline]
    fn arrivals(&mut self, _approach: Approach) -> u32 {
        self.rng.gen_range(self.profile.arrivals.clone())
    }

    #[inline]
    fn discharge(&mut self, _approach: Approach) -> u32 {
        self.rng.gen_range(self.profile.discharge.clone())
    }
}

// ── ScriptedTraffic ───────────────────────────────────────────────────────────

/// Replays queued values; falls back to constants once a queue runs dry.
///
/// Handy in tests: `ScriptedTraffic::constant(1, 2)` reproduces the planning
/// transition exactly.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTraffic {
    arrivals:          VecDeque<u32>,
    discharge:         VecDeque<u32>,
    default_arrivals:  u32,
    default_discharge: u32,
}

impl ScriptedTraffic {
    /// Every draw returns the same values.
    pub fn constant(arrivals: u32, discharge: u32) -> Self {
        Self {
            default_arrivals: arrivals,
            default_discharge: discharge,
            ..Self::default()
        }
    }

    /// Queue explicit arrival draws, consumed in order.
    pub fn with_arrivals(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.arrivals.extend(values);
        self
    }

    /// Queue explicit discharge draws, consumed in order.
    pub fn with_discharge(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.discharge.extend(values);
        self
    }
}

impl TrafficSource for ScriptedTraffic {
    fn arrivals(&mut self, _approach: Approach) -> u32 {
        self.arrivals.pop_front().unwrap_or(self.default_arrivals)
    }

    fn discharge(&mut self, _approach: Approach) -> u32 {
        self.discharge.pop_front().unwrap_or(self.default_discharge)
    }
}
