//! The `Planner` trait — the single seam between search strategies and the
//! simulation driver.

use tl_core::{Action, TrafficState};

/// Pluggable action selection.
///
/// Every implementation looks `horizon` steps ahead from one observed
/// `state` and returns the first action of the best path it found, or
/// [`Action::Hold`] when no path reaches the horizon.
///
/// Each call is self-contained: search data is built fresh and dropped before
/// `plan` returns, so no history is carried between calls.
///
/// # Thread safety
///
/// A driver may run on its own thread, so implementations must be
/// `Send + Sync`.  None of the bundled planners hold mutable state.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysSwitch;
///
/// impl Planner for AlwaysSwitch {
///     fn name(&self) -> &str { "always-switch" }
///     fn plan(&self, _state: &TrafficState, _horizon: u32) -> Action {
///         Action::Switch
///     }
/// }
/// ```
pub trait Planner: Send + Sync {
    /// Short display name used in results (`"A*"`, `"BFS"`, …).
    fn name(&self) -> &str;

    /// Choose the action to take from `state`.
    fn plan(&self, state: &TrafficState, horizon: u32) -> Action;
}

impl<P: Planner + ?Sized> Planner for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        (**self).plan(state, horizon)
    }
}

impl<P: Planner + ?Sized> Planner for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        (**self).plan(state, horizon)
    }
}

impl<P: Planner + ?Sized> Planner for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn plan(&self, state: &TrafficState, horizon: u32) -> Action {
        (**self).plan(state, horizon)
    }
}

/// A [`Planner`] that never switches.
///
/// Useful as a baseline in comparisons and as a cheap stand-in in tests.
pub struct HoldPlanner;

impl Planner for HoldPlanner {
    fn name(&self) -> &str {
        "HOLD"
    }

    fn plan(&self, _state: &TrafficState, _horizon: u32) -> Action {
        Action::Hold
    }
}
