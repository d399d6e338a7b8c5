//! The controller's decision at each step.

use std::fmt;

/// What the controller asks the signal to do this step.
///
/// `Switch` is a request, not a command: the transition honours it only when
/// the current phase has been green for at least the minimum green time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Keep the current phase.
    #[default]
    Hold,
    /// Flip to the other phase if the minimum green time has elapsed.
    Switch,
}

impl Action {
    /// Both actions in the order every planner expands them.
    pub const ALL: [Action; 2] = [Action::Hold, Action::Switch];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Hold => "HOLD",
            Action::Switch => "SWITCH",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
