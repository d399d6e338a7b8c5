//! Intersection state: queue lengths per approach plus the signal phase.
//!
//! `TrafficState` is a small `Copy` value.  Planners hash and compare whole
//! states for visited-set pruning, so equality covers every field including
//! `time_in_phase`.

use std::fmt;

// ── Approach ──────────────────────────────────────────────────────────────────

/// One of the four arms of the intersection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Approach {
    North,
    South,
    East,
    West,
}

impl Approach {
    /// All approaches in the canonical N, S, E, W order.  Random draws in the
    /// simulation transition follow this order.
    pub const ALL: [Approach; 4] = [
        Approach::North,
        Approach::South,
        Approach::East,
        Approach::West,
    ];

    /// The phase under which this approach has a green signal.
    #[inline]
    pub fn phase(self) -> Phase {
        match self {
            Approach::North | Approach::South => Phase::NS,
            Approach::East | Approach::West => Phase::EW,
        }
    }
}

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Which pair of opposing approaches currently has the green signal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// North and South are green.
    #[default]
    NS,
    /// East and West are green.
    EW,
}

impl Phase {
    /// The other phase.
    #[inline]
    pub fn flipped(self) -> Phase {
        match self {
            Phase::NS => Phase::EW,
            Phase::EW => Phase::NS,
        }
    }

    /// The two approaches discharged while this phase is green.
    #[inline]
    pub fn green_approaches(self) -> [Approach; 2] {
        match self {
            Phase::NS => [Approach::North, Approach::South],
            Phase::EW => [Approach::East, Approach::West],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::NS => "NS",
            Phase::EW => "EW",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TrafficState ──────────────────────────────────────────────────────────────

/// Snapshot of the intersection at one step.
///
/// Fields are private: a new state is only ever produced by the planning or
/// simulation transition (or by [`TrafficState::new`] for an observed
/// starting point), which keeps `phase` and `time_in_phase` consistent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficState {
    north:         u32,
    south:         u32,
    east:          u32,
    west:          u32,
    phase:         Phase,
    time_in_phase: u32,
}

impl TrafficState {
    /// Empty intersection, NS green, phase just started.
    pub const INITIAL: TrafficState = TrafficState {
        north:         0,
        south:         0,
        east:          0,
        west:          0,
        phase:         Phase::NS,
        time_in_phase: 0,
    };

    pub fn new(
        north:         u32,
        south:         u32,
        east:          u32,
        west:          u32,
        phase:         Phase,
        time_in_phase: u32,
    ) -> Self {
        Self { north, south, east, west, phase, time_in_phase }
    }

    #[inline]
    pub fn north(&self) -> u32 {
        self.north
    }

    #[inline]
    pub fn south(&self) -> u32 {
        self.south
    }

    #[inline]
    pub fn east(&self) -> u32 {
        self.east
    }

    #[inline]
    pub fn west(&self) -> u32 {
        self.west
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Steps elapsed since the last phase change.
    #[inline]
    pub fn time_in_phase(&self) -> u32 {
        self.time_in_phase
    }

    /// Queue length on one approach.
    #[inline]
    pub fn queue(&self, approach: Approach) -> u32 {
        match approach {
            Approach::North => self.north,
            Approach::South => self.south,
            Approach::East => self.east,
            Approach::West => self.west,
        }
    }

    /// Queue lengths in N, S, E, W order.
    #[inline]
    pub fn queues(&self) -> [u32; 4] {
        [self.north, self.south, self.east, self.west]
    }

    /// Total vehicles waiting across all four approaches.
    #[inline]
    pub fn total_waiting(&self) -> u32 {
        self.north + self.south + self.east + self.west
    }

    /// Longest single-approach queue.
    #[inline]
    pub fn longest_queue(&self) -> u32 {
        self.north.max(self.south).max(self.east).max(self.west)
    }

    /// Crate-internal builder used by the transitions once arrivals,
    /// discharge, and the phase have been resolved.
    pub(crate) fn from_parts(queues: [u32; 4], phase: Phase, time_in_phase: u32) -> Self {
        let [north, south, east, west] = queues;
        Self { north, south, east, west, phase, time_in_phase }
    }
}

impl fmt::Display for TrafficState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(N={}, S={}, E={}, W={}, {}, t={})",
            self.north, self.south, self.east, self.west, self.phase, self.time_in_phase
        )
    }
}
