//! Cooperative pause / resume / stop for a run on another thread.
//!
//! A `RunControl` is shared via `Arc` between the thread driving
//! [`Simulation::run`][crate::Simulation::run] and whoever controls it (a UI
//! or terminal consumer).  The driver checks it only at step boundaries, so a
//! step is never interrupted halfway and statistics stay consistent.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// How often a paused driver re-checks the flags.
pub const PAUSE_POLL: Duration = Duration::from_millis(100);

/// Shared running / paused flag pair plus an adjustable per-step delay.
#[derive(Debug)]
pub struct RunControl {
    running:       AtomicBool,
    paused:        AtomicBool,
    step_delay_ms: AtomicU64,
}

impl Default for RunControl {
    fn default() -> Self {
        Self::new()
    }
}

impl RunControl {
    /// Running, not paused, no delay between steps.
    pub fn new() -> Self {
        Self {
            running:       AtomicBool::new(true),
            paused:        AtomicBool::new(false),
            step_delay_ms: AtomicU64::new(0),
        }
    }

    pub fn with_step_delay(delay: Duration) -> Self {
        let control = Self::new();
        control.set_step_delay(delay);
        control
    }

    /// Ask the driver to stop at the next step boundary.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Clear a previous stop and pause, e.g. before a reset run.
    pub fn restart(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Flip the paused flag; returns the new value.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn set_step_delay(&self, delay: Duration) {
        self.step_delay_ms.store(delay.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms.load(Ordering::Relaxed))
    }

    /// Block while paused.  Returns `false` if a stop was requested, either
    /// before or during the pause.
    pub fn wait_while_paused(&self) -> bool {
        while self.is_paused() && self.is_running() {
            thread::sleep(PAUSE_POLL);
        }
        self.is_running()
    }
}
