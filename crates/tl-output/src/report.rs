//! Fixed-width terminal tables for progress rows and the comparison summary.

use std::io::Write;

use tl_sim::{Comparison, RunResult, SimConfig, SimObserver, StepRecord};

const NARROW: usize = 70;
const WIDE: usize = 80;

fn rule(c: char, width: usize) -> String {
    std::iter::repeat_n(c, width).collect()
}

/// `title` between two `=` rules of `width`.
pub fn banner(title: &str, width: usize) -> String {
    let bar = rule('=', width);
    format!("{bar}\n{title}\n{bar}")
}

/// Banner and column header printed before the progress rows of one run.
pub fn step_header(algorithm: &str) -> String {
    format!(
        "{}\n{:<8} {:<6} {:<6} {:<6} {:<6} {:<8} {:<8} {:<8}\n{}",
        banner(&format!("Algorithm: {algorithm}"), NARROW),
        "Time", "N", "S", "E", "W", "Phase", "Action", "Total",
        rule('-', NARROW),
    )
}

/// One progress row: the state after the step and the action that led to it.
pub fn step_row(record: &StepRecord) -> String {
    let s = &record.state;
    format!(
        "{:<8} {:<6} {:<6} {:<6} {:<6} {:<8} {:<8} {:<8}",
        record.step.0,
        s.north(),
        s.south(),
        s.east(),
        s.west(),
        s.phase().as_str(),
        record.action.as_str(),
        record.waiting,
    )
}

/// Closing block of a single run.
pub fn run_summary(result: &RunResult) -> String {
    let title = if result.cancelled { "SIMULATION CANCELLED" } else { "SIMULATION COMPLETE" };
    format!(
        "{}\nAlgorithm: {}\nSteps: {}\nTotal Waiting: {} cars\nAverage Waiting: {:.2} cars\nSwitches: {}",
        banner(title, NARROW),
        result.algorithm,
        result.steps,
        result.total_waiting,
        result.avg_waiting,
        result.switches,
    )
}

/// Parameter block printed before a comparison.
pub fn parameters(config: &SimConfig) -> String {
    let seed = config.seed.map_or_else(|| "entropy".to_owned(), |s| s.to_string());
    format!(
        "Simulation Parameters:\n  Total Time: {} steps\n  Planning Horizon: {} steps\n  Min Green Time: {} steps\n  Seed: {seed}",
        config.total_steps, config.horizon, config.min_green_time,
    )
}

/// Performance table, one row per run in comparison order.
pub fn comparison_table(comparison: &Comparison) -> String {
    let mut out = format!(
        "{}\n{:<12} {:<15} {:<15} {:<12} {:<15}\n{}",
        banner("PERFORMANCE COMPARISON", WIDE),
        "Algorithm", "Total Wait", "Avg Wait", "Switches", "Avg Time(ms)",
        rule('-', WIDE),
    );
    for r in &comparison.results {
        out.push_str(&format!(
            "\n{:<12} {:<15} {:<15.2} {:<12} {:<15.3}",
            r.algorithm,
            r.total_waiting,
            r.avg_waiting,
            r.switches,
            r.avg_step_time_ms(),
        ));
    }
    out
}

/// Best average waiting and fastest planner.  Empty for an empty comparison.
pub fn best_performers(comparison: &Comparison) -> String {
    let (Some(best), Some(fastest)) = (comparison.best_by_waiting(), comparison.fastest()) else {
        return String::new();
    };
    format!(
        "{}\nBest Average Waiting Time: {} ({:.2} cars)\nFastest Execution: {} ({:.3} ms per step)",
        banner("BEST PERFORMERS", WIDE),
        best.algorithm,
        best.avg_waiting,
        fastest.algorithm,
        fastest.avg_step_time_ms(),
    )
}

// ── TablePrinter ──────────────────────────────────────────────────────────────

/// Observer that prints the header, every progress row and the run summary
/// to `out`.
///
/// The first I/O error is kept; later output is skipped.
pub struct TablePrinter<W: Write> {
    out:        W,
    last_error: Option<std::io::Error>,
}

impl<W: Write> TablePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, last_error: None }
    }

    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if self.last_error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{text}") {
            self.last_error = Some(e);
        }
    }
}

impl<W: Write> SimObserver for TablePrinter<W> {
    fn on_run_start(&mut self, algorithm: &str, _config: &SimConfig) {
        self.line(&format!("\n{}", step_header(algorithm)));
    }

    fn on_progress(&mut self, record: &StepRecord) {
        self.line(&step_row(record));
    }

    fn on_run_end(&mut self, result: &RunResult) {
        self.line(&format!("\n{}\n", run_summary(result)));
    }
}
