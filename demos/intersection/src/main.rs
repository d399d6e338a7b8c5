//! intersection — command-line front end for the HOLD/SWITCH planners.
//!
//! Three subcommands:
//!
//! - `compare`: run all five planners under the same settings and print the
//!   performance table and best performers.
//! - `run`: a single driver run with progress rows every N steps.
//! - `live`: step-by-step terminal view with pause, reset and speed keys.
//!
//! Set `RUST_LOG=debug` for per-run log lines, `trace` for every step.

mod live;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use tl_core::{DEFAULT_MIN_GREEN_TIME, TrafficProfile};
use tl_output::{CsvWriter, StepCsvObserver, TablePrinter, report};
use tl_planner::PlannerKind;
use tl_sim::{
    Comparison, ProgressLogger, SimBuilder, SimConfig, SimObserver, compare_algorithms,
    compare_named,
};

#[derive(Parser)]
#[command(name = "intersection")]
#[command(version, about = "Four-way intersection signal planning with classical search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every planner once and compare average waiting and latency
    Compare(CompareArgs),

    /// Run a single planner
    Run(RunArgs),

    /// Watch one planner step by step (p pause, r reset, +/- speed, q quit)
    Live(LiveArgs),
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct SimArgs {
    /// Steps to simulate
    #[arg(long, short = 's', default_value_t = 300)]
    steps: u64,

    /// Planner lookahead depth
    #[arg(long, default_value_t = 10)]
    horizon: u32,

    /// Minimum steps a phase holds before a SWITCH is honored
    #[arg(long, default_value_t = DEFAULT_MIN_GREEN_TIME)]
    min_green: u32,

    /// Random seed for reproducible traffic
    #[arg(long)]
    seed: Option<u64>,

    /// Most cars that can arrive on one approach in a step
    #[arg(long, default_value_t = 2)]
    max_arrivals: u32,

    /// Print a progress row every N steps (0 disables)
    #[arg(long, default_value_t = 10)]
    progress_interval: u64,

    /// Report progress through the logger instead of printed tables
    #[arg(long)]
    log_progress: bool,
}

impl SimArgs {
    fn config(&self) -> SimConfig {
        SimConfig {
            total_steps:       self.steps,
            horizon:           self.horizon,
            min_green_time:    self.min_green,
            progress_interval: self.progress_interval,
            seed:              self.seed,
            traffic:           TrafficProfile {
                arrivals: 0..=self.max_arrivals,
                ..TrafficProfile::default()
            },
        }
    }
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Only compare these planners, e.g. `--only a*,ucs`
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Write steps.csv and comparison.csv into this directory
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Planner: A*, BFS, DFS, UCS or IDDFS
    #[arg(long, short = 'a')]
    algorithm: PlannerKind,

    #[command(flatten)]
    sim: SimArgs,

    /// Write steps.csv and comparison.csv into this directory
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LiveArgs {
    /// Planner to watch; the best one by average waiting when omitted
    #[arg(long, short = 'a')]
    algorithm: Option<PlannerKind>,

    /// Initial delay between steps in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    #[command(flatten)]
    sim: SimArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compare(args) => compare(args),
        Commands::Run(args) => run(args),
        Commands::Live(args) => live::execute(args),
    }
}

// ── compare ───────────────────────────────────────────────────────────────────

fn compare(args: CompareArgs) -> Result<()> {
    let config = args.sim.config();

    println!("{}", report::banner("INTERSECTION SIGNAL PLANNING: ALGORITHM COMPARISON", 80));
    println!("\n{}", report::parameters(&config));

    let t0 = Instant::now();
    let comparison = with_observers(&args.sim, args.output.as_deref(), |mut obs| {
        if args.only.is_empty() {
            Ok(compare_algorithms(&config, &mut obs)?)
        } else {
            let names: Vec<&str> = args.only.iter().map(String::as_str).collect();
            Ok(compare_named(&names, &config, &mut obs)?)
        }
    })?;
    info!("comparison finished in {:.3} s", t0.elapsed().as_secs_f64());

    print_comparison(&comparison)?;
    Ok(())
}

fn print_comparison(comparison: &Comparison) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "\n{}", report::comparison_table(comparison))?;
    writeln!(out, "\n{}\n", report::best_performers(comparison))?;
    Ok(())
}

// ── run ───────────────────────────────────────────────────────────────────────

fn run(args: RunArgs) -> Result<()> {
    let config = args.sim.config();
    let planner = args.algorithm.build(config.planning_model());
    let mut sim = SimBuilder::new(config, planner).build()?;

    let result = with_observers(&args.sim, args.output.as_deref(), |mut obs| {
        Ok(sim.run_to_end(&mut obs))
    })?;
    info!(
        "{}: {} steps, avg waiting {:.2}, {:.3} ms/step",
        result.algorithm,
        result.steps,
        result.avg_waiting,
        result.avg_step_time_ms()
    );
    Ok(())
}

// ── Observer wiring ───────────────────────────────────────────────────────────

/// Call `f` with the progress observer chosen by `sim`, paired with a CSV
/// observer when `output` is set.
fn with_observers<T>(
    sim:    &SimArgs,
    output: Option<&Path>,
    f:      impl FnOnce(&mut dyn SimObserver) -> Result<T>,
) -> Result<T> {
    let mut table = TablePrinter::new(io::stdout());
    let mut logger = ProgressLogger::new();
    let progress: &mut dyn SimObserver = if sim.log_progress { &mut logger } else { &mut table };

    let value = match output {
        None => f(progress)?,
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("cannot create output files in {}", dir.display()))?;
            let mut csv = StepCsvObserver::new(writer);
            let value = f(&mut (progress, &mut csv))?;
            csv.finish()
                .with_context(|| format!("writing output to {}", dir.display()))?;
            println!("\nWrote steps.csv and comparison.csv to {}", dir.display());
            value
        }
    };

    if let Some(e) = table.take_error() {
        warn!("terminal output error: {e}");
    }
    Ok(value)
}
