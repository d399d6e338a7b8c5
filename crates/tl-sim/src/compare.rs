//! Comparison harness: one driver run per planner under identical settings.

use log::debug;
use tl_core::{RandomTraffic, SimRng};
use tl_planner::{Planner, PlannerKind};

use crate::{RunControl, RunResult, SimBuilder, SimConfig, SimError, SimObserver, SimResult};

/// Results of one comparison, in the order the planners ran.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comparison {
    pub results: Vec<RunResult>,
}

impl Comparison {
    /// Lowest average waiting; the earliest result wins ties.
    pub fn best_by_waiting(&self) -> Option<&RunResult> {
        first_min_by(&self.results, |r| r.avg_waiting)
    }

    /// Lowest average planning latency; the earliest result wins ties.
    pub fn fastest(&self) -> Option<&RunResult> {
        first_min_by(&self.results, |r| r.avg_step_time)
    }

    pub fn get(&self, algorithm: &str) -> Option<&RunResult> {
        self.results.iter().find(|r| r.algorithm == algorithm)
    }
}

fn first_min_by(results: &[RunResult], key: impl Fn(&RunResult) -> f64) -> Option<&RunResult> {
    results.iter().fold(None, |best: Option<&RunResult>, r| match best {
        Some(b) if key(b) <= key(r) => Some(b),
        _ => Some(r),
    })
}

/// Run every planner once with `config`.
///
/// Each run gets its own traffic RNG, derived from `config.seed` by planner
/// position, so a seeded comparison is reproducible.  Runs are sequential so
/// latency measurements do not interfere.
pub fn compare_planners<O: SimObserver>(
    planners: &[Box<dyn Planner>],
    config:   &SimConfig,
    observer: &mut O,
) -> SimResult<Comparison> {
    if planners.is_empty() {
        return Err(SimError::NoPlanners);
    }
    config.validate()?;

    let mut root = SimRng::from_seed_opt(config.seed);
    let control = RunControl::new();
    let mut results = Vec::with_capacity(planners.len());

    for (i, planner) in planners.iter().enumerate() {
        let source = RandomTraffic::with_profile(root.child(i as u64), config.traffic.clone())?;
        let mut sim = SimBuilder::with_traffic(config.clone(), planner.as_ref(), source).build()?;
        results.push(sim.run(observer, &control));
    }

    let comparison = Comparison { results };
    if let Some(best) = comparison.best_by_waiting() {
        debug!("best by average waiting: {} ({:.2})", best.algorithm, best.avg_waiting);
    }
    Ok(comparison)
}

/// Compare the five bundled planners in the order A*, BFS, DFS, UCS, IDDFS.
pub fn compare_algorithms<O: SimObserver>(
    config:   &SimConfig,
    observer: &mut O,
) -> SimResult<Comparison> {
    let planners = PlannerKind::build_all(config.planning_model());
    compare_planners(&planners, config, observer)
}

/// Compare the bundled planners named in `names`, in that order.
///
/// Names parse case-insensitively (`"a*"`, `"bfs"`, …); an unknown name
/// fails before any run starts.
pub fn compare_named<O: SimObserver>(
    names:    &[&str],
    config:   &SimConfig,
    observer: &mut O,
) -> SimResult<Comparison> {
    let model = config.planning_model();
    let planners = names
        .iter()
        .map(|name| -> SimResult<Box<dyn Planner>> {
            Ok(name.parse::<PlannerKind>()?.build(model))
        })
        .collect::<SimResult<Vec<_>>>()?;
    compare_planners(&planners, config, observer)
}

/// Name of the bundled planner with the lowest average waiting.
pub fn best_algorithm<O: SimObserver>(config: &SimConfig, observer: &mut O) -> SimResult<String> {
    let comparison = compare_algorithms(config, observer)?;
    comparison
        .best_by_waiting()
        .map(|r| r.algorithm.clone())
        .ok_or(SimError::NoPlanners)
}
