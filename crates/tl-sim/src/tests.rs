//! Integration tests for tl-sim.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tl_core::{Action, Phase, ScriptedTraffic, Tick, TrafficState};
use tl_planner::{BreadthFirst, HoldPlanner, Planner};

use crate::{
    ChannelObserver, NoopObserver, RunControl, RunResult, SimBuilder, SimConfig, SimEvent,
    SimObserver, StepRecord,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_steps: u64) -> SimConfig {
    SimConfig {
        total_steps,
        horizon: 3,
        seed: Some(42),
        ..SimConfig::default()
    }
}

/// Requests SWITCH every step.
struct AlwaysSwitch;

impl Planner for AlwaysSwitch {
    fn name(&self) -> &str {
        "always-switch"
    }

    fn plan(&self, _state: &TrafficState, _horizon: u32) -> Action {
        Action::Switch
    }
}

/// Counts every observer callback.
#[derive(Default)]
struct Counter {
    starts:   usize,
    steps:    usize,
    progress: Vec<Tick>,
    ends:     usize,
}

impl SimObserver for Counter {
    fn on_run_start(&mut self, _a: &str, _c: &SimConfig) { self.starts += 1; }
    fn on_step(&mut self, _r: &StepRecord) { self.steps += 1; }
    fn on_progress(&mut self, r: &StepRecord) { self.progress.push(r.step); }
    fn on_run_end(&mut self, _r: &RunResult) { self.ends += 1; }
}

// ── SimConfig / SimBuilder ────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;
    use tl_core::{CoreError, TrafficProfile};

    #[test]
    fn defaults() {
        let config = SimConfig::default();
        assert_eq!(config.total_steps, 300);
        assert_eq!(config.horizon, 10);
        assert_eq!(config.min_green_time, 3);
        assert_eq!(config.progress_interval, 10);
        assert_eq!(config.planning_model().min_green_time, 3);
    }

    #[test]
    fn zero_horizon_rejected() {
        let config = SimConfig { horizon: 0, ..test_config(10) };
        assert!(SimBuilder::new(config, HoldPlanner).build().is_err());
    }

    #[test]
    fn starts_from_initial_state() {
        let sim = SimBuilder::new(test_config(10), HoldPlanner).build().unwrap();
        assert_eq!(*sim.state(), TrafficState::INITIAL);
        assert_eq!(sim.tick(), Tick::ZERO);
        assert_eq!(sim.stats().steps(), 0);
    }

    #[test]
    fn custom_initial_state() {
        let start = TrafficState::new(4, 4, 4, 4, Phase::EW, 2);
        let sim = SimBuilder::new(test_config(10), HoldPlanner)
            .initial_state(start)
            .build()
            .unwrap();
        assert_eq!(*sim.state(), start);
    }

    #[test]
    fn with_traffic_uses_given_source() {
        let mut sim = SimBuilder::with_traffic(test_config(5), HoldPlanner, ScriptedTraffic::constant(1, 2))
            .build()
            .unwrap();
        let result = sim.run_to_end(&mut NoopObserver);
        assert_eq!(result.total_waiting, 30);
        assert_eq!(*sim.state(), TrafficState::new(0, 0, 5, 5, Phase::NS, 5));
    }

    #[test]
    fn empty_traffic_range_rejected() {
        let traffic = TrafficProfile { arrivals: 3..=1, ..TrafficProfile::default() };
        let config = SimConfig { traffic, ..test_config(10) };
        let err = SimBuilder::new(config.clone(), HoldPlanner).build().err().unwrap();
        assert!(matches!(err, SimError::Core(CoreError::EmptyRange { what: "arrivals" })));

        // Replacing the source does not skip the profile check.
        let err = SimBuilder::with_traffic(config, HoldPlanner, ScriptedTraffic::constant(1, 1))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn custom_profile_bounds_arrivals() {
        let traffic = TrafficProfile { arrivals: 0..=0, discharge: 1..=3 };
        let config = SimConfig { traffic, ..test_config(20) };
        let mut sim = SimBuilder::new(config, BreadthFirst::default()).build().unwrap();
        let result = sim.run_to_end(&mut NoopObserver);
        assert_eq!(result.total_waiting, 0);
        let s = sim.state();
        assert_eq!([s.north(), s.south(), s.east(), s.west()], [0; 4]);
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn hold_with_planning_rates_is_exact() {
        // Arrivals 1, discharge 2, always HOLD on NS: N and S stay at 0 while
        // E and W grow by one per step, so waiting after step k is 2k.
        let mut sim = SimBuilder::new(test_config(5), HoldPlanner)
            .traffic(ScriptedTraffic::constant(1, 2))
            .build()
            .unwrap();
        let result = sim.run_to_end(&mut NoopObserver);
        assert_eq!(result.algorithm, "HOLD");
        assert_eq!(result.total_waiting, 30);
        assert_eq!(result.avg_waiting, 6.0);
        assert_eq!(result.switches, 0);
        assert_eq!(result.steps, 5);
        assert!(!result.cancelled);
        assert_eq!(*sim.state(), TrafficState::new(0, 0, 5, 5, Phase::NS, 5));
    }

    #[test]
    fn switch_requests_are_counted_even_when_blocked() {
        let mut sim = SimBuilder::new(test_config(7), AlwaysSwitch)
            .traffic(ScriptedTraffic::constant(1, 2))
            .build()
            .unwrap();
        let result = sim.run_to_end(&mut NoopObserver);
        assert_eq!(result.switches, 7);
        // Blocked for t=0..2, flips at t=3, then blocked again for three steps.
        assert_eq!(sim.state().phase(), Phase::EW);
        assert_eq!(sim.state().time_in_phase(), 3);
    }

    #[test]
    fn averages_are_exact_and_switches_bounded() {
        let n = 40;
        let mut sim = SimBuilder::new(test_config(n), BreadthFirst::default()).build().unwrap();
        let result = sim.run_to_end(&mut NoopObserver);
        assert_eq!(result.steps, n);
        assert_eq!(result.avg_waiting, result.total_waiting as f64 / n as f64);
        assert!(result.switches <= n);
        assert!(result.avg_step_time >= 0.0);
    }

    #[test]
    fn run_simulation_averages_are_exact() {
        let n = 25;
        let result =
            crate::run_simulation(BreadthFirst::default(), &test_config(n), &mut NoopObserver).unwrap();
        assert_eq!(result.algorithm, "BFS");
        assert_eq!(result.steps, n);
        assert!(!result.cancelled);
        assert_eq!(result.avg_waiting, result.total_waiting as f64 / n as f64);
        assert!(result.switches <= n);

        // Same seed, same traffic as a hand-built driver.
        let mut sim = SimBuilder::new(test_config(n), BreadthFirst::default()).build().unwrap();
        let direct = sim.run_to_end(&mut NoopObserver);
        assert_eq!(result.total_waiting, direct.total_waiting);
        assert_eq!(result.switches, direct.switches);
    }

    #[test]
    fn run_simulation_rejects_bad_config() {
        let config = SimConfig { horizon: 0, ..test_config(5) };
        assert!(crate::run_simulation(HoldPlanner, &config, &mut NoopObserver).is_err());
    }

    #[test]
    fn zero_steps_guards_division() {
        let mut sim = SimBuilder::new(test_config(0), HoldPlanner).build().unwrap();
        let result = sim.run_to_end(&mut NoopObserver);
        assert_eq!(result.steps, 0);
        assert_eq!(result.avg_waiting, 0.0);
        assert_eq!(result.avg_step_time, 0.0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let mut sim = SimBuilder::new(test_config(30), BreadthFirst::default()).build().unwrap();
            sim.run_to_end(&mut NoopObserver)
        };
        let (a, b) = (run(), run());
        assert_eq!(a.total_waiting, b.total_waiting);
        assert_eq!(a.switches, b.switches);
    }

    #[test]
    fn observer_called_correct_number_of_times() {
        let mut sim = SimBuilder::new(test_config(25), HoldPlanner).build().unwrap();
        let mut obs = Counter::default();
        sim.run_to_end(&mut obs);
        assert_eq!(obs.starts, 1);
        assert_eq!(obs.steps, 25);
        assert_eq!(obs.progress, vec![Tick(0), Tick(10), Tick(20)]);
        assert_eq!(obs.ends, 1);
    }

    #[test]
    fn progress_interval_zero_disables_progress() {
        let config = SimConfig { progress_interval: 0, ..test_config(12) };
        let mut sim = SimBuilder::new(config, HoldPlanner).build().unwrap();
        let mut obs = Counter::default();
        sim.run_to_end(&mut obs);
        assert!(obs.progress.is_empty());
        assert_eq!(obs.steps, 12);
    }

    #[test]
    fn step_record_matches_stats() {
        let mut sim = SimBuilder::new(test_config(3), AlwaysSwitch).build().unwrap();
        let record = sim.step();
        assert_eq!(record.step, Tick(0));
        assert_eq!(record.before, TrafficState::INITIAL);
        assert_eq!(record.action, Action::Switch);
        assert_eq!(record.waiting, record.state.total_waiting());
        assert_eq!(sim.stats().total_waiting, record.waiting as u64);
        assert_eq!(sim.stats().switches, 1);
        assert_eq!(sim.tick(), Tick(1));
    }

    #[test]
    fn reset_returns_to_init() {
        let mut sim = SimBuilder::new(test_config(10), HoldPlanner).build().unwrap();
        sim.run_to_end(&mut NoopObserver);
        assert!(sim.is_finished());
        sim.reset();
        assert_eq!(*sim.state(), TrafficState::INITIAL);
        assert_eq!(sim.tick(), Tick::ZERO);
        assert_eq!(sim.stats().total_waiting, 0);
        assert_eq!(sim.stats().switches, 0);
        assert!(sim.stats().step_times.is_empty());
        assert_eq!(sim.run_to_end(&mut NoopObserver).steps, 10);
    }
}

// ── RunControl ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod control_tests {
    use super::*;

    #[test]
    fn flags() {
        let control = RunControl::new();
        assert!(control.is_running());
        assert!(!control.is_paused());
        assert!(control.toggle_pause());
        assert!(control.is_paused());
        assert!(!control.toggle_pause());
        control.stop();
        assert!(!control.is_running());
        control.restart();
        assert!(control.is_running());
    }

    #[test]
    fn stopped_before_start_runs_nothing() {
        let control = RunControl::new();
        control.stop();
        let mut sim = SimBuilder::new(test_config(10), HoldPlanner).build().unwrap();
        let result = sim.run(&mut NoopObserver, &control);
        assert!(result.cancelled);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn stop_mid_run_keeps_consistent_stats() {
        struct StopAfter {
            control: Arc<RunControl>,
            after:   u64,
        }
        impl SimObserver for StopAfter {
            fn on_step(&mut self, r: &StepRecord) {
                if r.step.0 + 1 >= self.after {
                    self.control.stop();
                }
            }
        }

        let control = Arc::new(RunControl::new());
        let mut obs = StopAfter { control: Arc::clone(&control), after: 5 };
        let mut sim = SimBuilder::new(test_config(100), HoldPlanner)
            .traffic(ScriptedTraffic::constant(1, 2))
            .build()
            .unwrap();
        let result = sim.run(&mut obs, &control);
        assert!(result.cancelled);
        assert_eq!(result.steps, 5);
        assert_eq!(result.total_waiting, 30);
        assert_eq!(result.avg_waiting, 6.0);
    }

    #[test]
    fn pause_holds_progress_until_resume() {
        let control = Arc::new(RunControl::new());
        control.pause();

        let (tx, rx) = mpsc::channel();
        let worker_control = Arc::clone(&control);
        let handle = thread::spawn(move || {
            let mut sim = SimBuilder::new(test_config(20), HoldPlanner).build().unwrap();
            sim.run(&mut ChannelObserver::new(tx), &worker_control)
        });

        thread::sleep(Duration::from_millis(300));
        let early: Vec<SimEvent> = rx.try_iter().collect();
        assert_eq!(early.len(), 1, "only Started expected while paused: {early:?}");
        assert!(matches!(early[0], SimEvent::Started { total_steps: 20, .. }));

        control.resume();
        let result = handle.join().unwrap();
        assert!(!result.cancelled);
        assert_eq!(result.steps, 20);

        let rest: Vec<SimEvent> = rx.iter().collect();
        let steps = rest.iter().filter(|e| matches!(e, SimEvent::Step(_))).count();
        assert_eq!(steps, 20);
        assert!(matches!(rest.last(), Some(SimEvent::Finished(_))));
    }

    #[test]
    fn stop_while_paused_cancels() {
        let control = Arc::new(RunControl::new());
        control.pause();
        let worker_control = Arc::clone(&control);
        let handle = thread::spawn(move || {
            let mut sim = SimBuilder::new(test_config(20), HoldPlanner).build().unwrap();
            sim.run(&mut NoopObserver, &worker_control)
        });
        thread::sleep(Duration::from_millis(150));
        control.stop();
        let result = handle.join().unwrap();
        assert!(result.cancelled);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn step_delay_round_trips() {
        let control = RunControl::with_step_delay(Duration::from_millis(250));
        assert_eq!(control.step_delay(), Duration::from_millis(250));
    }
}

// ── Comparison ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod compare_tests {
    use super::*;
    use crate::{
        Comparison, SimError, best_algorithm, compare_algorithms, compare_named, compare_planners,
    };

    fn result(name: &str, avg_waiting: f64, avg_step_time: f64) -> RunResult {
        RunResult {
            algorithm: name.to_owned(),
            total_waiting: 0,
            avg_waiting,
            switches: 0,
            avg_step_time,
            steps: 0,
            cancelled: false,
        }
    }

    #[test]
    fn best_and_fastest_prefer_first_on_ties() {
        let comparison = Comparison {
            results: vec![
                result("A*", 5.0, 0.002),
                result("BFS", 4.0, 0.001),
                result("DFS", 4.0, 0.001),
            ],
        };
        assert_eq!(comparison.best_by_waiting().unwrap().algorithm, "BFS");
        assert_eq!(comparison.fastest().unwrap().algorithm, "BFS");
        assert_eq!(comparison.get("DFS").unwrap().avg_waiting, 4.0);
        assert!(Comparison::default().best_by_waiting().is_none());
    }

    #[test]
    fn empty_planner_list_errors() {
        let err = compare_planners(&[], &test_config(5), &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::NoPlanners));
    }

    #[test]
    fn compares_all_five_in_order() {
        let config = test_config(20);
        let comparison = compare_algorithms(&config, &mut NoopObserver).unwrap();
        let names: Vec<&str> = comparison.results.iter().map(|r| r.algorithm.as_str()).collect();
        assert_eq!(names, ["A*", "BFS", "DFS", "UCS", "IDDFS"]);
        assert!(comparison.results.iter().all(|r| r.steps == 20 && !r.cancelled));
    }

    #[test]
    fn best_matches_direct_minimum() {
        let comparison = compare_algorithms(&test_config(20), &mut NoopObserver).unwrap();
        let best = comparison.best_by_waiting().unwrap();
        assert!(["A*", "BFS", "DFS", "UCS", "IDDFS"].contains(&best.algorithm.as_str()));
        let min = comparison
            .results
            .iter()
            .map(|r| r.avg_waiting)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(best.avg_waiting, min);
    }

    #[test]
    fn best_algorithm_is_first_minimum() {
        let config = test_config(20);
        let name = best_algorithm(&config, &mut NoopObserver).unwrap();
        assert!(["A*", "BFS", "DFS", "UCS", "IDDFS"].contains(&name.as_str()));

        let comparison = compare_algorithms(&config, &mut NoopObserver).unwrap();
        let first_min = comparison
            .results
            .iter()
            .fold(None, |best: Option<&RunResult>, r| match best {
                Some(b) if b.avg_waiting <= r.avg_waiting => Some(b),
                _ => Some(r),
            })
            .unwrap();
        assert_eq!(name, first_min.algorithm);
    }

    #[test]
    fn compare_named_runs_in_given_order() {
        let comparison = compare_named(&["ucs", "A*"], &test_config(10), &mut NoopObserver).unwrap();
        let names: Vec<&str> = comparison.results.iter().map(|r| r.algorithm.as_str()).collect();
        assert_eq!(names, ["UCS", "A*"]);
    }

    #[test]
    fn compare_named_rejects_unknown_name() {
        let mut obs = Counter::default();
        let err = compare_named(&["bfs", "greedy"], &test_config(10), &mut obs).unwrap_err();
        assert!(matches!(err, SimError::Planner(_)));
        assert_eq!(obs.starts, 0);
    }

    #[test]
    fn seeded_comparison_is_reproducible() {
        let a = compare_algorithms(&test_config(15), &mut NoopObserver).unwrap();
        let b = compare_algorithms(&test_config(15), &mut NoopObserver).unwrap();
        for (ra, rb) in a.results.iter().zip(&b.results) {
            assert_eq!(ra.total_waiting, rb.total_waiting);
            assert_eq!(ra.switches, rb.switches);
        }
    }

    #[test]
    fn custom_planner_set() {
        let planners: Vec<Box<dyn Planner>> = vec![Box::new(HoldPlanner), Box::new(AlwaysSwitch)];
        let mut obs = Counter::default();
        let comparison = compare_planners(&planners, &test_config(10), &mut obs).unwrap();
        assert_eq!(comparison.results.len(), 2);
        assert_eq!(obs.starts, 2);
        assert_eq!(obs.steps, 20);
        assert_eq!(comparison.get("always-switch").unwrap().switches, 10);
    }
}
