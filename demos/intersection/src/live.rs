//! `live` subcommand: one planner, one step at a time, with keyboard control.
//!
//! Three threads:
//!
//! - **sim**: drives [`Simulation::run`] and forwards every step over a
//!   channel.  After a run ends it waits for a reset or quit.
//! - **input**: reads stdin lines and maps them onto the shared
//!   [`RunControl`]; reset and quit also go to the sim thread.
//! - **main**: renders each received event until the sim thread hangs up.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::{debug, info};

use tl_output::report;
use tl_core::TrafficSource;
use tl_planner::{Planner, PlannerKind};
use tl_sim::{
    ChannelObserver, NoopObserver, RunControl, SimBuilder, SimEvent, Simulation, best_algorithm,
};

use crate::LiveArgs;

const MIN_DELAY: Duration = Duration::from_millis(10);
const MAX_DELAY: Duration = Duration::from_millis(2_000);

/// Commands the sim thread acts on between runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Reset,
    Quit,
}

pub fn execute(args: LiveArgs) -> Result<()> {
    let config = args.sim.config();

    let kind = match args.algorithm {
        Some(kind) => kind,
        None => {
            println!("\nRunning algorithm comparison to find best average waiting time...");
            let name = best_algorithm(&config, &mut NoopObserver)?;
            name.parse::<PlannerKind>()?
        }
    };

    println!("{}", report::banner(&format!("LIVE VIEW: {kind}"), 80));
    println!("Keys (then Enter): p pause/resume, r reset, + faster, - slower, q quit\n");

    let control = Arc::new(RunControl::with_step_delay(Duration::from_millis(args.delay_ms)));
    let (event_tx, event_rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();

    let planner = kind.build(config.planning_model());
    let mut sim = SimBuilder::new(config, planner).build()?;

    let sim_control = Arc::clone(&control);
    let sim_thread = thread::Builder::new()
        .name("sim".into())
        .spawn(move || drive(&mut sim, &sim_control, &event_tx, &cmd_rx))?;

    let input_control = Arc::clone(&control);
    thread::Builder::new()
        .name("input".into())
        .spawn(move || read_keys(io::stdin().lock(), &input_control, &cmd_tx))?;

    render(event_rx)?;

    sim_thread.join().map_err(|_| anyhow!("simulation thread panicked"))?;
    Ok(())
}

/// Sim thread body: run, then wait for a reset or quit, until told to stop.
fn drive<P: Planner, S: TrafficSource>(
    sim:      &mut Simulation<P, S>,
    control:  &RunControl,
    events:   &Sender<SimEvent>,
    commands: &Receiver<Command>,
) {
    loop {
        sim.run(&mut ChannelObserver::new(events.clone()), control);
        match commands.recv() {
            Ok(Command::Reset) => {
                debug!("reset requested");
                sim.reset();
                control.restart();
            }
            // Quit, or stdin closed with nothing left to do.
            Ok(Command::Quit) | Err(_) => break,
        }
    }
}

/// Map one line of input onto `control` and `commands`.  Returns `false`
/// once the user quits.
fn handle_key(line: &str, control: &RunControl, commands: &Sender<Command>) -> bool {
    match line.trim() {
        "p" => {
            let paused = control.toggle_pause();
            info!("{}", if paused { "paused" } else { "resumed" });
        }
        "r" => {
            // Stop before sending: the sim thread restarts the control on reset.
            control.stop();
            let _ = commands.send(Command::Reset);
        }
        "+" => {
            let delay = (control.step_delay() / 2).max(MIN_DELAY);
            control.set_step_delay(delay);
            info!("step delay {} ms", delay.as_millis());
        }
        "-" => {
            let delay = (control.step_delay() * 2).clamp(MIN_DELAY, MAX_DELAY);
            control.set_step_delay(delay);
            info!("step delay {} ms", delay.as_millis());
        }
        "q" => {
            control.stop();
            let _ = commands.send(Command::Quit);
            return false;
        }
        "" => {}
        other => info!("unknown key {other:?}"),
    }
    true
}

fn read_keys<R: BufRead>(input: R, control: &RunControl, commands: &Sender<Command>) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        if !handle_key(&line, control, commands) {
            break;
        }
    }
}

/// Running totals shown on every status line, rebuilt from the event stream.
#[derive(Default)]
struct Dashboard {
    algorithm:     String,
    total_steps:   u64,
    steps:         u64,
    total_waiting: u64,
    switches:      u64,
}

impl Dashboard {
    fn status(&mut self, record: &tl_sim::StepRecord) -> String {
        self.steps += 1;
        self.total_waiting += record.waiting as u64;
        if record.action == tl_core::Action::Switch {
            self.switches += 1;
        }
        let s = &record.state;
        format!(
            "[{}] Step {}/{}  N:{:>3} S:{:>3} E:{:>3} W:{:>3}  Phase {} (t={})  {:<6}  Waiting {:>3}  Avg {:.2}  Switches {}",
            self.algorithm,
            self.steps,
            self.total_steps,
            s.north(),
            s.south(),
            s.east(),
            s.west(),
            s.phase(),
            s.time_in_phase(),
            record.action.as_str(),
            record.waiting,
            self.total_waiting as f64 / self.steps as f64,
            self.switches,
        )
    }
}

fn render(events: Receiver<SimEvent>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut board = Dashboard::default();

    for event in events {
        match event {
            SimEvent::Started { algorithm, total_steps } => {
                board = Dashboard { algorithm, total_steps, ..Dashboard::default() };
            }
            SimEvent::Step(record) => writeln!(out, "{}", board.status(&record))?,
            SimEvent::Finished(result) => {
                writeln!(out, "\n{}", report::run_summary(&result))?;
                writeln!(out, "Press r to run again or q to quit.\n")?;
            }
        }
        out.flush()?;
    }
    Ok(())
}
