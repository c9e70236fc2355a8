/// Entry point: load config and layout, run the evacuation, report.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use config::{DisplayMode, LogConfig, SimConfig};
use error::SimError;
use sim::event::TrapCause;
use sim::level::load_layout;
use sim::step::{run, NullSink};
use sim::world::{Outcome, Report, WorldState};
use ui::plain::PlainSink;
use ui::renderer::Renderer;

fn main() -> ExitCode {
    let layout_arg = std::env::args_os().nth(1).map(PathBuf::from);
    let config = SimConfig::load().with_layout_override(layout_arg);

    if let Err(e) = init_logging(&config.log) {
        eprintln!("Logging init failed: {e}");
    }
    for w in &config.warnings {
        warn!("{w}");
    }

    let layout = match load_layout(config.layout.as_deref()) {
        Ok(layout) => layout,
        Err(e) => {
            error!("layout rejected: {e}");
            eprintln!("Layout error: {e}");
            return ExitCode::from(2);
        }
    };

    let mut world = WorldState::new(layout);
    let tick_delay = Duration::from_millis(config.speed.tick_delay_ms);

    let result = match config.display {
        DisplayMode::Terminal => run_terminal(&mut world, &config, tick_delay),
        DisplayMode::Plain => run(&mut world, &mut PlainSink::new(io::stdout().lock()), tick_delay),
        DisplayMode::None => run(&mut world, &mut NullSink, tick_delay),
    };

    match result {
        Ok(report) => print_report(&world, &report),
        Err(e) => {
            error!("simulation failed: {e}");
            eprintln!("Simulation error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Terminal mode: the renderer owns the screen between init and cleanup.
fn run_terminal(world: &mut WorldState, config: &SimConfig, tick_delay: Duration) -> Result<Report, SimError> {
    let mut renderer = Renderer::new(Duration::from_millis(config.speed.final_pause_ms));

    if let Err(e) = renderer.init() {
        let _ = renderer.cleanup();
        return Err(e.into());
    }

    let result = run(world, &mut renderer, tick_delay);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result
}

fn init_logging(log: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match &log.file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    }
}

fn print_report(world: &WorldState, report: &Report) -> ExitCode {
    println!();
    match report.outcome {
        Outcome::ReachedExit => {
            println!("The agent reached the exit safely in {} steps ({} ticks).", report.path.len(), report.ticks);
            let route: Vec<String> = std::iter::once(world.start)
                .chain(report.path.iter().copied())
                .map(|p| p.to_string())
                .collect();
            println!("Safest path: {}", route.join(" -> "));
            ExitCode::SUCCESS
        }
        Outcome::Trapped(TrapCause::NoSafePath) => {
            println!("No safe path found! The agent is trapped at {} after {} ticks.", world.agent, report.ticks);
            ExitCode::from(1)
        }
        Outcome::Trapped(TrapCause::ConsumedByHazard) => {
            println!("The fire reached the agent at {} after {} ticks.", world.agent, report.ticks);
            ExitCode::from(1)
        }
        Outcome::Aborted => {
            println!("Simulation aborted after {} ticks.", report.ticks);
            ExitCode::from(130)
        }
    }
}
