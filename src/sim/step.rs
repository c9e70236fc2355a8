/// The step function: advances the evacuation by one tick.
///
/// Processing order:
///   1. Exit check      (agent on an exit → ReachedExit)
///   2. Plan            (BFS from the agent; empty → Trapped)
///   3. Move            (one step along the plan, trail the vacated cell)
///   4. Spread          (hazard grows by one ring)
///   5. Consumption     (agent cell ignited → Trapped)
///
/// `run` wraps `step` with the render sink and the inter-tick delay:
/// render → step → delay, until a terminal phase or an abort.
/// Every tick boundary leaves the grid consistent, so stopping between
/// ticks is always safe.

use std::io;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use super::event::{SimEvent, TrapCause};
use super::world::{Phase, Report, WorldState};
use crate::domain::cell::Cell;
use crate::domain::grid::Position;
use crate::domain::{hazard, path};
use crate::error::{GridError, SimError};

// ══════════════════════════════════════════════════════════════
// Render sink seam
// ══════════════════════════════════════════════════════════════

/// What the sink wants after a frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Abort,
}

/// Consumer of read-only world snapshots (terminal, text log, nothing).
pub trait FrameSink {
    /// Called once per tick before the step, and once more after the
    /// loop reaches a terminal phase.
    fn frame(&mut self, world: &WorldState) -> io::Result<Flow>;

    /// Called once when the agent escaped, with the full route.
    fn final_path(&mut self, _world: &WorldState, _path: &[Position]) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that displays nothing.
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame(&mut self, _world: &WorldState) -> io::Result<Flow> {
        Ok(Flow::Continue)
    }
}

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

/// Run to completion. `tick_delay` may be zero.
pub fn run(
    world: &mut WorldState,
    sink: &mut dyn FrameSink,
    tick_delay: Duration,
) -> Result<Report, SimError> {
    info!(
        layout = %world.name,
        rows = world.grid.rows(),
        cols = world.grid.cols(),
        start = %world.start,
        "evacuation started"
    );

    loop {
        if sink.frame(world)? == Flow::Abort {
            info!(tick = world.tick, "run aborted by sink");
            break;
        }
        if world.phase.is_terminal() {
            break;
        }
        step(world)?;
        if !world.phase.is_terminal() && !tick_delay.is_zero() {
            thread::sleep(tick_delay);
        }
    }

    let report = world.report();
    if !report.path.is_empty() {
        sink.final_path(world, &report.path)?;
    }
    info!(outcome = ?report.outcome, ticks = report.ticks, route = report.path.len(), "evacuation finished");
    Ok(report)
}

/// Advance one tick. No-op once a terminal phase is reached.
pub fn step(world: &mut WorldState) -> Result<(), GridError> {
    if world.phase.is_terminal() {
        return Ok(());
    }

    world.tick += 1;
    world.events.clear();

    if resolve_exit(world)? {
        return Ok(());
    }
    if !resolve_plan(world) {
        return Ok(());
    }
    resolve_move(world)?;
    let ignited = resolve_spread(world);
    resolve_consumption(world, &ignited)?;

    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Phases of a tick
// ══════════════════════════════════════════════════════════════

fn resolve_exit(world: &mut WorldState) -> Result<bool, GridError> {
    if !world.grid.cell_at(world.agent)?.is_exit() {
        return Ok(false);
    }
    world.phase = Phase::ReachedExit;
    world.plan.clear();
    world.events.push(SimEvent::ReachedExit { at: world.agent });
    info!(tick = world.tick, at = %world.agent, steps = world.journey.len(), "agent reached the exit");
    Ok(true)
}

/// Re-plan from scratch. Returns false when the agent is trapped.
fn resolve_plan(world: &mut WorldState) -> bool {
    let search = path::search(&world.grid, world.agent);
    debug!(tick = world.tick, steps = search.path.len(), expanded = search.expanded, "planned");
    world.plan = search.path;

    if world.plan.is_empty() {
        trap(world, TrapCause::NoSafePath);
        return false;
    }
    world.events.push(SimEvent::Planned { steps: world.plan.len() });
    true
}

fn resolve_move(world: &mut WorldState) -> Result<(), GridError> {
    let from = world.agent;
    let to = world.plan[0];

    world.grid.set_cell(from, Cell::Open)?;
    world.mark_trail(from);
    if !world.grid.cell_at(to)?.is_exit() {
        world.grid.set_cell(to, Cell::Agent)?;
    }
    world.agent = to;
    world.journey.push(to);
    world.events.push(SimEvent::AgentMoved { from, to });
    Ok(())
}

fn resolve_spread(world: &mut WorldState) -> Vec<Position> {
    let ignited = hazard::spread(&mut world.grid);
    if !ignited.is_empty() {
        debug!(tick = world.tick, ignited = ignited.len(), "hazard spread");
        world.events.push(SimEvent::HazardSpread { ignited: ignited.len() });
    }
    ignited
}

/// The agent must not keep planning from a burning cell.
fn resolve_consumption(world: &mut WorldState, ignited: &[Position]) -> Result<(), GridError> {
    if ignited.contains(&world.agent) || world.grid.cell_at(world.agent)?.is_hazard() {
        trap(world, TrapCause::ConsumedByHazard);
    }
    Ok(())
}

fn trap(world: &mut WorldState, cause: TrapCause) {
    world.phase = Phase::Trapped(cause);
    world.plan.clear();
    world.events.push(SimEvent::Trapped { cause });
    info!(tick = world.tick, at = %world.agent, %cause, "agent trapped");
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
