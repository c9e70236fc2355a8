/// WorldState: the complete state of a running evacuation.
///
/// ## Layers
///
///   - `grid`: cell states. The only thing search and spreading read.
///   - `trail`: cells the agent has vacated. Render-only overlay;
///     never consulted by safety, search or spreading.
///
/// ## Route bookkeeping
///
///   - `plan`: route computed this tick (rebuilt every tick).
///   - `journey`: every cell the agent stepped onto, in order. Once the
///     agent stands on an exit this is the final route.

use super::event::{SimEvent, TrapCause};
use super::level::Layout;
use crate::domain::grid::{Grid, Position};
use crate::domain::path::Path;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    ReachedExit,
    Trapped(TrapCause),
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self != Phase::Running
    }
}

/// Final outcome tag reported when the loop ends.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    ReachedExit,
    Trapped(TrapCause),
    /// The render sink asked to stop before a terminal phase.
    Aborted,
}

/// Termination report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub outcome: Outcome,
    /// Full route start→exit when the outcome is `ReachedExit`, else empty.
    pub path: Path,
    pub ticks: u64,
}

pub struct WorldState {
    pub name: String,
    pub grid: Grid,
    pub start: Position,
    pub agent: Position,
    pub plan: Path,
    pub journey: Path,
    pub trail: Vec<Vec<bool>>,
    pub phase: Phase,
    pub tick: u64,
    /// Events from the most recent tick.
    pub events: Vec<SimEvent>,
}

// ── Construction ──

impl WorldState {
    pub fn new(layout: Layout) -> Self {
        let Layout { name, grid, start } = layout;
        let trail = vec![vec![false; grid.cols()]; grid.rows()];
        WorldState {
            name,
            grid,
            start,
            agent: start,
            plan: vec![],
            journey: vec![],
            trail,
            phase: Phase::Running,
            tick: 0,
            events: vec![],
        }
    }
}

// ── Queries ──

impl WorldState {
    /// Read-only grid snapshot for render sinks.
    pub fn snapshot(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn is_trail(&self, pos: Position) -> bool {
        self.trail
            .get(pos.row)
            .and_then(|r| r.get(pos.col))
            .copied()
            .unwrap_or(false)
    }

    pub fn mark_trail(&mut self, pos: Position) {
        if let Some(slot) = self.trail.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
            *slot = true;
        }
    }

    /// Build the termination report for the current phase.
    pub fn report(&self) -> Report {
        let outcome = match self.phase {
            Phase::ReachedExit => Outcome::ReachedExit,
            Phase::Trapped(cause) => Outcome::Trapped(cause),
            Phase::Running => Outcome::Aborted,
        };
        let path = if outcome == Outcome::ReachedExit { self.journey.clone() } else { vec![] };
        Report { outcome, path, ticks: self.tick }
    }
}
