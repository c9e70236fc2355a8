/// Events emitted during a simulation step.
/// The presentation layer shows the latest one in the HUD; the step
/// function logs them.

use std::fmt;

use crate::domain::grid::Position;

/// Why the agent could not escape.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrapCause {
    /// Planning found no safe route to any exit.
    NoSafePath,
    /// The hazard spread onto the agent's cell.
    ConsumedByHazard,
}

impl fmt::Display for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrapCause::NoSafePath => write!(f, "no safe path to any exit"),
            TrapCause::ConsumedByHazard => write!(f, "caught by the fire"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    Planned { steps: usize },
    AgentMoved { from: Position, to: Position },
    HazardSpread { ignited: usize },
    ReachedExit { at: Position },
    Trapped { cause: TrapCause },
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::Planned { steps } => write!(f, "route: {steps} steps"),
            SimEvent::AgentMoved { from, to } => write!(f, "moved {from} -> {to}"),
            SimEvent::HazardSpread { ignited } => write!(f, "fire spread to {ignited} cells"),
            SimEvent::ReachedExit { at } => write!(f, "reached the exit at {at}"),
            SimEvent::Trapped { cause } => write!(f, "trapped: {cause}"),
        }
    }
}
