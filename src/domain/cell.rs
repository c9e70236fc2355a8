/// Cell states and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.
///
/// The trail left behind by the agent is NOT a cell state. It lives in
/// the overlay on `WorldState` and only render sinks read it.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Open,
    Wall,
    Hazard, // Spreads to Open/Agent neighbours every tick
    Agent,  // Exactly one until the agent stands on an exit
    Exit,
}

impl Cell {
    /// Can the hazard spread into this cell?
    pub fn is_flammable(self) -> bool {
        matches!(self, Cell::Open | Cell::Agent)
    }

    /// Can the search walk through this cell? (safety is checked separately)
    pub fn is_walkable(self) -> bool {
        matches!(self, Cell::Open | Cell::Agent | Cell::Exit)
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, Cell::Hazard)
    }

    pub fn is_exit(self) -> bool {
        matches!(self, Cell::Exit)
    }

    /// Layout symbol → cell. `S` marks the agent start.
    pub fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Open),
            '#' => Some(Cell::Wall),
            'F' => Some(Cell::Hazard),
            'S' => Some(Cell::Agent),
            'E' => Some(Cell::Exit),
            _ => None,
        }
    }

    /// Display symbol. The agent shows as `P` once the run has started.
    pub fn symbol(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Wall => '#',
            Cell::Hazard => 'F',
            Cell::Agent => 'P',
            Cell::Exit => 'E',
        }
    }
}

/// Symbol used for trail overlay and final-path marks.
pub const TRAIL_SYMBOL: char = 'O';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_and_agent_burn() {
        assert!(Cell::Open.is_flammable());
        assert!(Cell::Agent.is_flammable());
        assert!(!Cell::Wall.is_flammable());
        assert!(!Cell::Exit.is_flammable());
        assert!(!Cell::Hazard.is_flammable());
    }

    #[test]
    fn walls_and_hazard_block_walking() {
        assert!(!Cell::Wall.is_walkable());
        assert!(!Cell::Hazard.is_walkable());
        assert!(Cell::Agent.is_walkable());
        assert!(Cell::Exit.is_walkable());
    }

    #[test]
    fn layout_symbols_parse() {
        assert_eq!(Cell::from_symbol('S'), Some(Cell::Agent));
        assert_eq!(Cell::from_symbol('F'), Some(Cell::Hazard));
        assert_eq!(Cell::from_symbol('O'), None);
        assert_eq!(Cell::from_symbol('x'), None);
    }

    #[test]
    fn symbols_survive_display_except_start() {
        for cell in [Cell::Open, Cell::Wall, Cell::Hazard, Cell::Exit] {
            assert_eq!(Cell::from_symbol(cell.symbol()), Some(cell));
        }
        assert_eq!(Cell::Agent.symbol(), 'P');
    }
}
