/// Hazard spreading: one tick of fire growth.
///
/// Two phases, never interleaved:
///   1. Collect every Open/Agent neighbour of every current Hazard cell.
///   2. Convert all collected cells to Hazard.
///
/// A cell ignited this tick does not spread further until the next tick.
/// Walls and exits never burn.

use super::cell::Cell;
use super::grid::{Grid, Position};

/// Advance the hazard by one tick. Returns the newly ignited cells,
/// row-major, without duplicates.
pub fn spread(grid: &mut Grid) -> Vec<Position> {
    let mut ignite = vec![vec![false; grid.cols()]; grid.rows()];

    for pos in grid.positions() {
        if !grid.cell_at(pos).is_ok_and(Cell::is_hazard) {
            continue;
        }
        for n in grid.neighbors(pos) {
            if grid.cell_at(n).is_ok_and(Cell::is_flammable) {
                ignite[n.row][n.col] = true;
            }
        }
    }

    let ignited: Vec<Position> = grid
        .positions()
        .filter(|p| ignite[p.row][p.col])
        .collect();
    for &pos in &ignited {
        // Collected from neighbors(), so always in bounds.
        let _ = grid.set_cell(pos, Cell::Hazard);
    }
    ignited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::grid_from;
    use proptest::prelude::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn corridor_burns_one_cell_per_tick() {
        let mut g = grid_from(&["F.."]);
        assert_eq!(spread(&mut g), vec![p(0, 1)]);
        assert_eq!(g, grid_from(&["FF."]));
        assert_eq!(spread(&mut g), vec![p(0, 2)]);
        assert_eq!(g, grid_from(&["FFF"]));
    }

    #[test]
    fn walls_and_exits_do_not_burn() {
        let mut g = grid_from(&[
            ".#.",
            "EF#",
            ".E.",
        ]);
        assert!(spread(&mut g).is_empty());
        assert_eq!(g.count(Cell::Hazard), 1);
        assert_eq!(g.count(Cell::Exit), 2);
    }

    #[test]
    fn agent_is_collected_like_open() {
        let mut g = grid_from(&["FS."]);
        assert_eq!(spread(&mut g), vec![p(0, 1)]);
        assert_eq!(g.cell_at(p(0, 1)), Ok(Cell::Hazard));
        assert_eq!(g.cell_at(p(0, 2)), Ok(Cell::Open));
    }

    #[test]
    fn shared_neighbour_is_reported_once() {
        let mut g = grid_from(&["F.F"]);
        assert_eq!(spread(&mut g), vec![p(0, 1)]);
    }

    #[test]
    fn cross_pattern_from_centre() {
        let mut g = grid_from(&[
            "...",
            ".F.",
            "...",
        ]);
        let ignited = spread(&mut g);
        assert_eq!(ignited, vec![p(0, 1), p(1, 0), p(1, 2), p(2, 1)]);
        assert_eq!(g, grid_from(&[
            ".F.",
            "FFF",
            ".F.",
        ]));
    }

    proptest! {
        #[test]
        fn no_hazard_means_no_change(rows in 1usize..8, cols in 1usize..8, walls in prop::collection::vec(any::<bool>(), 64)) {
            let mut g = Grid::new(rows, cols, Cell::Open).unwrap();
            for pos in g.positions().collect::<Vec<_>>() {
                if walls[pos.row * 8 + pos.col] {
                    g.set_cell(pos, Cell::Wall).unwrap();
                }
            }
            let before = g.clone();
            prop_assert!(spread(&mut g).is_empty());
            prop_assert_eq!(g, before);
        }
    }
}
