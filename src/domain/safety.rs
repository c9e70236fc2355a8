/// Safety classifier.
///
/// A cell is UNSAFE if it is Hazard or any orthogonal neighbour is Hazard.
/// Otherwise it is safe. Pure function of the current grid; it does not
/// predict where the hazard will be next tick. The plan is re-derived
/// every tick, so "safe now" is all the search needs.

use super::grid::{Grid, Position};

pub fn is_safe(grid: &Grid, pos: Position) -> bool {
    match grid.cell_at(pos) {
        Ok(cell) if cell.is_hazard() => false,
        Ok(_) => !grid
            .neighbors(pos)
            .any(|n| grid.cell_at(n).is_ok_and(|c| c.is_hazard())),
        // Outside the grid is never somewhere to stand.
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::Cell;
    use crate::domain::grid::grid_from;
    use proptest::prelude::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn hazard_cell_is_unsafe() {
        let g = grid_from(&["F"]);
        assert!(!is_safe(&g, p(0, 0)));
    }

    #[test]
    fn orthogonal_neighbour_of_hazard_is_unsafe() {
        let g = grid_from(&[
            "...",
            ".F.",
            "...",
        ]);
        assert!(!is_safe(&g, p(0, 1)));
        assert!(!is_safe(&g, p(1, 0)));
        assert!(!is_safe(&g, p(1, 2)));
        assert!(!is_safe(&g, p(2, 1)));
    }

    #[test]
    fn diagonal_of_hazard_is_safe() {
        let g = grid_from(&[
            "...",
            ".F.",
            "...",
        ]);
        assert!(is_safe(&g, p(0, 0)));
        assert!(is_safe(&g, p(2, 2)));
    }

    #[test]
    fn exit_next_to_hazard_is_unsafe() {
        let g = grid_from(&["EF"]);
        assert!(!is_safe(&g, p(0, 0)));
    }

    #[test]
    fn out_of_bounds_is_unsafe() {
        let g = grid_from(&["."]);
        assert!(!is_safe(&g, p(0, 1)));
    }

    fn arb_hazard_free_grid() -> impl Strategy<Value = Grid> {
        (1usize..8, 1usize..8)
            .prop_flat_map(|(rows, cols)| {
                prop::collection::vec(
                    prop_oneof![Just(Cell::Open), Just(Cell::Wall), Just(Cell::Exit), Just(Cell::Agent)],
                    rows * cols,
                )
                .prop_map(move |cells| cells.chunks(cols).map(<[Cell]>::to_vec).collect::<Vec<_>>())
            })
            .prop_map(|rows| Grid::from_rows(rows).unwrap())
    }

    proptest! {
        #[test]
        fn hazard_free_grid_is_safe_everywhere(g in arb_hazard_free_grid()) {
            for pos in g.positions() {
                if g.cell_at(pos).unwrap() != Cell::Wall {
                    prop_assert!(is_safe(&g, pos));
                }
            }
        }
    }
}
