/// Grid model: the 2D cell array, positions and orthogonal adjacency.
///
/// Shape is fixed at construction. All reads and writes are bounds
/// checked and return `GridError::OutOfBounds` instead of panicking.
/// Writes are visible to the very next read (no staging).
///
/// `DIRECTIONS` is the single adjacency table. Search, safety and
/// spreading all go through `neighbors()`, so they agree on what
/// "adjacent" means and on the order neighbours are visited in.

use std::fmt;

use super::cell::Cell;
use crate::error::GridError;

/// (row, col) offsets: right, down, left, up.
/// The order breaks ties between equal-length paths.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    cols: usize,
}

// ── Construction ──

impl Grid {
    /// A rows×cols grid filled with `fill`.
    #[allow(dead_code)]
    pub fn new(rows: usize, cols: usize, fill: Cell) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Grid { cells: vec![vec![fill; cols]; rows], rows, cols })
    }

    /// Build from row vectors. Every row must have the same length.
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, r)) = cells.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GridError::Ragged { row, expected: cols, found: r.len() });
        }
        Ok(Grid { cells, rows, cols })
    }
}

// ── Queries / mutation ──

impl Grid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    pub fn cell_at(&self, pos: Position) -> Result<Cell, GridError> {
        if self.contains(pos) {
            Ok(self.cells[pos.row][pos.col])
        } else {
            Err(self.out_of_bounds(pos))
        }
    }

    #[inline]
    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> Result<(), GridError> {
        if self.contains(pos) {
            self.cells[pos.row][pos.col] = cell;
            Ok(())
        } else {
            Err(self.out_of_bounds(pos))
        }
    }

    /// Apply a `DIRECTIONS` offset. None if the result leaves the grid.
    #[inline]
    pub fn offset(&self, pos: Position, (dr, dc): (i32, i32)) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr as isize)?;
        let col = pos.col.checked_add_signed(dc as isize)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// In-bounds orthogonal neighbours, in `DIRECTIONS` order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        DIRECTIONS.iter().filter_map(move |&d| self.offset(pos, d))
    }

    /// Every position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// First position holding `cell`, row-major.
    #[allow(dead_code)]
    pub fn find(&self, cell: Cell) -> Option<Position> {
        self.positions().find(|&p| self.cells[p.row][p.col] == cell)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Read-only row access for render sinks.
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    fn out_of_bounds(&self, pos: Position) -> GridError {
        GridError::OutOfBounds { pos, rows: self.rows, cols: self.cols }
    }
}

/// Test helper: build a grid from layout symbols, one `&str` per row.
#[cfg(test)]
pub(crate) fn grid_from(rows: &[&str]) -> Grid {
    let cells = rows
        .iter()
        .map(|r| r.chars().map(|ch| Cell::from_symbol(ch).unwrap_or_default()).collect())
        .collect();
    Grid::from_rows(cells).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert_eq!(Grid::new(0, 3, Cell::Open), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(vec![vec![Cell::Open; 3], vec![Cell::Open; 2]]).unwrap_err();
        assert_eq!(err, GridError::Ragged { row: 1, expected: 3, found: 2 });
    }

    #[test]
    fn out_of_bounds_read_and_write_fail() {
        let mut g = Grid::new(2, 3, Cell::Open).unwrap();
        assert!(matches!(g.cell_at(p(2, 0)), Err(GridError::OutOfBounds { .. })));
        assert!(matches!(g.cell_at(p(0, 3)), Err(GridError::OutOfBounds { .. })));
        assert_eq!(
            g.set_cell(p(5, 5), Cell::Wall),
            Err(GridError::OutOfBounds { pos: p(5, 5), rows: 2, cols: 3 })
        );
    }

    #[test]
    fn writes_are_visible_immediately() {
        let mut g = Grid::new(2, 2, Cell::Open).unwrap();
        g.set_cell(p(1, 1), Cell::Hazard).unwrap();
        assert_eq!(g.cell_at(p(1, 1)), Ok(Cell::Hazard));
        assert_eq!(g.count(Cell::Hazard), 1);
        assert_eq!(g.find(Cell::Hazard), Some(p(1, 1)));
    }

    #[test]
    fn interior_has_four_neighbours_in_direction_order() {
        let g = Grid::new(3, 3, Cell::Open).unwrap();
        let n: Vec<_> = g.neighbors(p(1, 1)).collect();
        assert_eq!(n, vec![p(1, 2), p(2, 1), p(1, 0), p(0, 1)]);
    }

    #[test]
    fn corner_has_two_neighbours() {
        let g = Grid::new(3, 3, Cell::Open).unwrap();
        let n: Vec<_> = g.neighbors(p(0, 0)).collect();
        assert_eq!(n, vec![p(0, 1), p(1, 0)]);
        let n: Vec<_> = g.neighbors(p(2, 2)).collect();
        assert_eq!(n, vec![p(2, 1), p(1, 2)]);
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let g = Grid::new(1, 1, Cell::Open).unwrap();
        assert_eq!(g.neighbors(p(0, 0)).count(), 0);
    }

    #[test]
    fn positions_are_row_major() {
        let g = Grid::new(2, 2, Cell::Open).unwrap();
        let all: Vec<_> = g.positions().collect();
        assert_eq!(all, vec![p(0, 0), p(0, 1), p(1, 0), p(1, 1)]);
    }
}
