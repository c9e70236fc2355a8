/// Agent route planning: BFS toward the nearest exit through safe cells.
///
/// A neighbour is entered if it is:
///   1. in bounds,
///   2. walkable (not Wall, not Hazard; the agent's own cell counts as Open),
///   3. safe (`safety::is_safe`), unless it is an Exit.
///
/// Exits are exempt from the safety filter: the goal may sit next to the
/// fire, only the cells on the way to it may not. The start cell is the
/// BFS root and is never filtered.
///
/// Neighbours are expanded in `DIRECTIONS` order, so among equal-length
/// routes the result is deterministic. The first Exit dequeued wins,
/// which makes the route a minimum step-count route.

use std::collections::VecDeque;

use super::grid::{Grid, Position};
use super::safety;

/// Route from (not including) the start to (including) an exit.
/// Empty = no safe route exists.
pub type Path = Vec<Position>;

/// Result of one search, with bookkeeping for logs and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Search {
    pub path: Path,
    /// Cells dequeued and expanded (each at most once).
    pub expanded: usize,
}

#[allow(dead_code)]
pub fn find_path(grid: &Grid, start: Position) -> Path {
    search(grid, start).path
}

pub fn search(grid: &Grid, start: Position) -> Search {
    if !grid.contains(start) {
        return Search { path: vec![], expanded: 0 };
    }

    let (rows, cols) = (grid.rows(), grid.cols());
    let mut visited = vec![vec![false; cols]; rows];
    let mut prev: Vec<Vec<Option<Position>>> = vec![vec![None; cols]; rows];
    visited[start.row][start.col] = true;

    let mut queue: VecDeque<Position> = VecDeque::with_capacity(rows * cols);
    queue.push_back(start);

    let mut expanded = 0;
    let mut goal = None;

    while let Some(pos) = queue.pop_front() {
        expanded += 1;

        if grid.cell_at(pos).is_ok_and(|c| c.is_exit()) {
            goal = Some(pos);
            break;
        }

        for next in grid.neighbors(pos) {
            if visited[next.row][next.col] || !can_enter(grid, next) {
                continue;
            }
            visited[next.row][next.col] = true;
            prev[next.row][next.col] = Some(pos);
            queue.push_back(next);
        }
    }

    let path = match goal {
        Some(exit) => reconstruct(&prev, start, exit),
        None => vec![],
    };
    Search { path, expanded }
}

fn can_enter(grid: &Grid, pos: Position) -> bool {
    match grid.cell_at(pos) {
        Ok(cell) if cell.is_exit() => true,
        Ok(cell) => cell.is_walkable() && safety::is_safe(grid, pos),
        Err(_) => false,
    }
}

/// Walk the predecessor map back from `exit` to `start`.
fn reconstruct(prev: &[Vec<Option<Position>>], start: Position, exit: Position) -> Path {
    let mut path = vec![];
    let mut cur = exit;
    while cur != start {
        path.push(cur);
        match prev[cur.row][cur.col] {
            Some(p) => cur = p,
            None => break,
        }
    }
    path.reverse();
    path
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
