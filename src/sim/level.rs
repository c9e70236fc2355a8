/// Layout loader.
///
/// ## Sources (priority order):
///   1. Layout file given on the command line or in `config.toml`
///   2. Built-in reference layout
///
/// ## Text format:
///   Optional first line: `# Layout Name`
///   Then one line per grid row. Blank lines are ignored, and so is
///   whitespace between symbols (`S . . # F` == `S..#F`).
///
/// ## Cell legend:
///   'S' = Agent start (exactly one)   '.' = Open
///   '#' = Wall                        'F' = Hazard seed
///   'E' = Exit (at least one)

use std::path::Path;

use crate::domain::cell::Cell;
use crate::domain::grid::{Grid, Position};
use crate::error::LayoutError;

/// A validated starting layout.
#[derive(Clone, Debug)]
pub struct Layout {
    pub name: String,
    pub grid: Grid,
    pub start: Position,
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Load the layout from `path`, or the built-in one when `path` is None.
pub fn load_layout(path: Option<&Path>) -> Result<Layout, LayoutError> {
    let Some(path) = path else {
        return Ok(reference_layout());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|source| LayoutError::Io { path: path.to_path_buf(), source })?;
    let mut layout = parse_layout(&text)?;
    if layout.name.is_empty() {
        layout.name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
    }
    Ok(layout)
}

/// Parse and validate a text layout.
pub fn parse_layout(text: &str) -> Result<Layout, LayoutError> {
    let mut name = String::new();
    let mut rows: Vec<Vec<Cell>> = vec![];
    let mut start: Option<Position> = None;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if rows.is_empty() && name.is_empty() && is_name_line(trimmed) {
            name = trimmed[1..].trim().to_string();
            continue;
        }

        let mut row = Vec::with_capacity(trimmed.len());
        for ch in trimmed.chars().filter(|c| !c.is_whitespace()) {
            let cell = Cell::from_symbol(ch)
                .ok_or(LayoutError::UnknownSymbol { line: idx + 1, ch })?;
            if cell == Cell::Agent {
                let here = Position::new(rows.len(), row.len());
                if let Some(first) = start {
                    return Err(LayoutError::MultipleStarts { first, second: here });
                }
                start = Some(here);
            }
            row.push(cell);
        }
        rows.push(row);
    }

    let grid = Grid::from_rows(rows)?;
    let start = start.ok_or(LayoutError::MissingStart)?;
    if grid.count(Cell::Exit) == 0 {
        return Err(LayoutError::MissingExit);
    }
    Ok(Layout { name, grid, start })
}

/// The reference office floor: fire in the top-right corner, exit in the
/// bottom-right, one winding corridor between them.
pub fn reference_layout() -> Layout {
    let mut layout = parse_layout(REFERENCE).unwrap_or_else(|e| {
        unreachable!("built-in layout is valid: {e}")
    });
    layout.name = "Reference Floor".to_string();
    layout
}

const REFERENCE: &str = "\
S . . # F
. # . # .
. . . . #
# . # . .
. . . # E
";

/// Distinguish `# Layout Name` from a row that starts with a wall.
/// A name line starts with `#` and contains a character that is not a
/// layout symbol.
fn is_name_line(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('#') else {
        return false;
    };
    rest.chars()
        .any(|c| !c.is_whitespace() && Cell::from_symbol(c).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn compact_and_spaced_rows_parse_the_same() {
        let a = parse_layout("S..#F\n.#.#E\n").unwrap();
        let b = parse_layout("S . . # F\n. # . # E\n").unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.start, Position::new(0, 0));
    }

    #[test]
    fn name_line_is_read() {
        let l = parse_layout("# Warehouse\n#S.E#\n").unwrap();
        assert_eq!(l.name, "Warehouse");
        assert_eq!(l.grid.rows(), 1);
        assert_eq!(l.start, Position::new(0, 1));
    }

    #[test]
    fn wall_row_is_not_a_name() {
        let l = parse_layout("#####\n#S.E#\n#####\n").unwrap();
        assert!(l.name.is_empty());
        assert_eq!(l.grid.rows(), 3);
        assert_eq!(l.start, Position::new(1, 1));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let l = parse_layout("\nS.E\n\n...\n\n\n").unwrap();
        assert_eq!(l.grid.rows(), 2);
    }

    #[test]
    fn unknown_symbol_reports_line() {
        let err = parse_layout("S.E\n.x.\n").unwrap_err();
        assert!(matches!(err, LayoutError::UnknownSymbol { line: 2, ch: 'x' }));
    }

    #[test]
    fn missing_start_is_rejected() {
        assert!(matches!(parse_layout("..E\n").unwrap_err(), LayoutError::MissingStart));
    }

    #[test]
    fn second_start_is_rejected() {
        let err = parse_layout("S.E\n..S\n").unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MultipleStarts { first, second }
                if first == Position::new(0, 0) && second == Position::new(1, 2)
        ));
    }

    #[test]
    fn missing_exit_is_rejected() {
        assert!(matches!(parse_layout("S..\n").unwrap_err(), LayoutError::MissingExit));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_layout("S.E\n..\n").unwrap_err();
        assert!(matches!(err, LayoutError::Grid(GridError::Ragged { row: 1, expected: 3, found: 2 })));
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(parse_layout("\n\n").unwrap_err(), LayoutError::Grid(GridError::Empty)));
    }

    #[test]
    fn reference_layout_is_five_by_five() {
        let l = reference_layout();
        assert_eq!((l.grid.rows(), l.grid.cols()), (5, 5));
        assert_eq!(l.start, Position::new(0, 0));
        assert_eq!(l.grid.count(Cell::Hazard), 1);
        assert_eq!(l.grid.count(Cell::Exit), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_layout(Some(Path::new("/definitely/not/here.txt"))).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }

    #[test]
    fn no_path_loads_reference() {
        let l = load_layout(None).unwrap();
        assert_eq!(l.name, "Reference Floor");
    }
}
