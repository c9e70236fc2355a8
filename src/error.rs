/// Error types.
///
/// `GridError` is a contract violation (caller asked for a cell that does
/// not exist). `LayoutError` covers bad input layouts. `SimError` is what
/// the run loop propagates: a grid bug or a failing render sink.
///
/// A trapped agent is NOT an error; it is a terminal phase.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::domain::grid::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { pos: Position, rows: usize, cols: usize },
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "position {pos} out of bounds for {rows}x{cols} grid")
            }
            Self::Empty => write!(f, "grid must have at least one cell"),
            Self::Ragged { row, expected, found } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Debug)]
pub enum LayoutError {
    Io { path: PathBuf, source: io::Error },
    UnknownSymbol { line: usize, ch: char },
    MissingStart,
    MultipleStarts { first: Position, second: Position },
    MissingExit,
    Grid(GridError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "could not read {}: {source}", path.display()),
            Self::UnknownSymbol { line, ch } => {
                write!(f, "line {line}: unknown symbol {ch:?} (expected one of S . # F E)")
            }
            Self::MissingStart => write!(f, "layout has no start cell 'S'"),
            Self::MultipleStarts { first, second } => {
                write!(f, "layout has more than one start cell: {first} and {second}")
            }
            Self::MissingExit => write!(f, "layout has no exit cell 'E'"),
            Self::Grid(e) => write!(f, "invalid layout: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LayoutError {
    fn from(e: GridError) -> Self {
        LayoutError::Grid(e)
    }
}

#[derive(Debug)]
pub enum SimError {
    Grid(GridError),
    Sink(io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid contract violated: {e}"),
            Self::Sink(e) => write!(f, "render sink failed: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Sink(e) => Some(e),
        }
    }
}

impl From<GridError> for SimError {
    fn from(e: GridError) -> Self {
        SimError::Grid(e)
    }
}

impl From<io::Error> for SimError {
    fn from(e: io::Error) -> Self {
        SimError::Sink(e)
    }
}
