//! Error types for loading, solving and persisting puzzles.

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::{Direction, Point};

/// Error returned when grid rows do not form a usable rectangle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridShapeError {
    #[error("grid must have at least one cell")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{rows}x{cols} grid does not fit on the lattice")]
    TooLarge { rows: usize, cols: usize },
}

/// Errors raised while parsing a `.bff` puzzle description.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no GRID START ... GRID STOP section")]
    MissingGrid,
    #[error("GRID START on line {line} is never closed")]
    UnterminatedGrid { line: usize },
    #[error("grid section is empty")]
    EmptyGrid,
    #[error("grid of {rows}x{cols} cells is too large")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("line {line}: grid row has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: unknown cell marker {marker:?}")]
    UnknownMarker { line: usize, marker: String },
    #[error("line {line}: expected {expected} integers after {directive:?}")]
    WrongArity {
        line: usize,
        directive: String,
        expected: usize,
    },
    #[error("line {line}: {value:?} is not an integer")]
    BadInteger { line: usize, value: String },
    #[error("line {line}: block count for {kind} is negative ({count})")]
    NegativeCount { line: usize, kind: char, count: i64 },
    #[error("line {line}: laser direction {direction:?} must be nonzero with components in -1..=1")]
    BadDirection { line: usize, direction: Direction },
    #[error("line {line}: point {point:?} lies outside the {max_x}x{max_y} lattice")]
    OutOfBounds {
        line: usize,
        point: Point,
        max_x: i32,
        max_y: i32,
    },
    #[error("line {line}: unrecognized directive {text:?}")]
    UnknownDirective { line: usize, text: String },
}

/// Errors raised by the solver for inputs that violate its preconditions.
///
/// An infeasible puzzle is not an error: the solver reports it as `Ok(None)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("point {0:?} is not a cell interior (odd, odd)")]
    NotABlockSite(Point),
    #[error("emitter at {0:?} lies outside the board lattice")]
    EmitterOutOfBounds(Point),
    #[error("emitter direction {0:?} must be nonzero with components in -1..=1")]
    BadDirection(Direction),
    #[error("board has {cells} cells, configured limit is {limit}")]
    BoardTooLarge { cells: usize, limit: usize },
    #[error("search was cancelled")]
    Cancelled,
}

/// Errors raised while saving or loading a solution file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: malformed entry {text:?}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        text: String,
    },
}
