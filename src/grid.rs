//! Board representation and text rendering.
//!
//! The grid is stored row-major; row 0 is the top of the board, matching the
//! `.bff` file layout and the lattice's y axis.

use crate::beam::VisitedSet;
use crate::blocks::{BlockKind, Emitter, Placement};
use crate::error::GridShapeError;
use crate::geometry::{cell_to_lattice, lattice_to_cell, Bounds, Point};

/// Marker for a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A block that is part of the puzzle and never moves.
    Fixed(BlockKind),
    /// A cell that may receive a movable block.
    Open,
    /// A cell where no block may be placed.
    Blocked,
}

impl Cell {
    /// The `.bff` marker for this cell.
    pub const fn marker(self) -> char {
        match self {
            Cell::Fixed(kind) => kind.letter(),
            Cell::Open => 'o',
            Cell::Blocked => 'x',
        }
    }

    pub const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'o' => Some(Cell::Open),
            'x' => Some(Cell::Blocked),
            other => match BlockKind::from_letter(other) {
                Some(kind) => Some(Cell::Fixed(kind)),
                None => None,
            },
        }
    }
}

/// An immutable `rows x cols` board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Builds a grid from rows of cells, rejecting empty, ragged or oversized input.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(GridShapeError::Empty);
        }
        if Bounds::checked(rows.len(), cols).is_none() {
            return Err(GridShapeError::TooLarge {
                rows: rows.len(),
                cols,
            });
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != cols {
                return Err(GridShapeError::Ragged {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parses whitespace-free marker rows such as `["oxo", "Aoo"]`.
    ///
    /// Convenience for tests and benchmarks; `.bff` files go through `bff::parse`.
    pub fn from_markers(rows: &[&str]) -> Option<Self> {
        let cells = rows
            .iter()
            .map(|row| row.chars().map(Cell::from_marker).collect::<Option<Vec<_>>>())
            .collect::<Option<Vec<_>>>()?;
        Grid::new(cells).ok()
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.rows, self.cols)
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Iterates `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &cell)| (index / self.cols, index % self.cols, cell))
    }

    /// Lattice points of every open cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<Point> {
        self.iter()
            .filter(|&(_, _, cell)| cell == Cell::Open)
            .map(|(row, col, _)| cell_to_lattice(row, col))
            .collect()
    }

    /// Lattice points and kinds of the fixed blocks, in row-major order.
    pub fn fixed_cells(&self) -> Vec<(Point, BlockKind)> {
        self.iter()
            .filter_map(|(row, col, cell)| match cell {
                Cell::Fixed(kind) => Some((cell_to_lattice(row, col), kind)),
                _ => None,
            })
            .collect()
    }
}

/// Formats the board with a placement applied, one row per line.
///
/// Placed blocks show as their kind letter; everything else keeps its marker.
pub fn format_solution(grid: &Grid, placement: &Placement) -> String {
    let mut output = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if col > 0 {
                output.push(' ');
            }
            let marker = match placement.get(cell_to_lattice(row, col)) {
                Some(kind) => kind.letter(),
                None => grid.cell(row, col).marker(),
            };
            output.push(marker);
        }
        output.push('\n');
    }
    output
}

/// Draws the whole lattice with beam paths.
///
/// Legend: block letters at cell centers, `L` emitters, `@` hit targets, `?` missed
/// targets, `*` visited points, `.` open cell centers, `x` blocked cells, blank
/// for untouched lanes. Trailing blanks are trimmed from every line.
pub fn format_beams(
    grid: &Grid,
    placement: &Placement,
    emitters: &[Emitter],
    targets: &[Point],
    visited: &VisitedSet,
) -> String {
    let bounds = grid.bounds();
    let mut output = String::new();

    for y in 0..=bounds.max_y() {
        let mut line = String::new();
        for x in 0..=bounds.max_x() {
            let point = (x, y);
            let symbol = if let Some(kind) = placement.get(point) {
                kind.letter()
            } else if emitters.iter().any(|emitter| emitter.origin == point) {
                'L'
            } else if targets.contains(&point) {
                if visited.contains(&point) {
                    '@'
                } else {
                    '?'
                }
            } else if visited.contains(&point) {
                '*'
            } else if let Some((row, col)) = lattice_to_cell(point) {
                match grid.cell(row, col) {
                    Cell::Blocked => 'x',
                    _ => '.',
                }
            } else {
                ' '
            };
            line.push(symbol);
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
