//! Loader for the `.bff` puzzle format.
//!
//! ```text
//! # comment
//! GRID START
//! o B o
//! o o x
//! GRID STOP
//! A 2          movable block counts (A reflect, B absorb, C refract)
//! C 1
//! L 2 5 1 -1   laser: x y dx dy
//! P 3 0        target: x y
//! ```
//!
//! Coordinates are lattice coordinates (see `geometry`).

use std::fs;
use std::path::Path;

use crate::blocks::{BlockKind, Emitter, Inventory};
use crate::error::{GridShapeError, LoadError};
use crate::geometry::{is_valid_direction, Bounds, Point};
use crate::grid::{Cell, Grid};
use crate::Puzzle;

/// Reads and parses a `.bff` file.
pub fn load(path: &Path) -> Result<Puzzle, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Parses integers following a directive, requiring exactly `expected` of them.
fn parse_ints(
    line: usize,
    directive: &str,
    args: &[&str],
    expected: usize,
) -> Result<Vec<i64>, LoadError> {
    if args.len() != expected {
        return Err(LoadError::WrongArity {
            line,
            directive: directive.to_string(),
            expected,
        });
    }
    args.iter()
        .map(|arg| {
            arg.parse::<i64>().map_err(|_| LoadError::BadInteger {
                line,
                value: arg.to_string(),
            })
        })
        .collect()
}

/// Narrows a parsed value to a lattice coordinate.
fn coordinate(line: usize, value: i64) -> Result<i32, LoadError> {
    i32::try_from(value).map_err(|_| LoadError::BadInteger {
        line,
        value: value.to_string(),
    })
}

fn check_in_bounds(line: usize, point: Point, bounds: Bounds) -> Result<(), LoadError> {
    if bounds.contains(point) {
        Ok(())
    } else {
        Err(LoadError::OutOfBounds {
            line,
            point,
            max_x: bounds.max_x(),
            max_y: bounds.max_y(),
        })
    }
}

/// Parses the contents of a `.bff` file.
pub fn parse(text: &str) -> Result<Puzzle, LoadError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut row_lines: Vec<usize> = Vec::new();
    let mut grid_open: Option<usize> = None;
    let mut grid_seen = false;
    let mut inventory = Inventory::default();
    let mut emitters: Vec<(usize, Emitter)> = Vec::new();
    let mut targets: Vec<(usize, Point)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed == "GRID START" {
            grid_open = Some(line);
            continue;
        }
        if trimmed == "GRID STOP" {
            grid_open = None;
            grid_seen = true;
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if grid_open.is_some() {
            let row = tokens
                .iter()
                .map(|token| {
                    let mut chars = token.chars();
                    let cell = match (chars.next(), chars.next()) {
                        (Some(marker), None) => Cell::from_marker(marker),
                        _ => None,
                    };
                    cell.ok_or_else(|| LoadError::UnknownMarker {
                        line,
                        marker: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(LoadError::RaggedRow {
                        line,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
            row_lines.push(line);
            continue;
        }

        let (directive, args) = (tokens[0], &tokens[1..]);
        match directive {
            "A" | "B" | "C" => {
                let letter = directive.chars().next().unwrap_or_default();
                let count = parse_ints(line, directive, args, 1)?[0];
                let Ok(count) = usize::try_from(count) else {
                    return Err(LoadError::NegativeCount {
                        line,
                        kind: letter,
                        count,
                    });
                };
                if let Some(kind) = BlockKind::from_letter(letter) {
                    inventory.set(kind, count);
                }
            }
            "L" => {
                let values = parse_ints(line, directive, args, 4)?;
                let origin = (coordinate(line, values[0])?, coordinate(line, values[1])?);
                let direction = (coordinate(line, values[2])?, coordinate(line, values[3])?);
                if !is_valid_direction(direction) {
                    return Err(LoadError::BadDirection { line, direction });
                }
                emitters.push((line, Emitter::new(origin, direction)));
            }
            "P" => {
                let values = parse_ints(line, directive, args, 2)?;
                let point = (coordinate(line, values[0])?, coordinate(line, values[1])?);
                targets.push((line, point));
            }
            _ => {
                return Err(LoadError::UnknownDirective {
                    line,
                    text: trimmed.to_string(),
                })
            }
        }
    }

    if let Some(line) = grid_open {
        return Err(LoadError::UnterminatedGrid { line });
    }
    if !grid_seen {
        return Err(LoadError::MissingGrid);
    }

    let grid = Grid::new(rows).map_err(|err| match err {
        GridShapeError::Empty => LoadError::EmptyGrid,
        GridShapeError::TooLarge { rows, cols } => LoadError::GridTooLarge { rows, cols },
        GridShapeError::Ragged {
            row,
            expected,
            found,
        } => LoadError::RaggedRow {
            line: row_lines[row],
            expected,
            found,
        },
    })?;

    let bounds = grid.bounds();
    for &(line, emitter) in &emitters {
        check_in_bounds(line, emitter.origin, bounds)?;
    }
    for &(line, target) in &targets {
        check_in_bounds(line, target, bounds)?;
    }

    Ok(Puzzle {
        grid,
        inventory,
        emitters: emitters.into_iter().map(|(_, emitter)| emitter).collect(),
        targets: targets.into_iter().map(|(_, target)| target).collect(),
    })
}
