//! Lattice geometry for Lazor boards.
//!
//! Every board cell at `(row, col)` maps to the lattice point `(2*col + 1, 2*row + 1)`.
//! Blocks live on odd-odd points (cell interiors); beams travel along the even lanes
//! between them. Doubling the coordinates keeps everything in integers.

/// A point on the doubled lattice, as `(x, y)`.
pub type Point = (i32, i32);

/// A beam direction, each component in `{-1, 0, 1}`.
pub type Direction = (i32, i32);

/// Largest row or column count whose lattice extent still fits in an `i32`.
pub const MAX_SIDE: usize = (i32::MAX / 2) as usize;

/// Size of a board in cells, used to bound beam travel on the lattice.
///
/// Both sides must be at most [`MAX_SIDE`]; `Grid::new` enforces this with
/// [`Bounds::checked`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub rows: usize,
    pub cols: usize,
}

impl Bounds {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Like [`Bounds::new`], but `None` when a side exceeds [`MAX_SIDE`].
    pub const fn checked(rows: usize, cols: usize) -> Option<Self> {
        if rows > MAX_SIDE || cols > MAX_SIDE {
            None
        } else {
            Some(Self::new(rows, cols))
        }
    }

    /// Largest x coordinate on the lattice (`2 * cols`).
    #[inline]
    pub const fn max_x(&self) -> i32 {
        2 * self.cols as i32
    }

    /// Largest y coordinate on the lattice (`2 * rows`).
    #[inline]
    pub const fn max_y(&self) -> i32 {
        2 * self.rows as i32
    }

    #[inline(always)]
    pub const fn contains(&self, point: Point) -> bool {
        in_bounds(point, self.rows, self.cols)
    }
}

/// Converts a grid cell to the lattice point at its center.
#[inline(always)]
pub const fn cell_to_lattice(row: usize, col: usize) -> Point {
    (2 * col as i32 + 1, 2 * row as i32 + 1)
}

/// Converts a block site back to its `(row, col)` cell.
///
/// Returns `None` for points that are not cell interiors.
pub const fn lattice_to_cell(point: Point) -> Option<(usize, usize)> {
    if !is_block_site(point) || point.0 < 0 || point.1 < 0 {
        return None;
    }
    Some(((point.1 / 2) as usize, (point.0 / 2) as usize))
}

/// Checks `0 <= x <= 2*cols` and `0 <= y <= 2*rows`.
#[inline(always)]
pub const fn in_bounds(point: Point, rows: usize, cols: usize) -> bool {
    let (x, y) = point;
    x >= 0 && y >= 0 && x <= 2 * cols as i32 && y <= 2 * rows as i32
}

/// True when both coordinates are odd, i.e. the point is a cell interior.
#[inline(always)]
pub const fn is_block_site(point: Point) -> bool {
    point.0.rem_euclid(2) == 1 && point.1.rem_euclid(2) == 1
}

/// True for a nonzero direction with both components in `{-1, 0, 1}`.
pub const fn is_valid_direction(direction: Direction) -> bool {
    let (dx, dy) = direction;
    dx >= -1 && dx <= 1 && dy >= -1 && dy <= 1 && (dx != 0 || dy != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_lattice_is_odd_odd() {
        for row in 0..4 {
            for col in 0..5 {
                let point = cell_to_lattice(row, col);
                assert!(is_block_site(point), "cell ({row},{col}) mapped to {point:?}");
                assert_eq!(lattice_to_cell(point), Some((row, col)));
            }
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = Bounds::new(2, 3);
        assert!(bounds.contains((0, 0)));
        assert!(bounds.contains((6, 4)));
        assert!(!bounds.contains((7, 4)));
        assert!(!bounds.contains((6, 5)));
        assert!(!bounds.contains((-1, 0)));
        assert_eq!((bounds.max_x(), bounds.max_y()), (6, 4));
    }

    #[test]
    fn test_checked_bounds_reject_overflowing_sides() {
        let widest = Bounds::checked(1, MAX_SIDE).unwrap();
        assert_eq!(widest.max_x(), i32::MAX - 1);
        assert!(widest.contains((i32::MAX - 1, 2)));
        assert_eq!(Bounds::checked(1, MAX_SIDE + 1), None);
        assert_eq!(Bounds::checked(usize::MAX, 1), None);
    }

    #[test]
    fn test_edge_points_are_not_block_sites() {
        assert!(!is_block_site((0, 1)));
        assert!(!is_block_site((2, 2)));
        assert!(!is_block_site((-1, 2)));
        assert_eq!(lattice_to_cell((2, 3)), None);
    }

    #[test]
    fn test_direction_validation() {
        assert!(is_valid_direction((1, -1)));
        assert!(is_valid_direction((0, 1)));
        assert!(!is_valid_direction((0, 0)));
        assert!(!is_valid_direction((2, 1)));
    }
}
