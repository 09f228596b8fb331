//! Laser beam simulation on the doubled lattice.
//!
//! Beams move one lattice unit per step. Before each step the beam looks for a
//! block beside it on the horizontal axis, then on the vertical axis; the first
//! block found decides the interaction:
//! - reflect: the hit axis flips and the beam continues from the same point
//! - absorb: the beam ends, and the absorbing block's point counts as visited
//! - refract: a flipped copy is queued and the original passes straight through
//!
//! Every processed `(x, y, dx, dy)` state is remembered so mirror loops terminate.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::blocks::{BlockKind, Emitter, Placement, PlacementKey};
use crate::geometry::{Bounds, Direction, Point};

/// Every lattice point touched by some beam.
pub type VisitedSet = FxHashSet<Point>;

/// A beam position and direction packed for the cycle guard.
type BeamState = (i32, i32, i32, i32);

/// Which neighbour test found the block.
#[derive(Clone, Copy)]
enum Side {
    Horizontal,
    Vertical,
}

/// Flips the direction component of the axis that was hit.
#[inline(always)]
fn bounce((dx, dy): Direction, side: Side) -> Direction {
    match side {
        Side::Horizontal => (-dx, dy),
        Side::Vertical => (dx, -dy),
    }
}

/// Finds the block a beam at `(x, y)` heading `(dx, dy)` runs into, if any.
///
/// The horizontal neighbour wins when both neighbours hold blocks.
#[inline(always)]
fn blocking_neighbour(
    placement: &Placement,
    (x, y): Point,
    (dx, dy): Direction,
) -> Option<(Point, BlockKind, Side)> {
    let horizontal = (x + dx, y);
    if let Some(kind) = placement.get(horizontal) {
        return Some((horizontal, kind, Side::Horizontal));
    }
    let vertical = (x, y + dy);
    placement
        .get(vertical)
        .map(|kind| (vertical, kind, Side::Vertical))
}

/// Traces every beam from `emitters` through `placement` and returns the visited points.
///
/// Offspring beams from reflections and refractions are processed breadth-first.
/// The result does not depend on emitter order.
pub fn simulate(bounds: Bounds, placement: &Placement, emitters: &[Emitter]) -> VisitedSet {
    let mut visited = VisitedSet::default();
    let mut seen_states: FxHashSet<BeamState> = FxHashSet::default();
    let mut queue: VecDeque<(Point, Direction)> = emitters
        .iter()
        .map(|emitter| (emitter.origin, emitter.direction))
        .collect();

    while let Some((mut position, mut direction)) = queue.pop_front() {
        while bounds.contains(position) {
            visited.insert(position);

            let state = (position.0, position.1, direction.0, direction.1);
            if !seen_states.insert(state) {
                break;
            }

            match blocking_neighbour(placement, position, direction) {
                None => {}
                Some((_, BlockKind::Reflect, side)) => {
                    direction = bounce(direction, side);
                    queue.push_back((position, direction));
                    break;
                }
                Some((block, BlockKind::Absorb, _)) => {
                    visited.insert(block);
                    break;
                }
                Some((_, BlockKind::Refract, side)) => {
                    queue.push_back((position, bounce(direction, side)));
                }
            }

            position = (position.0 + direction.0, position.1 + direction.1);
        }
    }

    visited
}

/// Memoizes simulation results by placement content.
///
/// One cache belongs to one solve (or one worker of a parallel solve), so separate
/// solves never share results.
#[derive(Debug)]
pub struct SimulationCache<'a> {
    bounds: Bounds,
    emitters: &'a [Emitter],
    results: FxHashMap<PlacementKey, VisitedSet>,
    hits: usize,
    misses: usize,
}

impl<'a> SimulationCache<'a> {
    pub fn new(bounds: Bounds, emitters: &'a [Emitter]) -> Self {
        Self {
            bounds,
            emitters,
            results: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the visited set for `placement`, simulating only on first sight.
    pub fn visited(&mut self, placement: &Placement) -> &VisitedSet {
        let key = placement.key();
        if self.results.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        let (bounds, emitters) = (self.bounds, self.emitters);
        self.results
            .entry(key)
            .or_insert_with(|| simulate(bounds, placement, emitters))
    }

    /// Number of lookups served without simulating.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of simulations actually run.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn placement_of(grid: &Grid) -> Placement {
        grid.fixed_cells().into_iter().collect()
    }

    fn sorted(visited: &VisitedSet) -> Vec<Point> {
        let mut points: Vec<Point> = visited.iter().copied().collect();
        points.sort();
        points
    }

    #[test]
    fn test_free_beam_runs_to_the_edge() {
        let grid = Grid::from_markers(&["oo", "oo"]).unwrap();
        let emitters = [Emitter::new((0, 0), (1, 1))];
        let visited = simulate(grid.bounds(), &Placement::new(), &emitters);
        assert_eq!(sorted(&visited), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_absorb_marks_the_absorption_point() {
        let grid = Grid::from_markers(&["B"]).unwrap();
        let emitters = [Emitter::new((0, 1), (1, 0))];
        let visited = simulate(grid.bounds(), &placement_of(&grid), &emitters);
        assert_eq!(sorted(&visited), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn test_reflect_flips_the_hit_axis() {
        // beam descends to (3, 2) and hits the block at (3, 3) from above
        let grid = Grid::from_markers(&["oo", "oA"]).unwrap();
        let emitters = [Emitter::new((1, 0), (1, 1))];
        let visited = simulate(grid.bounds(), &placement_of(&grid), &emitters);
        assert_eq!(
            sorted(&visited),
            vec![(1, 0), (2, 1), (3, 2), (4, 1)],
            "reflected beam should leave upwards and never pass the block"
        );
    }

    #[test]
    fn test_vertical_beam_passes_through_refractor() {
        let grid = Grid::from_markers(&["o", "C", "o"]).unwrap();
        let emitters = [Emitter::new((1, 0), (0, 1))];
        let visited = simulate(grid.bounds(), &placement_of(&grid), &emitters);
        let column: Vec<Point> = (0..=6).map(|y| (1, y)).collect();
        assert_eq!(sorted(&visited), column);
    }

    #[test]
    fn test_refraction_splits_the_beam() {
        let grid = Grid::from_markers(&["oo", "oC"]).unwrap();
        let emitters = [Emitter::new((1, 0), (1, 1))];
        let visited = simulate(grid.bounds(), &placement_of(&grid), &emitters);

        // straight through the block and out the bottom-right edge
        assert!(visited.contains(&(4, 3)));
        // bounced back up on the vertical axis
        assert!(visited.contains(&(4, 1)));
        assert_eq!(
            sorted(&visited),
            vec![(1, 0), (2, 1), (3, 2), (4, 1), (4, 3)]
        );
    }

    #[test]
    fn test_mirror_loop_terminates() {
        // two reflectors facing each other with a horizontal beam between them
        let grid = Grid::from_markers(&["AoA"]).unwrap();
        let emitters = [Emitter::new((3, 1), (1, 0))];
        let visited = simulate(grid.bounds(), &placement_of(&grid), &emitters);
        assert_eq!(sorted(&visited), vec![(2, 1), (3, 1), (4, 1)]);
    }

    #[test]
    fn test_diagonal_mirror_box_terminates() {
        let grid = Grid::from_markers(&["AAA", "AoA", "AAA"]).unwrap();
        let emitters = [Emitter::new((2, 3), (1, 1))];
        let visited = simulate(grid.bounds(), &placement_of(&grid), &emitters);
        assert_eq!(sorted(&visited), vec![(2, 3), (3, 2), (3, 4), (4, 3)]);
    }

    #[test]
    fn test_result_ignores_emitter_order() {
        let grid = Grid::from_markers(&["ooo", "oCo", "Aoo"]).unwrap();
        let placement = placement_of(&grid);
        let forward = [Emitter::new((0, 1), (1, 1)), Emitter::new((6, 3), (-1, -1))];
        let backward = [forward[1], forward[0]];
        assert_eq!(
            simulate(grid.bounds(), &placement, &forward),
            simulate(grid.bounds(), &placement, &backward)
        );
    }

    #[test]
    fn test_cache_serves_repeated_placements() {
        let grid = Grid::from_markers(&["oo", "oC"]).unwrap();
        let emitters = [Emitter::new((1, 0), (1, 1))];
        let placement = placement_of(&grid);
        let expected = simulate(grid.bounds(), &placement, &emitters);

        let mut cache = SimulationCache::new(grid.bounds(), &emitters);
        assert_eq!(cache.visited(&placement), &expected);
        assert_eq!(cache.visited(&placement), &expected);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }
}
