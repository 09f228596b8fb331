//! Lazor Puzzle Solver Library
//!
//! Places reflect, absorb and refract blocks on a grid so that laser beams pass
//! through every target point. The core is the beam simulator (`beam`) and the
//! exhaustive placement search (`solver`); loading (`bff`), text rendering
//! (`grid`) and solution files (`persistence`) sit around it.

pub mod beam;
pub mod bff;
pub mod blocks;
pub mod enumerate;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod solver;

use beam::VisitedSet;
use blocks::{Emitter, Inventory, Placement};
use error::SolveError;
use geometry::Point;
use grid::Grid;
use solver::{CancelToken, SearchOutcome, SolverConfig};

/// A complete puzzle: board, movable blocks, lasers and targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    pub grid: Grid,
    pub inventory: Inventory,
    pub emitters: Vec<Emitter>,
    pub targets: Vec<Point>,
}

impl Puzzle {
    /// Finds the first satisfying placement with the default configuration.
    pub fn solve(&self) -> Result<Option<Placement>, SolveError> {
        solver::solve(&self.grid, &self.inventory, &self.emitters, &self.targets)
    }

    /// Runs the search with an explicit configuration and cancellation token.
    pub fn solve_with(
        &self,
        config: &SolverConfig,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome, SolveError> {
        solver::search(
            &self.grid,
            &self.inventory,
            &self.emitters,
            &self.targets,
            config,
            cancel,
        )
    }

    /// Traces this puzzle's lasers through `placement`.
    pub fn simulate(&self, placement: &Placement) -> VisitedSet {
        beam::simulate(self.grid.bounds(), placement, &self.emitters)
    }

    /// Placement holding only the puzzle's fixed blocks.
    pub fn fixed_placement(&self) -> Placement {
        self.grid.fixed_cells().into_iter().collect()
    }

    /// True when the beams under `placement` touch every target.
    pub fn is_solved_by(&self, placement: &Placement) -> bool {
        let visited = self.simulate(placement);
        self.targets.iter().all(|target| visited.contains(target))
    }

    pub fn format_solution(&self, placement: &Placement) -> String {
        grid::format_solution(&self.grid, placement)
    }

    /// Renders the lattice with the beam paths produced by `placement`.
    pub fn format_beams(&self, placement: &Placement) -> String {
        let visited = self.simulate(placement);
        grid::format_beams(
            &self.grid,
            placement,
            &self.emitters,
            &self.targets,
            &visited,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockKind;

    const TINY_5: &str = include_str!("../puzzles/tiny_5.bff");
    const MAD_1: &str = include_str!("../puzzles/mad_1.bff");

    /// Movable blocks must match the inventory once the fixed blocks are removed.
    fn assert_conserves_inventory(puzzle: &Puzzle, placement: &Placement) {
        let fixed = puzzle.fixed_placement();
        for (point, kind) in fixed.iter() {
            assert_eq!(placement.get(point), Some(kind), "fixed block at {point:?} moved");
        }
        for kind in BlockKind::ALL {
            assert_eq!(
                placement.count(kind),
                puzzle.inventory.count(kind) + fixed.count(kind),
                "wrong number of {kind} blocks"
            );
        }
        for (point, _) in placement.iter() {
            if fixed.get(point).is_none() {
                assert!(
                    puzzle.grid.empty_cells().contains(&point),
                    "block placed on non-open cell {point:?}"
                );
            }
        }
    }

    #[test]
    fn test_tiny_5_solution() {
        let puzzle = bff::parse(TINY_5).unwrap();
        let placement = puzzle.solve().unwrap().expect("tiny_5 is solvable");

        assert_eq!(
            placement.to_string(),
            "{(1,1): A, (1,5): A, (3,1): B, (3,5): C, (5,1): A}"
        );
        assert!(puzzle.is_solved_by(&placement));
        assert_conserves_inventory(&puzzle, &placement);
    }

    #[test]
    fn test_mad_1_solution_covers_targets() {
        let puzzle = bff::parse(MAD_1).unwrap();
        let placement = puzzle.solve().unwrap().expect("mad_1 is solvable");

        assert!(puzzle.is_solved_by(&placement));
        assert_conserves_inventory(&puzzle, &placement);
        assert_eq!(puzzle.solve().unwrap(), Some(placement));
    }

    #[test]
    fn test_unsolved_board_misses_targets() {
        let puzzle = bff::parse(MAD_1).unwrap();
        assert!(!puzzle.is_solved_by(&puzzle.fixed_placement()));
    }
}
