//! Exhaustive placement search.
//!
//! Candidates are visited in a fixed order: the outer loop walks the distinct
//! orderings of the block inventory, the inner loop walks the k-subsets of open
//! cells, and `subset[i]` receives `ordering[i]`. The first candidate whose beams
//! touch every target wins, so puzzles with several answers always report the same
//! one. The parallel search splits the outer loop across rayon workers and still
//! returns that same first candidate.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::beam::SimulationCache;
use crate::blocks::{BlockKind, Emitter, Inventory, Placement};
use crate::enumerate::{Combinations, DistinctPermutations};
use crate::error::SolveError;
use crate::geometry::{is_block_site, is_valid_direction, Bounds, Point};
use crate::grid::Grid;

/// Default upper bound on board cells accepted by the solver.
pub const DEFAULT_MAX_CELLS: usize = 64;

/// Knobs for a single solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Split the search across rayon worker threads.
    pub parallel: bool,
    /// Largest board (rows * cols) the solver will attempt.
    pub max_cells: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

/// Cooperative cancellation flag, checked between candidates.
///
/// Clones share the same flag, so one clone can be handed to another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The first satisfying placement, fixed blocks included.
    pub placement: Option<Placement>,
    /// Number of candidate placements that were simulated.
    ///
    /// In parallel mode this includes candidates that workers tried on orderings
    /// after the winning one before they stopped.
    pub candidates: usize,
}

/// Read-only search state shared by every worker.
struct Search<'a> {
    bounds: Bounds,
    empty_cells: Vec<Point>,
    fixed_cells: Vec<(Point, BlockKind)>,
    emitters: &'a [Emitter],
    targets: &'a [Point],
    cancel: &'a CancelToken,
    candidates: AtomicUsize,
}

impl<'a> Search<'a> {
    /// Builds the full placement for one subset/ordering pair.
    fn candidate(&self, subset: &[Point], ordering: &[BlockKind]) -> Placement {
        let mut placement: Placement = subset
            .iter()
            .copied()
            .zip(ordering.iter().copied())
            .collect();
        for &(point, kind) in &self.fixed_cells {
            placement.insert(point, kind);
        }
        placement
    }

    /// Tries every subset for one block ordering, in enumeration order.
    fn search_ordering(
        &self,
        ordering: &[BlockKind],
        cache: &mut SimulationCache<'a>,
    ) -> Result<Option<Placement>, SolveError> {
        for subset in Combinations::new(&self.empty_cells, ordering.len()) {
            if self.cancel.is_cancelled() {
                return Err(SolveError::Cancelled);
            }

            let placement = self.candidate(&subset, ordering);
            self.candidates.fetch_add(1, Ordering::Relaxed);

            let visited = cache.visited(&placement);
            if self.targets.iter().all(|target| visited.contains(target)) {
                return Ok(Some(placement));
            }
        }
        Ok(None)
    }

    fn run_sequential(&self, multiset: Vec<BlockKind>) -> Result<Option<Placement>, SolveError> {
        let mut cache = SimulationCache::new(self.bounds, self.emitters);
        let mut found = None;

        for (index, ordering) in DistinctPermutations::new(multiset).enumerate() {
            debug!("trying block ordering #{index}: {ordering:?}");
            found = self.search_ordering(&ordering, &mut cache)?;
            if found.is_some() {
                break;
            }
        }

        debug!(
            "simulation cache: {} hits, {} misses",
            cache.hits(),
            cache.misses()
        );
        Ok(found)
    }

    fn run_parallel(&self, multiset: Vec<BlockKind>) -> Result<Option<Placement>, SolveError> {
        let orderings: Vec<Vec<BlockKind>> = DistinctPermutations::new(multiset).collect();
        debug!(
            "searching {} block orderings on {} threads",
            orderings.len(),
            rayon::current_num_threads()
        );

        // each worker keeps its own cache; find_map_first keeps enumeration order
        orderings
            .par_iter()
            .map_init(
                || SimulationCache::new(self.bounds, self.emitters),
                |cache, ordering| self.search_ordering(ordering, cache),
            )
            .find_map_first(|result| match result {
                Ok(None) => None,
                other => Some(other),
            })
            .unwrap_or(Ok(None))
    }
}

/// Rejects inputs the search cannot handle meaningfully.
fn validate(
    grid: &Grid,
    emitters: &[Emitter],
    config: &SolverConfig,
) -> Result<(), SolveError> {
    let cells = grid.rows() * grid.cols();
    if cells > config.max_cells {
        return Err(SolveError::BoardTooLarge {
            cells,
            limit: config.max_cells,
        });
    }

    for emitter in emitters {
        if !grid.bounds().contains(emitter.origin) {
            return Err(SolveError::EmitterOutOfBounds(emitter.origin));
        }
        if !is_valid_direction(emitter.direction) {
            return Err(SolveError::BadDirection(emitter.direction));
        }
    }

    Ok(())
}

/// Fails on the first point that is not a cell interior.
fn check_sites(points: impl IntoIterator<Item = Point>) -> Result<(), SolveError> {
    match points.into_iter().find(|&point| !is_block_site(point)) {
        Some(point) => Err(SolveError::NotABlockSite(point)),
        None => Ok(()),
    }
}

/// Checks that every block in `placement` sits on a cell interior.
pub fn check_block_sites(placement: &Placement) -> Result<(), SolveError> {
    check_sites(placement.iter().map(|(point, _)| point))
}

/// Runs the search and reports how many candidates were tried.
pub fn search(
    grid: &Grid,
    inventory: &Inventory,
    emitters: &[Emitter],
    targets: &[Point],
    config: &SolverConfig,
    cancel: &CancelToken,
) -> Result<SearchOutcome, SolveError> {
    validate(grid, emitters, config)?;

    let empty_cells = grid.empty_cells();
    let fixed_cells = grid.fixed_cells();
    check_sites(
        empty_cells
            .iter()
            .copied()
            .chain(fixed_cells.iter().map(|&(point, _)| point)),
    )?;

    let required = inventory.total();
    if required > empty_cells.len() {
        warn!(
            "{required} blocks cannot fit into {} open cells",
            empty_cells.len()
        );
        return Ok(SearchOutcome {
            placement: None,
            candidates: 0,
        });
    }

    info!(
        "solving {}x{} board: {required} blocks, {} open cells, {} targets",
        grid.rows(),
        grid.cols(),
        empty_cells.len(),
        targets.len()
    );

    let search = Search {
        bounds: grid.bounds(),
        empty_cells,
        fixed_cells,
        emitters,
        targets,
        cancel,
        candidates: AtomicUsize::new(0),
    };

    let multiset = inventory.to_multiset();
    let placement = if config.parallel {
        search.run_parallel(multiset)?
    } else {
        search.run_sequential(multiset)?
    };
    let candidates = search.candidates.load(Ordering::Relaxed);

    match &placement {
        Some(_) => info!("found a solution after {candidates} candidates"),
        None => info!("no solution among {candidates} candidates"),
    }

    Ok(SearchOutcome {
        placement,
        candidates,
    })
}

/// Finds the first placement whose beams touch every target.
///
/// Uses the default configuration; `Ok(None)` means the puzzle has no solution.
pub fn solve(
    grid: &Grid,
    inventory: &Inventory,
    emitters: &[Emitter],
    targets: &[Point],
) -> Result<Option<Placement>, SolveError> {
    search(
        grid,
        inventory,
        emitters,
        targets,
        &SolverConfig::default(),
        &CancelToken::new(),
    )
    .map(|outcome| outcome.placement)
}
