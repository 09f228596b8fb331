//! Block kinds, inventories, emitters and placements.
//!
//! The three block kinds use the letters of the `.bff` format:
//! `A` reflects, `B` absorbs (opaque) and `C` refracts.

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::{Direction, Point};

/// The three kinds of block a beam can interact with.
///
/// The derived ordering (Reflect < Absorb < Refract) defines the order in which
/// distinct permutations of an inventory are enumerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockKind {
    /// Mirrors the beam on the axis of the face it hit.
    Reflect,
    /// Stops the beam.
    Absorb,
    /// Lets the beam through and also sends a reflected copy back.
    Refract,
}

impl BlockKind {
    pub const ALL: [BlockKind; 3] = [BlockKind::Reflect, BlockKind::Absorb, BlockKind::Refract];

    /// The `.bff` letter for this kind.
    pub const fn letter(self) -> char {
        match self {
            BlockKind::Reflect => 'A',
            BlockKind::Absorb => 'B',
            BlockKind::Refract => 'C',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(BlockKind::Reflect),
            'B' => Some(BlockKind::Absorb),
            'C' => Some(BlockKind::Refract),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Number of movable blocks of each kind available to a puzzle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub reflect: usize,
    pub absorb: usize,
    pub refract: usize,
}

impl Inventory {
    pub const fn new(reflect: usize, absorb: usize, refract: usize) -> Self {
        Self {
            reflect,
            absorb,
            refract,
        }
    }

    pub const fn count(&self, kind: BlockKind) -> usize {
        match kind {
            BlockKind::Reflect => self.reflect,
            BlockKind::Absorb => self.absorb,
            BlockKind::Refract => self.refract,
        }
    }

    pub fn set(&mut self, kind: BlockKind, count: usize) {
        match kind {
            BlockKind::Reflect => self.reflect = count,
            BlockKind::Absorb => self.absorb = count,
            BlockKind::Refract => self.refract = count,
        }
    }

    /// Total number of blocks that must be placed.
    pub const fn total(&self) -> usize {
        self.reflect + self.absorb + self.refract
    }

    /// Expands the counts into a sorted multiset, e.g. `{A:2, B:1}` -> `[A, A, B]`.
    pub fn to_multiset(&self) -> Vec<BlockKind> {
        BlockKind::ALL
            .iter()
            .flat_map(|&kind| std::iter::repeat(kind).take(self.count(kind)))
            .collect()
    }
}

/// A laser source: origin on the lattice plus a direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Emitter {
    pub origin: Point,
    pub direction: Direction,
}

impl Emitter {
    pub const fn new(origin: Point, direction: Direction) -> Self {
        Self { origin, direction }
    }
}

/// Assignment of block kinds to lattice points, movable and fixed blocks together.
///
/// Backed by an ordered map so iteration order, equality and the cache key do not
/// depend on insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Placement {
    blocks: BTreeMap<Point, BlockKind>,
}

/// Order-independent identity of a placement, used for memoizing simulations.
pub type PlacementKey = Vec<(Point, BlockKind)>;

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a block, returning the kind previously at `point`, if any.
    pub fn insert(&mut self, point: Point, kind: BlockKind) -> Option<BlockKind> {
        self.blocks.insert(point, kind)
    }

    #[inline]
    pub fn get(&self, point: Point) -> Option<BlockKind> {
        self.blocks.get(&point).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over `(point, kind)` pairs sorted by point.
    pub fn iter(&self) -> impl Iterator<Item = (Point, BlockKind)> + '_ {
        self.blocks.iter().map(|(&point, &kind)| (point, kind))
    }

    /// Number of blocks of the given kind.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.values().filter(|&&k| k == kind).count()
    }

    /// Sorted `(point, kind)` sequence identifying this placement.
    pub fn key(&self) -> PlacementKey {
        self.iter().collect()
    }
}

impl FromIterator<(Point, BlockKind)> for Placement {
    fn from_iter<I: IntoIterator<Item = (Point, BlockKind)>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        write!(f, "{{")?;
        for ((x, y), kind) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "({x},{y}): {kind}")?;
            first = false;
        }
        write!(f, "}}")
    }
}
