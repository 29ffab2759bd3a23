//! Nearest-neighbor indexing over integer grid positions.
//!
//! Provides the [`GridPosition`] coordinate type with its Manhattan metric,
//! the [`NeighborIndex`] contract (insert + k-nearest retrieval), and two
//! conforming indices: [`KdTree`], an adapter over `kiddo`'s k-d tree, and a
//! [`LinearIndex`] that scans every entry.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod kdtree;
pub mod linear;

pub use kdtree::KdTree;
pub use linear::LinearIndex;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A position on the 2D integer grid. Ordered lexicographically by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position. Exact for any pair of `i32`
    /// coordinates.
    pub fn manhattan_distance(&self, other: &GridPosition) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// The adjacent position one step in `dir`, or `None` past the edge of
    /// the `i32` grid.
    pub fn step(&self, dir: Direction) -> Option<GridPosition> {
        let (dx, dy) = dir.offset();
        Some(GridPosition::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// The axis-adjacent positions that exist on the grid, in
    /// [`Direction::all`] order. Fewer than four at the grid edge.
    pub fn neighbors_4(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let center = *self;
        Direction::all().into_iter().filter_map(move |dir| center.step(dir))
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four cardinal directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// Offset for this direction.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

/// Errors from spatial operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpatialError {
    #[error("position {0} is occupied")]
    Occupied(GridPosition),
    #[error("cannot query {requested} nearest neighbors of an empty index")]
    Exhausted { requested: usize },
}

// ---------------------------------------------------------------------------
// Index contract
// ---------------------------------------------------------------------------

/// Anything that sits at a single grid position.
pub trait Positioned {
    fn position(&self) -> GridPosition;
}

impl Positioned for GridPosition {
    fn position(&self) -> GridPosition {
        *self
    }
}

/// A point container answering exact k-nearest-neighbor queries under the
/// Manhattan metric.
///
/// Implementations must return results ordered by `(distance, position)` so
/// that the answer depends only on the index contents, never on insertion
/// order. An entry at the query position itself is eligible (distance 0).
pub trait NeighborIndex<T: Positioned> {
    /// Add an entry. Fails with [`SpatialError::Occupied`] if another entry
    /// already sits at the same position.
    fn insert(&mut self, item: T) -> Result<(), SpatialError>;

    /// Add a batch of entries. Indices may override this to build a better
    /// layout than repeated single inserts would.
    fn insert_all(&mut self, items: Vec<T>) -> Result<(), SpatialError> {
        for item in items {
            self.insert(item)?;
        }
        Ok(())
    }

    /// Up to `k` entries closest to `query`.
    ///
    /// `k == 0` yields an empty result. Any other request against an empty
    /// index fails with [`SpatialError::Exhausted`].
    fn k_nearest(&self, query: GridPosition, k: usize) -> Result<Vec<&T>, SpatialError>;

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort key shared by every index: distance first, then position.
pub(crate) fn rank(query: GridPosition, position: GridPosition) -> (u64, GridPosition) {
    (query.manhattan_distance(&position), position)
}
