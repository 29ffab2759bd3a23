//! Exhaustive-scan index. Every query ranks all entries.
//!
//! Useful as a reference for the tree index and for tiny datasets where a
//! tree does not pay for itself.

use crate::{GridPosition, NeighborIndex, Positioned, SpatialError, rank};
use std::collections::BTreeSet;

/// An unordered list of entries with an occupancy set for duplicate checks.
#[derive(Debug, Clone)]
pub struct LinearIndex<T> {
    items: Vec<T>,
    occupied: BTreeSet<GridPosition>,
}

impl<T> Default for LinearIndex<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            occupied: BTreeSet::new(),
        }
    }
}

impl<T: Positioned> LinearIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Positioned> NeighborIndex<T> for LinearIndex<T> {
    fn insert(&mut self, item: T) -> Result<(), SpatialError> {
        let pos = item.position();
        if !self.occupied.insert(pos) {
            return Err(SpatialError::Occupied(pos));
        }
        self.items.push(item);
        Ok(())
    }

    fn k_nearest(&self, query: GridPosition, k: usize) -> Result<Vec<&T>, SpatialError> {
        if k == 0 {
            return Ok(Vec::new());
        }
        if self.items.is_empty() {
            return Err(SpatialError::Exhausted { requested: k });
        }

        let mut ranked: Vec<&T> = self.items.iter().collect();
        let key = |item: &&T| rank(query, item.position());
        if k < ranked.len() {
            ranked.select_nth_unstable_by_key(k - 1, key);
            ranked.truncate(k);
        }
        ranked.sort_unstable_by_key(key);
        Ok(ranked)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
