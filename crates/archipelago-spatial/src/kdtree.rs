//! k-d tree index backed by `kiddo`.
//!
//! Entries are kept in a `Vec`; the tree stores their coordinates as `f64`
//! (exact for every `i32`) and answers with entry indices. Every `i32`
//! Manhattan distance is below 2^33, so `kiddo`'s `f64` distances are exact
//! too, but the adapter still re-ranks by the integer distance and the
//! position to give the `(distance, position)` order the contract requires.
//!
//! `kiddo`'s immutable tree is rebuilt on every insertion, so batches should
//! go through [`NeighborIndex::insert_all`].

use crate::{GridPosition, NeighborIndex, Positioned, SpatialError, rank};
use kiddo::Manhattan;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use std::collections::HashSet;
use std::fmt;
use std::num::NonZero;

type Tree = ImmutableKdTree<f64, u64, 2, 32>;

fn coords(pos: GridPosition) -> [f64; 2] {
    [f64::from(pos.x), f64::from(pos.y)]
}

/// A 2D k-d tree over [`Positioned`] entries.
#[derive(Clone)]
pub struct KdTree<T> {
    items: Vec<T>,
    occupied: HashSet<GridPosition>,
    tree: Option<Tree>,
}

impl<T> Default for KdTree<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            occupied: HashSet::new(),
            tree: None,
        }
    }
}

impl<T> fmt::Debug for KdTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree").field("len", &self.items.len()).finish()
    }
}

impl<T: Positioned> KdTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a batch of entries.
    pub fn from_items(items: Vec<T>) -> Result<Self, SpatialError> {
        let mut tree = Self::new();
        tree.insert_all(items)?;
        Ok(tree)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    fn rebuild(&mut self) {
        let points: Vec<[f64; 2]> = self.items.iter().map(|it| coords(it.position())).collect();
        self.tree = (!points.is_empty()).then(|| ImmutableKdTree::new_from_slice(&points));
    }

    /// Raw tree answer: up to `qty` entry indices, nearest first in
    /// `kiddo`'s order.
    fn nearest_indices(&self, tree: &Tree, query: GridPosition, qty: usize) -> Vec<usize> {
        let Some(qty) = NonZero::new(qty.min(self.items.len())) else {
            return Vec::new();
        };
        tree.nearest_n::<Manhattan>(&coords(query), qty)
            .into_iter()
            .map(|nn| nn.item as usize)
            .collect()
    }
}

impl<T: Positioned> NeighborIndex<T> for KdTree<T> {
    fn insert(&mut self, item: T) -> Result<(), SpatialError> {
        let pos = item.position();
        if !self.occupied.insert(pos) {
            return Err(SpatialError::Occupied(pos));
        }
        self.items.push(item);
        self.rebuild();
        Ok(())
    }

    /// Checks the whole batch for collisions, then rebuilds once.
    fn insert_all(&mut self, items: Vec<T>) -> Result<(), SpatialError> {
        let mut added = HashSet::with_capacity(items.len());
        for item in &items {
            let pos = item.position();
            if self.occupied.contains(&pos) || !added.insert(pos) {
                return Err(SpatialError::Occupied(pos));
            }
        }
        self.occupied.extend(added);
        self.items.extend(items);
        self.rebuild();
        Ok(())
    }

    fn k_nearest(&self, query: GridPosition, k: usize) -> Result<Vec<&T>, SpatialError> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let Some(tree) = &self.tree else {
            return Err(SpatialError::Exhausted { requested: k });
        };

        // kiddo breaks distance ties arbitrarily. Widen the request until
        // something strictly farther than the k-th entry shows up, so every
        // entry tied with it is a candidate, then re-rank.
        let mut qty = k;
        let mut found = loop {
            let found = self.nearest_indices(tree, query, qty);
            let kth = found
                .iter()
                .map(|&i| rank(query, self.items[i].position()).0)
                .nth(k - 1);
            let complete = found.len() < qty
                || kth.is_none_or(|kth| {
                    found
                        .iter()
                        .any(|&i| rank(query, self.items[i].position()).0 > kth)
                });
            if complete {
                break found;
            }
            qty *= 2;
        };

        found.sort_unstable_by_key(|&i| rank(query, self.items[i].position()));
        found.truncate(k);
        Ok(found.into_iter().map(|i| &self.items[i]).collect())
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
