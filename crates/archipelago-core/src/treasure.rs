//! Treasure-site discovery.
//!
//! A treasure site is an empty grid cell that is 4-adjacent to at least a
//! threshold number of islands. Two interchangeable algorithms are provided
//! and must always agree:
//!
//! - [`treasure_sites_merge`] sorts the candidate multiset and walks it in
//!   lockstep with the ordered occupied set, like merging two sorted lists.
//! - [`treasure_sites_counting`] counts candidates in a hash map and checks
//!   occupancy per distinct candidate.
//!
//! Both return sites in ascending `(x, y)` order.

use archipelago_spatial::GridPosition;
use std::collections::{BTreeSet, HashMap};

/// Ordered-merge treasure-site search.
pub fn treasure_sites_merge(islands: &[GridPosition], min_adjacent: u32) -> Vec<GridPosition> {
    let occupied: BTreeSet<GridPosition> = islands.iter().copied().collect();
    let mut candidates: Vec<GridPosition> = islands.iter().flat_map(|p| p.neighbors_4()).collect();
    candidates.sort_unstable();

    let mut sites = Vec::new();
    let mut occupied = occupied.iter().peekable();
    let mut start = 0;
    while start < candidates.len() {
        let value = candidates[start];
        let multiplicity = candidates[start..]
            .iter()
            .take_while(|&&c| c == value)
            .count();

        // Advance the occupied cursor up to the current run.
        while occupied.next_if(|&&o| o < value).is_some() {}
        let is_island = occupied.next_if_eq(&&value).is_some();

        if !is_island && multiplicity >= min_adjacent as usize {
            sites.push(value);
        }
        start += multiplicity;
    }
    sites
}

/// Hash-multiset treasure-site search.
pub fn treasure_sites_counting(islands: &[GridPosition], min_adjacent: u32) -> Vec<GridPosition> {
    let occupied: BTreeSet<GridPosition> = islands.iter().copied().collect();
    let mut counts: HashMap<GridPosition, u32> = HashMap::with_capacity(islands.len() * 4);
    for island in islands {
        for candidate in island.neighbors_4() {
            *counts.entry(candidate).or_insert(0) += 1;
        }
    }

    let sites: BTreeSet<GridPosition> = counts
        .into_iter()
        .filter(|(pos, count)| *count >= min_adjacent && !occupied.contains(pos))
        .map(|(pos, _)| pos)
        .collect();
    sites.into_iter().collect()
}
