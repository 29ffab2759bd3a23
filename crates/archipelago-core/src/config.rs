//! Tunable query parameters.

use serde::{Deserialize, Serialize};

/// Parameters for the neighbor-based queries.
///
/// Deserializes with every field optional; missing fields take the defaults
/// below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryConfig {
    /// How many nearest islands rival detection inspects around each island.
    /// The island itself plus its four axis neighbors is 5; with distinct
    /// positions that covers every island within radius 1. Lower values can
    /// miss rivals.
    pub rival_neighbor_count: usize,
    /// Largest Manhattan distance at which a differing faction is a rival.
    pub rival_radius: u64,
    /// Adjacent islands needed for an empty cell to be a treasure site.
    pub min_adjacent_islands: u32,
}

impl Default for TerritoryConfig {
    fn default() -> Self {
        Self {
            rival_neighbor_count: 5,
            rival_radius: 1,
            min_adjacent_islands: 3,
        }
    }
}
