//! A snapshot of every query result for one territory map.
//!
//! Used for printing, for serializing results, and for checking that two
//! maps (or two runs) agree.

use crate::error::TerritoryError;
use crate::id::FactionId;
use crate::island::Island;
use crate::territory::TerritoryMap;
use archipelago_spatial::{GridPosition, NeighborIndex};
use serde::Serialize;

/// All six query results, with both treasure-site algorithms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritoryReport {
    pub faction_count: usize,
    pub faction_with_most_colonies: FactionId,
    pub controlling_faction_ids: Vec<FactionId>,
    pub faction_treasury: Vec<f64>,
    pub factions_with_rival_neighbors: Vec<FactionId>,
    pub treasure_sites: Vec<GridPosition>,
    pub treasure_sites_by_count: Vec<GridPosition>,
}

impl TerritoryReport {
    /// Run every query against `map`.
    pub fn compute<I: NeighborIndex<Island>>(map: &TerritoryMap<I>) -> Result<Self, TerritoryError> {
        Ok(Self {
            faction_count: map.faction_count(),
            faction_with_most_colonies: map.faction_with_most_colonies()?,
            controlling_faction_ids: map.controlling_faction_ids().to_vec(),
            faction_treasury: map.faction_treasury()?,
            factions_with_rival_neighbors: map.factions_with_rival_neighbors()?,
            treasure_sites: map.treasure_sites(),
            treasure_sites_by_count: map.treasure_sites_by_count(),
        })
    }

    /// Whether both treasure-site algorithms produced the same sites.
    pub fn treasure_algorithms_agree(&self) -> bool {
        self.treasure_sites == self.treasure_sites_by_count
    }

    /// Sum of all faction treasuries.
    pub fn total_treasure(&self) -> f64 {
        self.faction_treasury.iter().sum()
    }
}
