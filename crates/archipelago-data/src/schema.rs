//! Serde data file structs for island datasets.
//!
//! A dataset is a list of islands plus an optional query configuration.
//! These structs are deserialized from RON, JSON, or TOML files and then
//! turned into a [`TerritoryMap`].

use archipelago_core::id::UNCLAIMED;
use archipelago_core::{FactionId, GridPosition, TerritoryConfig, TerritoryError, TerritoryMap};
use serde::{Deserialize, Serialize};

/// One island in a data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandData {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub treasure: f64,
    /// Raw faction label; `-1` (the default) means unclaimed.
    #[serde(default = "unclaimed")]
    pub faction: i32,
}

fn unclaimed() -> i32 {
    UNCLAIMED
}

/// A whole dataset file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArchipelagoData {
    pub islands: Vec<IslandData>,
    #[serde(default)]
    pub config: TerritoryConfig,
}

impl ArchipelagoData {
    /// Split into the parallel position / treasure / raw faction columns.
    pub fn columns(&self) -> (Vec<GridPosition>, Vec<f64>, Vec<i32>) {
        let positions = self
            .islands
            .iter()
            .map(|i| GridPosition::new(i.x, i.y))
            .collect();
        let treasure = self.islands.iter().map(|i| i.treasure).collect();
        let factions = self.islands.iter().map(|i| i.faction).collect();
        (positions, treasure, factions)
    }

    /// Validate the dataset and build its territory map.
    pub fn into_territory_map(self) -> Result<TerritoryMap, TerritoryError> {
        let (positions, treasure, raw) = self.columns();
        let factions = FactionId::from_raw_slice(&raw)?;
        TerritoryMap::build(positions, treasure, factions, self.config)
    }
}
