//! Archipelago Core -- territorial control over a fixed set of grid islands.
//!
//! Islands sit at distinct integer grid positions. Some are claimed by a
//! faction, the rest are unclaimed and fall under the faction of their
//! nearest inhabited island. A [`territory::TerritoryMap`] is built once from
//! the raw columns and answers every query from cached state and its
//! neighbor indices.
//!
//! # Queries
//!
//! 1. **Faction count** -- highest original faction id plus one.
//! 2. **Most colonies** -- the faction owning the most claimed islands.
//! 3. **Controlling factions** -- per island, cached at construction.
//! 4. **Treasury** -- treasure summed by controlling faction.
//! 5. **Rival neighbors** -- factions bordering another faction.
//! 6. **Treasure sites** -- empty cells next to at least three islands,
//!    by either of two equivalent algorithms in [`treasure`].
//!
//! ```rust,ignore
//! let map = TerritoryMap::from_raw(positions, treasure, &raw_factions)?;
//! let owners = map.controlling_faction_ids();
//! let sites = map.treasure_sites();
//! ```
//!
//! # Key Types
//!
//! - [`territory::TerritoryMap`] -- construction, faction resolution, queries.
//! - [`island::Island`] -- a position with a faction label, compared by
//!   position only.
//! - [`faction_table::FactionTable`] -- bounds-checked per-faction storage.
//! - [`config::TerritoryConfig`] -- rival radius, neighbor count, site
//!   threshold.
//! - [`report::TerritoryReport`] -- every query result in one value.

pub mod config;
pub mod error;
pub mod faction_table;
pub mod id;
pub mod island;
pub mod report;
pub mod territory;
pub mod treasure;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use archipelago_spatial::{GridPosition, KdTree, LinearIndex, NeighborIndex};
pub use config::TerritoryConfig;
pub use error::{InvalidInputError, TerritoryError};
pub use id::FactionId;
pub use island::Island;
pub use territory::TerritoryMap;
