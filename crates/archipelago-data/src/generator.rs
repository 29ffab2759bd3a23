//! Seeded synthetic datasets for benchmarks and stress tests.
//!
//! Islands are placed at distinct positions in the square `0..extent` on
//! both axes. Each island is claimed with probability `claimed_share` by a
//! uniformly chosen faction; at least one island always ends up claimed so
//! the result is a valid territory.

use crate::rng::SplitMix64;
use crate::schema::{ArchipelagoData, IslandData};
use archipelago_core::TerritoryConfig;
use archipelago_core::id::UNCLAIMED;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Parameters for [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub island_count: usize,
    /// Side length of the square the islands are placed in.
    pub extent: u32,
    pub faction_count: u32,
    /// Probability in `[0, 1]` that an island is claimed.
    pub claimed_share: f64,
    /// Treasure values are whole numbers in `0..=max_treasure`.
    pub max_treasure: u32,
    pub seed: u64,
    pub config: TerritoryConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            island_count: 1_000,
            extent: 100,
            faction_count: 8,
            claimed_share: 0.5,
            max_treasure: 100,
            seed: 0,
            config: TerritoryConfig::default(),
        }
    }
}

/// Errors from dataset generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("cannot place {island_count} islands in {cells} cells")]
    TooDense { island_count: usize, cells: u64 },
    #[error("extent {0} does not fit the coordinate range")]
    ExtentTooLarge(u32),
    #[error("at least one island is required")]
    NoIslands,
    #[error("at least one faction is required")]
    NoFactions,
}

/// Generate a dataset. The same configuration always yields the same data.
pub fn generate(cfg: &GeneratorConfig) -> Result<ArchipelagoData, GenerateError> {
    if cfg.island_count == 0 {
        return Err(GenerateError::NoIslands);
    }
    if cfg.faction_count == 0 {
        return Err(GenerateError::NoFactions);
    }
    if cfg.extent > i32::MAX as u32 {
        return Err(GenerateError::ExtentTooLarge(cfg.extent));
    }
    let cells = u64::from(cfg.extent) * u64::from(cfg.extent);
    if cfg.island_count as u64 > cells {
        return Err(GenerateError::TooDense {
            island_count: cfg.island_count,
            cells,
        });
    }

    let mut rng = SplitMix64::new(cfg.seed);
    let positions = place(&mut rng, cfg.island_count, cfg.extent, cells);

    let mut islands: Vec<IslandData> = positions
        .into_iter()
        .map(|(x, y)| {
            let faction = if rng.next_f64() < cfg.claimed_share {
                rng.below(u64::from(cfg.faction_count)) as i32
            } else {
                UNCLAIMED
            };
            IslandData {
                x,
                y,
                treasure: rng.below(u64::from(cfg.max_treasure) + 1) as f64,
                faction,
            }
        })
        .collect();

    if islands.iter().all(|i| i.faction == UNCLAIMED) {
        let pick = rng.below(islands.len() as u64) as usize;
        islands[pick].faction = rng.below(u64::from(cfg.faction_count)) as i32;
    }

    log::debug!(
        "generated {} islands ({} claimed) in a {}x{} square, seed {}",
        islands.len(),
        islands.iter().filter(|i| i.faction != UNCLAIMED).count(),
        cfg.extent,
        cfg.extent,
        cfg.seed
    );

    Ok(ArchipelagoData {
        islands,
        config: cfg.config,
    })
}

/// Pick `count` distinct cells of the `extent` square.
fn place(rng: &mut SplitMix64, count: usize, extent: u32, cells: u64) -> Vec<(i32, i32)> {
    let to_pos = |cell: u64| ((cell % u64::from(extent)) as i32, (cell / u64::from(extent)) as i32);

    // Dense fill: partial Fisher-Yates over every cell.
    if (count as u64).saturating_mul(2) >= cells {
        let mut all: Vec<u64> = (0..cells).collect();
        for i in 0..count {
            let j = i + rng.below((all.len() - i) as u64) as usize;
            all.swap(i, j);
        }
        return all[..count].iter().map(|&c| to_pos(c)).collect();
    }

    // Sparse fill: rejection sampling keeps at least half the draws.
    let mut taken: HashSet<u64> = HashSet::with_capacity(count);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let cell = rng.below(cells);
        if taken.insert(cell) {
            out.push(to_pos(cell));
        }
    }
    out
}
