//! The territory map: faction resolution and territorial queries over a
//! fixed island set.
//!
//! Construction validates the input, indexes the inhabited islands, resolves
//! every unclaimed island to the faction of its nearest inhabited island and
//! caches that assignment, then indexes all islands under their resolved
//! factions. Nothing is mutated afterwards.

use crate::config::TerritoryConfig;
use crate::error::{InvalidInputError, TerritoryError};
use crate::faction_table::FactionTable;
use crate::id::FactionId;
use crate::island::Island;
use crate::treasure::{treasure_sites_counting, treasure_sites_merge};
use archipelago_spatial::{GridPosition, KdTree, NeighborIndex, SpatialError};
use std::collections::HashMap;

/// Read-only territorial analysis of an island dataset.
///
/// Generic over the neighbor index so any conforming [`NeighborIndex`] can
/// back it; [`TerritoryMap::new`] uses a [`KdTree`].
#[derive(Debug, Clone)]
pub struct TerritoryMap<I = KdTree<Island>> {
    positions: Vec<GridPosition>,
    treasure: Vec<f64>,
    factions: Vec<Option<FactionId>>,
    faction_count: usize,
    config: TerritoryConfig,
    /// Islands with an original owner, labeled with that owner.
    inhabited: I,
    /// Every island, labeled with its controlling faction.
    all: I,
    /// Controlling faction per island, fixed at construction.
    controlling: Vec<FactionId>,
}

impl TerritoryMap<KdTree<Island>> {
    /// Build a k-d tree backed map with the default configuration.
    ///
    /// `factions[i]` is `None` for an unclaimed island.
    pub fn new(
        positions: Vec<GridPosition>,
        treasure: Vec<f64>,
        factions: Vec<Option<FactionId>>,
    ) -> Result<Self, TerritoryError> {
        Self::build(positions, treasure, factions, TerritoryConfig::default())
    }

    /// Build from raw `i32` faction labels, where `-1` means unclaimed.
    pub fn from_raw(
        positions: Vec<GridPosition>,
        treasure: Vec<f64>,
        raw_factions: &[i32],
    ) -> Result<Self, TerritoryError> {
        let factions = FactionId::from_raw_slice(raw_factions)?;
        Self::new(positions, treasure, factions)
    }
}

impl<I: NeighborIndex<Island> + Default> TerritoryMap<I> {
    /// Build a map over any neighbor index type.
    pub fn build(
        positions: Vec<GridPosition>,
        treasure: Vec<f64>,
        factions: Vec<Option<FactionId>>,
        config: TerritoryConfig,
    ) -> Result<Self, TerritoryError> {
        validate(&positions, &treasure, &factions)?;

        let faction_count = factions
            .iter()
            .flatten()
            .map(|f| f.index() + 1)
            .max()
            .ok_or(InvalidInputError::NoInhabitedIslands)?;

        let mut inhabited = I::default();
        inhabited.insert_all(
            positions
                .iter()
                .zip(&factions)
                .filter_map(|(&pos, faction)| faction.map(|f| Island::new(pos, f)))
                .collect(),
        )?;

        let controlling = positions
            .iter()
            .zip(&factions)
            .map(|(&pos, faction)| match faction {
                Some(f) => Ok(*f),
                None => nearest_faction(&inhabited, pos),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut all = I::default();
        all.insert_all(
            positions
                .iter()
                .zip(&controlling)
                .map(|(&pos, &f)| Island::new(pos, f))
                .collect(),
        )?;

        log::debug!(
            "territory map built: {} islands ({} inhabited), {} factions",
            positions.len(),
            inhabited.len(),
            faction_count
        );

        Ok(Self {
            positions,
            treasure,
            factions,
            faction_count,
            config,
            inhabited,
            all,
            controlling,
        })
    }
}

impl<I: NeighborIndex<Island>> TerritoryMap<I> {
    // -- Dataset --

    pub fn island_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of factions: highest original faction id plus one.
    pub fn faction_count(&self) -> usize {
        self.faction_count
    }

    pub fn positions(&self) -> &[GridPosition] {
        &self.positions
    }

    pub fn treasure(&self) -> &[f64] {
        &self.treasure
    }

    /// Original owners as supplied; `None` for unclaimed islands.
    pub fn original_factions(&self) -> &[Option<FactionId>] {
        &self.factions
    }

    pub fn config(&self) -> &TerritoryConfig {
        &self.config
    }

    /// Number of islands with an original owner.
    pub fn inhabited_count(&self) -> usize {
        self.inhabited.len()
    }

    // -- Faction queries --

    /// The cached controlling faction of every island, by island index.
    pub fn controlling_faction_ids(&self) -> &[FactionId] {
        &self.controlling
    }

    pub fn controlling_faction(&self, island: usize) -> Option<FactionId> {
        self.controlling.get(island).copied()
    }

    /// Originally claimed islands per faction.
    pub fn colony_counts(&self) -> Result<FactionTable<u32>, TerritoryError> {
        let mut counts = FactionTable::new(self.faction_count, 0u32);
        for faction in self.factions.iter().flatten() {
            *counts.get_mut(*faction)? += 1;
        }
        Ok(counts)
    }

    /// The faction owning the most originally claimed islands. Ties go to
    /// the lowest id.
    pub fn faction_with_most_colonies(&self) -> Result<FactionId, TerritoryError> {
        let counts = self.colony_counts()?;
        let mut best = FactionId(0);
        let mut best_count = *counts.get(best)?;
        for (faction, &count) in counts.iter() {
            if count > best_count {
                best = faction;
                best_count = count;
            }
        }
        Ok(best)
    }

    /// Treasure summed by controlling faction; one entry per faction id.
    pub fn faction_treasury(&self) -> Result<Vec<f64>, TerritoryError> {
        let mut treasury = FactionTable::new(self.faction_count, 0.0f64);
        for (&faction, &amount) in self.controlling.iter().zip(&self.treasure) {
            *treasury.get_mut(faction)? += amount;
        }
        Ok(treasury.into_vec())
    }

    /// Factions controlling at least one island that borders an island of
    /// another faction.
    ///
    /// Each faction appears once, ordered by the first island that revealed
    /// it. Only the `rival_neighbor_count` nearest islands are inspected
    /// around each island, and only those within `rival_radius` count.
    pub fn factions_with_rival_neighbors(&self) -> Result<Vec<FactionId>, TerritoryError> {
        let mut flagged = FactionTable::new(self.faction_count, false);
        let mut rivals = Vec::new();

        for (&pos, &faction) in self.positions.iter().zip(&self.controlling) {
            if *flagged.get(faction)? {
                continue;
            }
            let here = Island::new(pos, faction);
            let nearby = self.all.k_nearest(pos, self.config.rival_neighbor_count)?;
            let has_rival = nearby.iter().any(|other| {
                other.faction != faction && other.distance(&here) <= self.config.rival_radius
            });
            if has_rival {
                *flagged.get_mut(faction)? = true;
                rivals.push(faction);
            }
        }
        Ok(rivals)
    }

    // -- Treasure sites --

    /// Treasure sites via the ordered-merge algorithm.
    pub fn treasure_sites(&self) -> Vec<GridPosition> {
        treasure_sites_merge(&self.positions, self.config.min_adjacent_islands)
    }

    /// Treasure sites via the hash-multiset algorithm.
    pub fn treasure_sites_by_count(&self) -> Vec<GridPosition> {
        treasure_sites_counting(&self.positions, self.config.min_adjacent_islands)
    }
}

fn validate(
    positions: &[GridPosition],
    treasure: &[f64],
    factions: &[Option<FactionId>],
) -> Result<(), InvalidInputError> {
    if positions.is_empty() {
        return Err(InvalidInputError::NoIslands);
    }
    if positions.len() != treasure.len() || positions.len() != factions.len() {
        return Err(InvalidInputError::LengthMismatch {
            positions: positions.len(),
            treasure: treasure.len(),
            factions: factions.len(),
        });
    }

    let mut seen: HashMap<GridPosition, usize> = HashMap::with_capacity(positions.len());
    for (second, &position) in positions.iter().enumerate() {
        if let Some(&first) = seen.get(&position) {
            return Err(InvalidInputError::DuplicatePosition {
                first,
                second,
                position,
            });
        }
        seen.insert(position, second);
    }

    if factions.iter().all(Option::is_none) {
        return Err(InvalidInputError::NoInhabitedIslands);
    }
    Ok(())
}

/// Faction of the nearest inhabited island; the lowest id among all islands
/// tied at the minimum distance.
///
/// The query widens until it returns something farther than the nearest
/// distance (or everything), so the whole tie set is seen regardless of how
/// the index orders equal distances.
fn nearest_faction<I: NeighborIndex<Island>>(
    inhabited: &I,
    query: GridPosition,
) -> Result<FactionId, TerritoryError> {
    let mut k = 1;
    loop {
        let found = inhabited.k_nearest(query, k)?;
        let nearest = found
            .iter()
            .map(|island| island.position.manhattan_distance(&query))
            .min()
            .ok_or(SpatialError::Exhausted { requested: k })?;
        let complete = found.len() < k
            || found
                .iter()
                .any(|island| island.position.manhattan_distance(&query) > nearest);

        if complete {
            let tied = found
                .iter()
                .filter(|island| island.position.manhattan_distance(&query) == nearest);
            let faction = tied
                .clone()
                .map(|island| island.faction)
                .min()
                .ok_or(SpatialError::Exhausted { requested: k })?;
            if tied.count() > 1 {
                log::trace!("island at {query} tied at distance {nearest}; resolved to faction {faction}");
            }
            return Ok(faction);
        }
        k *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use archipelago_spatial::LinearIndex;

    #[test]
    fn line_resolves_tie_to_lowest_faction() {
        let map = line_map();
        assert_eq!(map.faction_count(), 2);
        assert_eq!(
            map.controlling_faction_ids(),
            &[FactionId(0), FactionId(1), FactionId(0)]
        );
        assert_eq!(map.faction_treasury().unwrap(), vec![5.0, 7.0]);
        assert_eq!(map.faction_with_most_colonies().unwrap(), FactionId(0));
    }

    #[test]
    fn tie_break_ignores_insertion_order() {
        // Higher faction listed first; still resolves to the lower id.
        let map = TerritoryMap::from_raw(
            vec![pos(2, 0), pos(0, 0), pos(1, 0)],
            vec![0.0; 3],
            &[3, 1, -1],
        )
        .unwrap();
        assert_eq!(map.controlling_faction(2), Some(FactionId(1)));
    }

    #[test]
    fn wide_tie_set_is_fully_inspected() {
        // Eight inhabited islands at distance 2 around the origin; faction 0
        // is not among the first few in position order.
        let ring = [
            (2, 0, 7),
            (1, 1, 6),
            (0, 2, 5),
            (-1, 1, 4),
            (-2, 0, 3),
            (-1, -1, 2),
            (0, -2, 1),
            (1, -1, 0),
        ];
        let mut positions: Vec<GridPosition> = ring.iter().map(|&(x, y, _)| pos(x, y)).collect();
        let mut factions: Vec<i32> = ring.iter().map(|&(_, _, f)| f).collect();
        positions.push(pos(0, 0));
        factions.push(-1);
        let map = TerritoryMap::from_raw(positions, vec![0.0; 9], &factions).unwrap();
        assert_eq!(map.controlling_faction(8), Some(FactionId(0)));
    }

    #[test]
    fn unclaimed_takes_nearest_not_lowest() {
        let map = TerritoryMap::from_raw(
            vec![pos(0, 0), pos(10, 0), pos(8, 0)],
            vec![1.0, 2.0, 4.0],
            &[0, 1, -1],
        )
        .unwrap();
        assert_eq!(map.controlling_faction(2), Some(FactionId(1)));
        assert_eq!(map.faction_treasury().unwrap(), vec![1.0, 6.0]);
    }

    #[test]
    fn empty_input_rejected() {
        let err = TerritoryMap::new(vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err, TerritoryError::InvalidInput(InvalidInputError::NoIslands));
    }

    #[test]
    fn all_unclaimed_rejected() {
        let err = TerritoryMap::from_raw(vec![pos(0, 0), pos(1, 1)], vec![0.0, 0.0], &[-1, -1])
            .unwrap_err();
        assert_eq!(
            err,
            TerritoryError::InvalidInput(InvalidInputError::NoInhabitedIslands)
        );
    }

    #[test]
    fn duplicate_positions_rejected() {
        let err = TerritoryMap::from_raw(
            vec![pos(0, 0), pos(1, 1), pos(0, 0)],
            vec![0.0; 3],
            &[0, 1, -1],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TerritoryError::InvalidInput(InvalidInputError::DuplicatePosition {
                first: 0,
                second: 2,
                position: pos(0, 0),
            })
        );
    }

    #[test]
    fn mismatched_columns_rejected() {
        let err = TerritoryMap::from_raw(vec![pos(0, 0), pos(1, 1)], vec![0.0], &[0, 1])
            .unwrap_err();
        assert!(matches!(
            err,
            TerritoryError::InvalidInput(InvalidInputError::LengthMismatch {
                positions: 2,
                treasure: 1,
                factions: 2,
            })
        ));
    }

    #[test]
    fn bad_raw_label_rejected() {
        let err = TerritoryMap::from_raw(vec![pos(0, 0)], vec![0.0], &[-3]).unwrap_err();
        assert_eq!(
            err,
            TerritoryError::InvalidInput(InvalidInputError::InvalidFactionLabel { index: 0, raw: -3 })
        );
    }

    #[test]
    fn empty_index_reports_exhaustion() {
        let index: KdTree<Island> = KdTree::new();
        let err = nearest_faction(&index, pos(0, 0)).unwrap_err();
        assert!(err.is_index_exhausted());
    }

    #[test]
    fn faction_count_skips_gaps() {
        // Factions 0 and 4 only: the count is still max + 1.
        let map = TerritoryMap::from_raw(vec![pos(0, 0), pos(5, 5)], vec![1.0, 1.0], &[0, 4])
            .unwrap();
        assert_eq!(map.faction_count(), 5);
        assert_eq!(map.faction_treasury().unwrap(), vec![1.0, 0.0, 0.0, 0.0, 1.0]);
        let counts = map.colony_counts().unwrap().into_vec();
        assert_eq!(counts, vec![1, 0, 0, 0, 1]);
    }

    #[test]
    fn most_colonies_prefers_larger_then_lower() {
        let map = TerritoryMap::from_raw(
            vec![pos(0, 0), pos(3, 0), pos(6, 0), pos(9, 0), pos(12, 0)],
            vec![0.0; 5],
            &[2, 1, 2, 1, 0],
        )
        .unwrap();
        // Factions 1 and 2 both own two; 1 wins.
        assert_eq!(map.faction_with_most_colonies().unwrap(), FactionId(1));
    }

    #[test]
    fn most_colonies_counts_original_claims_only() {
        // Faction 1 controls three islands but only claimed one.
        let map = TerritoryMap::from_raw(
            vec![pos(0, 0), pos(1, 0), pos(10, 0), pos(11, 0), pos(12, 0)],
            vec![0.0; 5],
            &[0, 0, 1, -1, -1],
        )
        .unwrap();
        assert_eq!(map.faction_with_most_colonies().unwrap(), FactionId(0));
    }

    #[test]
    fn rivals_require_adjacency() {
        // Factions 0 and 1 touch; faction 2 is isolated by one empty cell.
        let map = TerritoryMap::from_raw(
            vec![pos(0, 0), pos(1, 0), pos(5, 0), pos(0, 1)],
            vec![0.0; 4],
            &[0, 1, 2, 0],
        )
        .unwrap();
        assert_eq!(
            map.factions_with_rival_neighbors().unwrap(),
            vec![FactionId(0), FactionId(1)]
        );
    }

    #[test]
    fn diagonal_is_not_a_border() {
        let map = TerritoryMap::from_raw(vec![pos(0, 0), pos(1, 1)], vec![0.0; 2], &[0, 1])
            .unwrap();
        assert!(map.factions_with_rival_neighbors().unwrap().is_empty());
    }

    #[test]
    fn rivals_use_resolved_factions() {
        // The unclaimed island at (1,0) joins faction 0 and borders (2,0).
        let map = TerritoryMap::from_raw(
            vec![pos(0, 0), pos(1, 0), pos(2, 0), pos(3, 0)],
            vec![0.0; 4],
            &[0, -1, 1, 1],
        )
        .unwrap();
        assert_eq!(
            map.factions_with_rival_neighbors().unwrap(),
            vec![FactionId(0), FactionId(1)]
        );
    }

    #[test]
    fn wider_radius_config_finds_distant_rivals() {
        let config = TerritoryConfig {
            rival_radius: 2,
            ..TerritoryConfig::default()
        };
        let map: TerritoryMap = TerritoryMap::build(
            vec![pos(0, 0), pos(2, 0)],
            vec![0.0; 2],
            vec![Some(FactionId(0)), Some(FactionId(1))],
            config,
        )
        .unwrap();
        assert_eq!(
            map.factions_with_rival_neighbors().unwrap(),
            vec![FactionId(0), FactionId(1)]
        );
    }

    #[test]
    fn linear_index_backend_agrees() {
        let positions = vec![pos(0, 0), pos(2, 0), pos(1, 0), pos(1, 1), pos(4, 4)];
        let factions = FactionId::from_raw_slice(&[0, 1, -1, -1, 1]).unwrap();
        let treasure = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let tree = TerritoryMap::new(positions.clone(), treasure.clone(), factions.clone()).unwrap();
        let linear: TerritoryMap<LinearIndex<Island>> =
            TerritoryMap::build(positions, treasure, factions, TerritoryConfig::default()).unwrap();

        assert_eq!(tree.controlling_faction_ids(), linear.controlling_faction_ids());
        assert_eq!(
            tree.factions_with_rival_neighbors().unwrap(),
            linear.factions_with_rival_neighbors().unwrap()
        );
        assert_eq!(tree.faction_treasury().unwrap(), linear.faction_treasury().unwrap());
    }

    #[test]
    fn treasure_queries_agree() {
        let map = TerritoryMap::from_raw(
            vec![pos(0, 1), pos(2, 1), pos(1, 0), pos(1, 2), pos(1, 1)],
            vec![0.0; 5],
            &[0, 0, 1, -1, -1],
        )
        .unwrap();
        // (1,1) is occupied and surrounded; no site may include it.
        let merged = map.treasure_sites();
        assert_eq!(merged, map.treasure_sites_by_count());
        assert!(!merged.contains(&pos(1, 1)));
    }

    #[test]
    fn far_corners_resolve_without_overflow() {
        let (min, max) = (i32::MIN, i32::MAX);
        let map = TerritoryMap::from_raw(
            vec![pos(min, min), pos(max, max), pos(min, max), pos(min + 1, min + 1), pos(max - 1, max)],
            vec![1.0, 2.0, 4.0, 8.0, 16.0],
            &[1, 0, -1, -1, -1],
        )
        .unwrap();
        assert_eq!(
            map.controlling_faction_ids(),
            &[FactionId(1), FactionId(0), FactionId(0), FactionId(1), FactionId(0)]
        );
        assert_eq!(map.faction_treasury().unwrap(), vec![22.0, 9.0]);
        assert!(map.factions_with_rival_neighbors().unwrap().is_empty());
    }

    #[test]
    fn grid_edge_islands_do_not_wrap_into_sites() {
        let max = i32::MAX;
        let map = TerritoryMap::from_raw(
            vec![pos(max, 0), pos(max, 2), pos(max - 1, 1), pos(0, 0)],
            vec![0.0; 4],
            &[0, 0, 1, 1],
        )
        .unwrap();
        assert_eq!(map.treasure_sites(), vec![pos(max, 1)]);
        assert_eq!(map.treasure_sites_by_count(), vec![pos(max, 1)]);
    }

    #[test]
    fn territory_map_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TerritoryMap>();
    }
}
