//! Fixed-capacity per-faction storage.

use crate::error::TerritoryError;
use crate::id::FactionId;
use serde::Serialize;

/// A value per faction id, with capacity fixed at construction.
///
/// Every access is bounds-checked and reports
/// [`TerritoryError::FactionOutOfRange`] instead of panicking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionTable<T> {
    values: Vec<T>,
}

impl<T: Clone> FactionTable<T> {
    /// A table for `faction_count` factions, every slot set to `initial`.
    pub fn new(faction_count: usize, initial: T) -> Self {
        Self {
            values: vec![initial; faction_count],
        }
    }
}

impl<T> FactionTable<T> {
    /// Number of faction slots.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, faction: FactionId) -> Result<&T, TerritoryError> {
        let faction_count = self.values.len();
        self.values
            .get(faction.index())
            .ok_or(TerritoryError::FactionOutOfRange {
                faction,
                faction_count,
            })
    }

    pub fn get_mut(&mut self, faction: FactionId) -> Result<&mut T, TerritoryError> {
        let faction_count = self.values.len();
        self.values
            .get_mut(faction.index())
            .ok_or(TerritoryError::FactionOutOfRange {
                faction,
                faction_count,
            })
    }

    /// Iterate `(faction, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FactionId, &T)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (FactionId(i as u32), v))
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}
