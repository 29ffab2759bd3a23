//! Islands: grid positions carrying a faction label.

use crate::id::FactionId;
use archipelago_spatial::{GridPosition, Positioned};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// An island stored in a neighbor index.
///
/// Equality, ordering and hashing look at `position` only, so an island can
/// be found by location whatever faction it currently carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Island {
    pub position: GridPosition,
    pub faction: FactionId,
}

impl Island {
    pub fn new(position: GridPosition, faction: FactionId) -> Self {
        Self { position, faction }
    }

    /// Manhattan distance between two islands.
    pub fn distance(&self, other: &Island) -> u64 {
        self.position.manhattan_distance(&other.position)
    }
}

impl Positioned for Island {
    fn position(&self) -> GridPosition {
        self.position
    }
}

impl PartialEq for Island {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Island {}

impl PartialOrd for Island {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Island {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position.cmp(&other.position)
    }
}

impl Hash for Island {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}
