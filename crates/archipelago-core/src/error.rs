use crate::id::FactionId;
use archipelago_spatial::{GridPosition, SpatialError};

/// Input that cannot be turned into a territory map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    /// The dataset holds no islands at all.
    #[error("no islands supplied")]
    NoIslands,

    /// Every island is unclaimed, so there is nothing to resolve against.
    #[error("no inhabited island; controlling factions cannot be resolved")]
    NoInhabitedIslands,

    /// Two islands sit at the same position.
    #[error("islands {first} and {second} share position {position}")]
    DuplicatePosition {
        first: usize,
        second: usize,
        position: GridPosition,
    },

    /// The parallel input columns differ in length.
    #[error(
        "input columns differ in length: {positions} positions, {treasure} treasure values, {factions} faction labels"
    )]
    LengthMismatch {
        positions: usize,
        treasure: usize,
        factions: usize,
    },

    /// A raw faction label below -1.
    #[error("invalid faction label {raw} on island {index}")]
    InvalidFactionLabel { index: usize, raw: i32 },
}

/// Errors from building or querying a territory map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerritoryError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A neighbor query hit an empty index, or an insert collided.
    #[error("neighbor index: {0}")]
    Index(#[from] SpatialError),

    /// A per-faction table was addressed past its capacity.
    #[error("faction {faction} out of range (faction count {faction_count})")]
    FactionOutOfRange {
        faction: FactionId,
        faction_count: usize,
    },
}

impl TerritoryError {
    /// True when a neighbor query ran against an empty index.
    pub fn is_index_exhausted(&self) -> bool {
        matches!(self, TerritoryError::Index(SpatialError::Exhausted { .. }))
    }
}
