use crate::error::InvalidInputError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw faction label meaning "unclaimed" in input arrays.
pub const UNCLAIMED: i32 = -1;

/// Identifies a faction. Cheap to copy and compare; lower ids win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u32);

impl FactionId {
    /// Convert a raw input label. `-1` is unclaimed, any other negative
    /// value is rejected. `index` is the island the label belongs to.
    pub fn from_raw(raw: i32, index: usize) -> Result<Option<FactionId>, InvalidInputError> {
        match raw {
            UNCLAIMED => Ok(None),
            r if r >= 0 => Ok(Some(FactionId(r as u32))),
            r => Err(InvalidInputError::InvalidFactionLabel { index, raw: r }),
        }
    }

    /// Convert a whole column of raw labels.
    pub fn from_raw_slice(raw: &[i32]) -> Result<Vec<Option<FactionId>>, InvalidInputError> {
        raw.iter()
            .enumerate()
            .map(|(index, &r)| Self::from_raw(r, index))
            .collect()
    }

    /// Position of this faction in per-faction tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
