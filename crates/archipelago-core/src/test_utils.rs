//! Shared test fixtures for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::id::{FactionId, UNCLAIMED};
use crate::territory::TerritoryMap;
use archipelago_spatial::GridPosition;

// ===========================================================================
// Position helpers
// ===========================================================================

pub fn pos(x: i32, y: i32) -> GridPosition {
    GridPosition::new(x, y)
}

pub fn positions(points: &[(i32, i32)]) -> Vec<GridPosition> {
    points.iter().map(|&(x, y)| pos(x, y)).collect()
}

pub fn faction(id: u32) -> FactionId {
    FactionId(id)
}

// ===========================================================================
// Fixtures
// ===========================================================================

/// Build a map from `(x, y, treasure, raw_faction)` rows.
pub fn map_from_rows(rows: &[(i32, i32, f64, i32)]) -> TerritoryMap {
    let positions = rows.iter().map(|&(x, y, _, _)| pos(x, y)).collect();
    let treasure = rows.iter().map(|&(_, _, t, _)| t).collect();
    let raw: Vec<i32> = rows.iter().map(|&(_, _, _, f)| f).collect();
    TerritoryMap::from_raw(positions, treasure, &raw).expect("fixture rows must be valid")
}

/// Three islands on a line: faction 0, faction 1 and an unclaimed island
/// between them at equal distance from both.
pub fn line_map() -> TerritoryMap {
    map_from_rows(&[(0, 0, 5.0, 0), (2, 0, 7.0, 1), (1, 0, 0.0, UNCLAIMED)])
}

/// Fifteen islands, five factions, eight unclaimed islands.
pub const SAMPLE_ROWS: [(i32, i32, f64, i32); 15] = [
    (0, 0, 0.0, 0),
    (0, 3, 1.0, UNCLAIMED),
    (0, 5, 2.0, UNCLAIMED),
    (0, 6, 3.0, 1),
    (1, 2, 4.0, UNCLAIMED),
    (1, 4, 5.0, UNCLAIMED),
    (1, 5, 6.0, 2),
    (2, 0, 7.0, 1),
    (2, 3, 8.0, UNCLAIMED),
    (2, 5, 9.0, UNCLAIMED),
    (2, 9, 10.0, 4),
    (3, 3, 11.0, UNCLAIMED),
    (3, 5, 12.0, UNCLAIMED),
    (3, 6, 13.0, 2),
    (4, 3, 14.0, 3),
];

pub fn sample_map() -> TerritoryMap {
    map_from_rows(&SAMPLE_ROWS)
}

/// A `width` x `height` block of islands spaced `step` apart.
///
/// Faction labels cycle through `faction_count` ids, and every
/// `unclaimed_every`-th island is left unclaimed (0 disables that). Island 0
/// is always claimed.
pub fn lattice_rows(
    width: i32,
    height: i32,
    step: i32,
    faction_count: i32,
    unclaimed_every: usize,
) -> Vec<(i32, i32, f64, i32)> {
    let mut rows = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let i = rows.len();
            let raw = if unclaimed_every > 0 && i > 0 && i % unclaimed_every == 0 {
                UNCLAIMED
            } else {
                (i as i32 * 7 + y) % faction_count
            };
            rows.push((x * step, y * step, (i % 10) as f64, raw));
        }
    }
    rows
}

pub fn lattice_map(width: i32, height: i32, step: i32, faction_count: i32) -> TerritoryMap {
    map_from_rows(&lattice_rows(width, height, step, faction_count, 3))
}
