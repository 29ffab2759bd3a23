//! Property-based tests for the neighbor indices.
//!
//! The k-d tree must agree exactly with the exhaustive scan, whatever the
//! insertion order or build strategy.

use archipelago_spatial::{GridPosition, KdTree, LinearIndex, NeighborIndex};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ===========================================================================
// Generators
// ===========================================================================

/// Distinct positions inside a small square so collisions and ties are common.
fn arb_positions(max_len: usize, extent: i32) -> impl Strategy<Value = Vec<GridPosition>> {
    proptest::collection::btree_set((-extent..=extent, -extent..=extent), 1..=max_len).prop_map(
        |set: BTreeSet<(i32, i32)>| {
            set.into_iter()
                .map(|(x, y)| GridPosition::new(x, y))
                .collect()
        },
    )
}

fn arb_query(extent: i32) -> impl Strategy<Value = GridPosition> {
    (-extent - 3..=extent + 3, -extent - 3..=extent + 3).prop_map(|(x, y)| GridPosition::new(x, y))
}

/// A coordinate at either end of the `i32` range or near the origin.
fn arb_extreme_coord() -> impl Strategy<Value = i32> {
    prop_oneof![
        Just(i32::MIN),
        Just(i32::MIN + 1),
        Just(i32::MAX - 1),
        Just(i32::MAX),
        -3..=3i32,
    ]
}

/// Distinct positions mixing the `i32` extremes with small coordinates.
fn arb_extreme_positions(max_len: usize) -> impl Strategy<Value = Vec<GridPosition>> {
    proptest::collection::btree_set((arb_extreme_coord(), arb_extreme_coord()), 1..=max_len).prop_map(
        |set: BTreeSet<(i32, i32)>| {
            set.into_iter()
                .map(|(x, y)| GridPosition::new(x, y))
                .collect()
        },
    )
}

fn collect(found: Vec<&GridPosition>) -> Vec<GridPosition> {
    found.into_iter().copied().collect()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Incremental tree, bulk-built tree and linear scan return identical lists.
    #[test]
    fn tree_matches_linear_scan(
        points in arb_positions(60, 8),
        query in arb_query(8),
        k in 1..12usize,
    ) {
        let mut incremental = KdTree::new();
        let mut linear = LinearIndex::new();
        for &p in &points {
            incremental.insert(p).unwrap();
            linear.insert(p).unwrap();
        }
        let bulk = KdTree::from_items(points.clone()).unwrap();

        let expected = collect(linear.k_nearest(query, k).unwrap());
        prop_assert_eq!(collect(incremental.k_nearest(query, k).unwrap()), expected.clone());
        prop_assert_eq!(collect(bulk.k_nearest(query, k).unwrap()), expected);
    }

    /// Results are sorted by distance and never exceed k or the index size.
    #[test]
    fn results_sorted_and_bounded(
        points in arb_positions(40, 20),
        query in arb_query(20),
        k in 1..50usize,
    ) {
        let tree = KdTree::from_items(points.clone()).unwrap();
        let found = collect(tree.k_nearest(query, k).unwrap());
        prop_assert_eq!(found.len(), k.min(points.len()));
        for pair in found.windows(2) {
            prop_assert!(query.manhattan_distance(&pair[0]) <= query.manhattan_distance(&pair[1]));
        }
    }

    /// Coordinates at the edges of the `i32` range rank exactly.
    #[test]
    fn extreme_coordinates_match_linear_scan(
        points in arb_extreme_positions(40),
        query in (arb_extreme_coord(), arb_extreme_coord()),
        k in 1..10usize,
    ) {
        let query = GridPosition::new(query.0, query.1);
        let tree = KdTree::from_items(points.clone()).unwrap();
        let mut linear = LinearIndex::new();
        linear.insert_all(points).unwrap();
        prop_assert_eq!(
            collect(tree.k_nearest(query, k).unwrap()),
            collect(linear.k_nearest(query, k).unwrap())
        );
    }
}
