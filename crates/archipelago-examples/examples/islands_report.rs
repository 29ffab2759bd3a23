//! Territory report example: every query over one island dataset.
//!
//! Without arguments it uses the built-in 15-island sample. Pass a dataset
//! file (`.ron`, `.toml` or `.json`) to report on that instead.
//!
//! Run with: `cargo run -p archipelago-examples --example islands_report [path]`

use archipelago_core::report::TerritoryReport;
use archipelago_core::test_utils::sample_map;
use archipelago_core::{GridPosition, TerritoryMap};
use archipelago_data::load_archipelago;
use std::path::Path;

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_sites(label: &str, sites: &[GridPosition]) {
    println!("{label} ({} sites):", sites.len());
    println!("  {}", join(sites));
}

fn main() {
    let map: TerritoryMap = match std::env::args().nth(1) {
        Some(path) => match load_archipelago(Path::new(&path)) {
            Ok(map) => map,
            Err(e) => {
                eprintln!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => sample_map(),
    };

    let report = TerritoryReport::compute(&map).unwrap();

    println!("=== Archipelago ===\n");
    println!("Islands: {}", map.island_count());
    println!("Inhabited: {}", map.inhabited_count());
    println!("Factions: {}\n", report.faction_count);

    println!("Faction with most colonies: {}", report.faction_with_most_colonies);
    println!("Controlling factions:");
    println!("  {}", join(&report.controlling_faction_ids));
    println!("Faction treasury:");
    println!("  {}", join(&report.faction_treasury));
    println!("Factions with rival neighbors:");
    println!("  {}\n", join(&report.factions_with_rival_neighbors));

    print_sites("Treasure sites (merge)", &report.treasure_sites);
    print_sites("Treasure sites (counting)", &report.treasure_sites_by_count);
    assert!(report.treasure_algorithms_agree());

    println!("\nTotal treasure: {}", report.total_treasure());
    println!("\n=== JSON ===\n");
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
