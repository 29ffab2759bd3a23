//! Dataset generation example: build a random archipelago and save it.
//!
//! Writes the dataset to the given path (format chosen by extension), then
//! loads it back and prints a short summary.
//!
//! Run with: `cargo run -p archipelago-examples --example generate_dataset out.ron [count] [seed]`

use archipelago_core::report::TerritoryReport;
use archipelago_data::{GeneratorConfig, generate, load_archipelago, save_archipelago};
use std::path::PathBuf;

fn main() {
    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "islands.ron".to_string()));
    let island_count: usize = args.next().map_or(500, |s| s.parse().unwrap());
    let seed: u64 = args.next().map_or(1, |s| s.parse().unwrap());

    // Roughly one island per four cells.
    let extent = ((island_count * 4) as f64).sqrt().ceil() as u32;
    let cfg = GeneratorConfig {
        island_count,
        extent,
        seed,
        ..GeneratorConfig::default()
    };

    let data = generate(&cfg).unwrap();
    save_archipelago(&path, &data).unwrap();
    println!("Wrote {} islands to {}", data.islands.len(), path.display());

    let map = load_archipelago(&path).unwrap();
    let report = TerritoryReport::compute(&map).unwrap();
    println!("Factions: {}", report.faction_count);
    println!("Most colonies: {}", report.faction_with_most_colonies);
    println!("Rival factions: {}", report.factions_with_rival_neighbors.len());
    println!("Treasure sites: {}", report.treasure_sites.len());
}
