pub mod generator;
pub mod loader;
pub mod rng;
pub mod schema;

pub use generator::{GenerateError, GeneratorConfig, generate};
pub use loader::{DataLoadError, load_archipelago, load_archipelago_dir, save_archipelago};
pub use schema::{ArchipelagoData, IslandData};
