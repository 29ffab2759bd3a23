//! Dataset files on disk: RON, TOML or JSON, picked by extension, loaded
//! straight into a [`TerritoryMap`].

use crate::schema::ArchipelagoData;
use archipelago_core::{TerritoryError, TerritoryMap};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Base name of the dataset file inside a dataset directory.
pub const DATASET_BASE_NAME: &str = "islands";

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("no {base}.ron, {base}.toml or {base}.json in {dir}")]
    MissingRequired { base: String, dir: PathBuf },

    #[error("{file}: extension is not ron, toml or json")]
    UnsupportedFormat { file: PathBuf },

    /// A dataset directory holds the same dataset in more than one format.
    #[error("ambiguous dataset: both {a} and {b} exist")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    #[error("invalid dataset: {0}")]
    Territory(#[from] TerritoryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// On-disk encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }

    pub fn from_path(path: &Path) -> Result<Format, DataLoadError> {
        let ext = path.extension().and_then(|e| e.to_str());
        Format::ALL
            .into_iter()
            .find(|f| Some(f.extension()) == ext)
            .ok_or_else(|| DataLoadError::UnsupportedFormat {
                file: path.to_path_buf(),
            })
    }

    fn parse<T: DeserializeOwned>(self, path: &Path, content: &str) -> Result<T, DataLoadError> {
        match self {
            Format::Ron => ron::from_str(content).map_err(|e| parse_error(path, e)),
            Format::Json => serde_json::from_str(content).map_err(|e| parse_error(path, e)),
            Format::Toml => toml::from_str(content).map_err(|e| parse_error(path, e)),
        }
    }

    fn render<T: Serialize>(self, path: &Path, value: &T) -> Result<String, DataLoadError> {
        match self {
            Format::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| parse_error(path, e)),
            Format::Json => serde_json::to_string_pretty(value).map_err(|e| parse_error(path, e)),
            Format::Toml => toml::to_string_pretty(value).map_err(|e| parse_error(path, e)),
        }
    }
}

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read and decode a file in the format its extension names.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    format.parse(path, &content)
}

/// Encode a value in the format its extension names and write it.
pub fn serialize_file<T: Serialize>(path: &Path, value: &T) -> Result<(), DataLoadError> {
    let content = Format::from_path(path)?.render(path, value)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a dataset file and build its territory map.
pub fn load_archipelago(path: &Path) -> Result<TerritoryMap, DataLoadError> {
    let data: ArchipelagoData = deserialize_file(path)?;
    log::debug!("loaded {} islands from {}", data.islands.len(), path.display());
    Ok(data.into_territory_map()?)
}

/// Load the single `islands.{ron,toml,json}` in `dir`.
///
/// Exactly one of the three may exist; two or more is
/// [`DataLoadError::ConflictingFormats`].
pub fn load_archipelago_dir(dir: &Path) -> Result<TerritoryMap, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|f| dir.join(format!("{DATASET_BASE_NAME}.{}", f.extension())))
        .filter(|p| p.is_file());

    let path = present.next().ok_or_else(|| DataLoadError::MissingRequired {
        base: DATASET_BASE_NAME.to_string(),
        dir: dir.to_path_buf(),
    })?;
    if let Some(other) = present.next() {
        return Err(DataLoadError::ConflictingFormats { a: path, b: other });
    }
    load_archipelago(&path)
}

/// Write a dataset in the format matching the file extension.
pub fn save_archipelago(path: &Path, data: &ArchipelagoData) -> Result<(), DataLoadError> {
    serialize_file(path, data)?;
    log::debug!("saved {} islands to {}", data.islands.len(), path.display());
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
