//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::LevelRegistry;
use super::tuning::SimTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse a RON string containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(file_name: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Parse a single RON struct (not wrapped in DataFile).
pub fn parse_single<T>(file_name: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load every level from `levels.ron` under `base_path`.
pub fn load_levels(base_path: &Path) -> Result<LevelRegistry, ContentLoadError> {
    let path = base_path.join("levels.ron");
    let contents = read_file(&path)?;
    let levels = parse_data_file::<LevelDef>(&path.display().to_string(), &contents)?;
    Ok(LevelRegistry::from_levels(levels))
}

/// Load an optional single-struct file. `Ok(None)` when the file does not exist.
pub fn load_optional<T>(base_path: &Path, file: &str) -> Result<Option<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let path = base_path.join(file);
    if !path.exists() {
        return Ok(None);
    }
    let contents = read_file(&path)?;
    parse_single(&path.display().to_string(), &contents).map(Some)
}

/// Load tuning overrides from `tuning.ron`.
pub fn load_tuning(base_path: &Path) -> Result<Option<SimTuning>, ContentLoadError> {
    load_optional(base_path, "tuning.ron")
}

/// Load pre-activated upgrades from `upgrades.ron`.
pub fn load_upgrades(base_path: &Path) -> Result<Option<StartingUpgrades>, ContentLoadError> {
    load_optional(base_path, "upgrades.ron")
}
