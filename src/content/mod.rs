//! Content domain: level data, tuning and starting upgrades loaded from RON.

mod data;
mod loader;
mod registry;
mod tuning;
mod validation;


pub use data::{
    Axis, BossDef, BossType, CorridorDef, EnemyDef, EnemyKind, FallingBlockDef, LevelDef,
    MotionDef, ObstacleDef, ObstacleKind, PendulumDef, PowerupKind, StartingUpgrades,
};
pub use registry::{LevelRegistry, builtin_level};
pub use tuning::SimTuning;

use bevy::prelude::*;
use std::path::Path;

use crate::content::loader::{load_levels, load_tuning, load_upgrades};
use crate::content::validation::validate_levels;

/// Directory holding levels.ron, tuning.ron and upgrades.ron.
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<SimTuning>()
            .init_resource::<StartingUpgrades>()
            .add_systems(Startup, load_content);
    }
}

/// Load all content at startup, falling back to built-in data on failure.
fn load_content(
    mut registry: ResMut<LevelRegistry>,
    mut tuning: ResMut<SimTuning>,
    mut upgrades: ResMut<StartingUpgrades>,
) {
    let base = Path::new(DATA_DIR);

    *registry = match load_levels(base) {
        Ok(loaded) if !loaded.is_empty() => loaded,
        Ok(_) => {
            warn!("No levels found in {}, using built-in level", DATA_DIR);
            LevelRegistry::from_levels(vec![builtin_level()])
        }
        Err(e) => {
            error!("{}", e);
            LevelRegistry::from_levels(vec![builtin_level()])
        }
    };

    let levels: Vec<LevelDef> = registry
        .order
        .iter()
        .filter_map(|id| registry.get(id).cloned())
        .collect();
    for problem in validate_levels(&levels) {
        warn!("{}", problem);
    }
    info!("{}", registry.summary());

    match load_tuning(base) {
        Ok(Some(loaded)) => {
            *tuning = loaded;
            info!("Loaded tuning overrides from {}/tuning.ron", DATA_DIR);
        }
        Ok(None) => warn!("No tuning.ron found, using default tuning"),
        Err(e) => warn!("{}; using default tuning", e),
    }

    match load_upgrades(base) {
        Ok(Some(loaded)) => {
            debug!("Starting upgrades: {:?}", loaded);
            *upgrades = loaded;
        }
        Ok(None) => {}
        Err(e) => warn!("{}; starting without upgrades", e),
    }
}
