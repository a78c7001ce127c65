//! Core domain: shared resources for run configuration.

use bevy::prelude::*;
use rand::Rng;

/// Environment variable pinning the run seed.
pub const SEED_ENV: &str = "CUBE_SEED";
/// Environment variable selecting the starting level id.
pub const LEVEL_ENV: &str = "CUBE_LEVEL";

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u64,
    /// Level to play; `None` picks the first registered level.
    pub level_id: Option<String>,
    /// A seed given on the command line is reused for every run.
    pub fixed_seed: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        let pinned = std::env::var(SEED_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok());
        Self {
            seed: pinned.unwrap_or_else(|| rand::rng().random()),
            level_id: std::env::var(LEVEL_ENV).ok().filter(|id| !id.is_empty()),
            fixed_seed: pinned.is_some(),
        }
    }
}

impl RunConfig {
    /// Rolls a fresh seed unless one was pinned.
    pub fn reseed(&mut self) {
        if !self.fixed_seed {
            self.seed = rand::rng().random();
        }
    }
}
