//! Core domain: game states, run configuration and terminal run events.

mod events;
mod resources;
mod state;
mod systems;

pub use events::{LevelCompletedEvent, PlayerDiedEvent};
pub use resources::{LEVEL_ENV, RunConfig, SEED_ENV};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{setup_camera, transition_to_playing};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<LevelCompletedEvent>()
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Boot), transition_to_playing);
    }
}
