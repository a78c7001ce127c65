//! Core domain: core run flow systems and setup.

use bevy::prelude::*;

use crate::core::state::GameState;

pub(crate) fn transition_to_playing(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Playing);
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
