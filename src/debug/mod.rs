//! Debug domain: hotkeys for fast iteration (`dev-tools` feature).
//!
//! Features:
//! - F1 toggles the hitbox overlay
//! - F2 warps the player to just before the arena
//! - F3 restores full health

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

use crate::debug::systems::{draw_hitboxes, handle_debug_hotkeys};
use crate::run::RunWorld;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, handle_debug_hotkeys)
            .add_systems(
                Update,
                draw_hitboxes
                    .run_if(resource_exists::<RunWorld>)
                    .run_if(|state: Res<DebugState>| state.show_hitboxes),
            );
    }
}
