//! UI domain: in-run HUD elements and end-of-run overlays.

mod hud_boss;
mod hud_player;
mod hud_wallet;
mod overlay;

use bevy::prelude::*;

use crate::core::GameState;
use crate::run::RunWorld;
use crate::ui::hud_boss::{cleanup_boss_healthbar, spawn_boss_healthbar, update_boss_healthbar};
use crate::ui::hud_player::{spawn_player_hud, update_player_hud};
use crate::ui::hud_wallet::{spawn_wallet_hud, update_wallet_hud};
use crate::ui::overlay::{
    despawn_overlays, spawn_death_screen, spawn_level_complete_screen, spawn_pause_screen,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_player_hud, spawn_wallet_hud))
            .add_systems(OnEnter(GameState::Paused), spawn_pause_screen)
            .add_systems(OnEnter(GameState::Playing), despawn_overlays)
            .add_systems(
                Update,
                (
                    update_player_hud,
                    update_wallet_hud,
                    spawn_boss_healthbar,
                    update_boss_healthbar,
                )
                    .run_if(resource_exists::<RunWorld>),
            )
            .add_systems(
                Update,
                (
                    cleanup_boss_healthbar,
                    spawn_death_screen,
                    spawn_level_complete_screen,
                ),
            );
    }
}
