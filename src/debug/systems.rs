//! Debug domain: debug hotkeys and the hitbox overlay.

use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::render::Viewport;
use crate::run::RunWorld;

const HITBOX: Color = Color::srgb(1.0, 0.0, 1.0);

/// F1 hitboxes, F2 warp to the arena approach, F3 full heal.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    world: Option<ResMut<RunWorld>>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_hitboxes = !debug_state.show_hitboxes;
        info!(
            "[DEBUG] Hitboxes {}",
            if debug_state.show_hitboxes { "ON" } else { "OFF" }
        );
    }

    let Some(mut world) = world else {
        return;
    };

    if keyboard.just_pressed(KeyCode::F2) {
        world.warp_near_arena();
        info!("[DEBUG] Warped to x={}", world.player.x);
    }

    if keyboard.just_pressed(KeyCode::F3) {
        world.restore_health();
        info!("[DEBUG] Full heal");
    }
}

pub(crate) fn draw_hitboxes(world: Res<RunWorld>, mut gizmos: Gizmos) {
    let view = Viewport::new(&world);
    view.rect(&mut gizmos, &world.player.bounds(), HITBOX);
    for enemy in world.enemies.iter().filter(|e| e.alive) {
        view.rect(&mut gizmos, &enemy.bounds(), HITBOX);
    }
    if let Some(boss) = world.boss.as_ref().filter(|b| b.is_alive()) {
        view.rect(&mut gizmos, &boss.bounds(), HITBOX);
        for minion in boss.minions() {
            view.rect(&mut gizmos, &minion.bounds(), HITBOX);
        }
    }
    for bullet in &world.bullets {
        view.rect(&mut gizmos, &bullet.shot.bounds(), HITBOX);
    }
}
