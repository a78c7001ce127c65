//! Run domain: one playthrough of a level, stepped at a fixed rate.
//!
//! `RunWorld` owns every entity of a run as plain data and advances it with `step`. The Bevy
//! systems here only feed it input, forward its outcome and manage its lifetime.

pub mod camera;
pub mod events;
pub mod input;
pub mod particles;
mod step;
mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use camera::GameCamera;
pub use particles::ParticleTint;
pub use world::{BossPhase, RunWorld};

use bevy::prelude::*;
use std::time::Duration;

use crate::core::GameState;
use crate::run::input::{InputState, sample_keyboard};
use crate::run::systems::{handle_restart, start_run, step_run, teardown_run, toggle_pause};

/// Nominal simulation rate.
pub const TICK_HZ: f64 = 60.0;

pub struct RunPlugin;

impl Plugin for RunPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .init_resource::<InputState>()
            .add_systems(Startup, clamp_virtual_delta)
            .add_systems(OnEnter(GameState::Playing), start_run)
            .add_systems(OnEnter(GameState::GameOver), teardown_run)
            .add_systems(OnEnter(GameState::LevelComplete), teardown_run)
            .add_systems(
                FixedUpdate,
                step_run
                    .run_if(in_state(GameState::Playing))
                    .run_if(resource_exists::<RunWorld>),
            )
            .add_systems(
                Update,
                (sample_keyboard, toggle_pause, handle_restart).chain(),
            );
    }
}

/// A long stall produces at most one tick instead of a burst of catch-up frames.
fn clamp_virtual_delta(mut time: ResMut<Time<Virtual>>) {
    time.set_max_delta(Duration::from_secs_f64(1.0 / TICK_HZ));
}
