//! Gameplay constants shared by the whole simulation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Every tunable number the simulation reads. Distances are world pixels (y-down),
/// durations are frames at the nominal 60 Hz tick.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimTuning {
    // World
    pub ground_y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub arena_width: f32,

    // Player body
    pub player_size: f32,
    pub player_start_x: f32,
    pub player_max_health: i32,

    // Locomotion
    pub gravity: f32,
    pub jump_velocity: f32,
    pub fly_force: f32,
    pub fly_max_ascent: f32,
    pub base_speed: f32,
    pub speed_bonus_distance: f32,
    pub max_speed_bonus: f32,
    pub arena_move_speed: f32,
    pub rocket_speed_mult: f32,
    pub corridor_speed_mult: f32,
    pub flight_accel: f32,
    pub flight_max_vertical: f32,
    pub stomp_bounce: f32,
    pub cage_bounce: f32,
    pub spin_per_frame: f32,

    // Timed effects
    pub invincibility_frames: u32,
    pub shield_frames: u32,
    pub shield_hit_cost: u32,
    pub rocket_frames: u32,
    pub magnet_frames: u32,
    pub super_bullet_frames: u32,
    pub squash_frames: u32,

    // Weapons
    pub shoot_cooldown: u32,
    pub bullet_speed: f32,
    pub bomb_gravity: f32,
    pub bomb_radius: f32,
    pub bomb_damage: i32,
    pub enemy_bullet_speed: f32,
    pub shooter_cooldown: u32,
    pub shooter_range: f32,

    // Pickups
    pub magnet_radius: f32,
    pub magnet_pull: f32,

    // Hazards
    pub falling_block_trigger: f32,
    pub falling_block_warning: u32,
    pub falling_block_gravity: f32,

    // Boss flow
    pub boss_invincibility_frames: u32,
    pub boss_intro_frames: u32,
    pub victory_delay_frames: u32,

    // Camera
    pub camera_follow_offset: f32,
    pub camera_smoothing: f32,
}

impl Default for SimTuning {
    fn default() -> Self {
        Self {
            ground_y: 400.0,
            viewport_width: 800.0,
            viewport_height: 450.0,
            arena_width: 800.0,

            player_size: 30.0,
            player_start_x: 100.0,
            player_max_health: 3,

            gravity: 0.6,
            jump_velocity: 11.5,
            fly_force: 0.5,
            fly_max_ascent: 5.0,
            base_speed: 5.0,
            speed_bonus_distance: 6000.0,
            max_speed_bonus: 3.0,
            arena_move_speed: 5.0,
            rocket_speed_mult: 1.6,
            corridor_speed_mult: 1.25,
            flight_accel: 0.8,
            flight_max_vertical: 6.0,
            stomp_bounce: 10.0,
            cage_bounce: 9.0,
            spin_per_frame: 0.1,

            invincibility_frames: 60,
            shield_frames: 600,
            shield_hit_cost: 120,
            rocket_frames: 300,
            magnet_frames: 600,
            super_bullet_frames: 600,
            squash_frames: 8,

            shoot_cooldown: 15,
            bullet_speed: 12.0,
            bomb_gravity: 0.5,
            bomb_radius: 130.0,
            bomb_damage: 2,
            enemy_bullet_speed: 5.0,
            shooter_cooldown: 90,
            shooter_range: 500.0,

            magnet_radius: 220.0,
            magnet_pull: 8.0,

            falling_block_trigger: 160.0,
            falling_block_warning: 30,
            falling_block_gravity: 0.8,

            boss_invincibility_frames: 30,
            boss_intro_frames: 120,
            victory_delay_frames: 150,

            camera_follow_offset: 150.0,
            camera_smoothing: 0.15,
        }
    }
}

impl SimTuning {
    /// Run speed for a given distance travelled: `base + min(distance / 6000, bonus cap)`.
    pub fn run_speed(&self, distance: f32) -> f32 {
        self.base_speed + (distance.max(0.0) / self.speed_bonus_distance).min(self.max_speed_bonus)
    }
}
