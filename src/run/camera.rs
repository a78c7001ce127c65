//! Run domain: smoothed follow camera that locks onto the boss arena.

use bevy::prelude::*;
use serde::Serialize;

use crate::content::SimTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameCamera {
    /// World x of the viewport's left edge.
    pub x: f32,
    /// Left edge of the arena once locked.
    pub locked_at: Option<f32>,
    pub shake: f32,
    frame: u64,
    follow_offset: f32,
    smoothing: f32,
}

impl GameCamera {
    pub fn new(tuning: &SimTuning) -> Self {
        Self {
            x: 0.0,
            locked_at: None,
            shake: 0.0,
            frame: 0,
            follow_offset: tuning.camera_follow_offset,
            smoothing: tuning.camera_smoothing,
        }
    }

    /// Eases toward keeping the player `follow_offset` px from the left edge, or toward the arena
    /// once locked. Never scrolls back past the start of the level.
    pub fn update(&mut self, player_x: f32) {
        self.frame = self.frame.wrapping_add(1);
        let target = match self.locked_at {
            Some(arena_x) => arena_x,
            None => (player_x - self.follow_offset).max(0.0),
        };
        self.x += (target - self.x) * self.smoothing;
    }

    pub fn lock_to_arena(&mut self, arena_x: f32) {
        self.locked_at = Some(arena_x);
    }

    pub fn is_locked(&self) -> bool {
        self.locked_at.is_some()
    }

    pub fn set_shake(&mut self, magnitude: f32) {
        self.shake = magnitude.max(0.0);
    }

    /// Deterministic jitter derived from the frame counter.
    pub fn shake_offset(&self) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        let t = self.frame as f32;
        Vec2::new((t * 1.7).sin(), (t * 2.3).cos()) * self.shake
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.x, world.y) + self.shake_offset()
    }
}
