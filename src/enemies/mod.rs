//! Enemies domain: the four level enemies and their shared update/damage contract.


use bevy::prelude::*;

use crate::content::{EnemyDef, EnemyKind, SimTuning};
use crate::physics::{Aabb, Countdown};

pub const ENEMY_SIZE: f32 = 30.0;
const PATROL_SPEED: f32 = 1.5;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub hp: i32,
    pub alive: bool,
    pub origin: Vec2,
    pub patrol_range: f32,
    pub direction: f32,
    pub shoot_cooldown: Countdown,
    cooldown_frames: u32,
    shoot_range: f32,
    player_in_range: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, patrol_range: f32, tuning: &SimTuning) -> Self {
        let hp = match kind {
            EnemyKind::Armored => 2,
            _ => 1,
        };
        Self {
            kind,
            x,
            y,
            size: ENEMY_SIZE,
            hp,
            alive: true,
            origin: Vec2::new(x, y),
            patrol_range: patrol_range.max(0.0),
            direction: 1.0,
            shoot_cooldown: Countdown::new(tuning.shooter_cooldown),
            cooldown_frames: tuning.shooter_cooldown,
            shoot_range: tuning.shooter_range,
            player_in_range: false,
        }
    }

    pub fn from_def(def: &EnemyDef, tuning: &SimTuning) -> Self {
        Self::new(def.kind, def.x, def.y, def.patrol_range, tuning)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Patrol and shooter cooldown. No-op once dead.
    pub fn update(&mut self, player_x: f32) {
        if !self.alive {
            return;
        }

        if self.patrol_range > 0.0 {
            match self.kind {
                EnemyKind::Flier => {
                    self.y += PATROL_SPEED * self.direction;
                    if (self.y - self.origin.y).abs() >= self.patrol_range {
                        self.y = self.origin.y + self.patrol_range * self.direction;
                        self.direction = -self.direction;
                    }
                }
                _ => {
                    self.x += PATROL_SPEED * self.direction;
                    if (self.x - self.origin.x).abs() >= self.patrol_range {
                        self.x = self.origin.x + self.patrol_range * self.direction;
                        self.direction = -self.direction;
                    }
                }
            }
        }

        if self.kind == EnemyKind::Shooter {
            self.shoot_cooldown.tick();
            self.player_in_range = (self.center().x - player_x).abs() <= self.shoot_range;
        }
    }

    /// True at most once per cooldown window; asking restarts the cooldown.
    pub fn should_shoot(&mut self) -> bool {
        if !self.alive
            || self.kind != EnemyKind::Shooter
            || !self.player_in_range
            || self.shoot_cooldown.is_active()
        {
            return false;
        }
        self.shoot_cooldown.start(self.cooldown_frames);
        true
    }

    /// Returns true exactly once, on the hit that kills.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.alive = false;
            true
        } else {
            false
        }
    }
}
