//! Player domain: body, movement modes, timed buffs, inventory and damage.

mod inventory;


pub use inventory::{INVENTORY_SLOTS, Inventory};

use bevy::prelude::*;
use std::collections::VecDeque;

use crate::content::{PowerupKind, SimTuning, StartingUpgrades};
use crate::physics::{Aabb, Countdown};

/// Cosmetic trail length in positions.
const TRAIL_LENGTH: usize = 8;

/// Frame counts copied from tuning when the player is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDurations {
    pub invincibility: u32,
    pub shield: u32,
    pub shield_hit_cost: u32,
    pub rocket: u32,
    pub magnet: u32,
    pub super_bullet: u32,
    pub squash: u32,
    pub shoot_cooldown: u32,
}

impl EffectDurations {
    pub fn from_tuning(tuning: &SimTuning) -> Self {
        Self {
            invincibility: tuning.invincibility_frames,
            shield: tuning.shield_frames,
            shield_hit_cost: tuning.shield_hit_cost,
            rocket: tuning.rocket_frames,
            magnet: tuning.magnet_frames,
            super_bullet: tuning.super_bullet_frames,
            squash: tuning.squash_frames,
            shoot_cooldown: tuning.shoot_cooldown,
        }
    }
}

/// What a call to [`Player::take_damage`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Invincible, or already dead.
    Ignored,
    /// The shield soaked the hit and lost time instead.
    Absorbed,
    Hurt,
    /// Health reached zero on this hit. Returned at most once per player.
    Died,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub size: f32,
    pub health: i32,
    pub max_health: i32,
    pub inventory: Inventory,

    pub shield: Countdown,
    pub rocket: Countdown,
    pub magnet: Countdown,
    pub super_bullet: Countdown,
    pub invincibility: Countdown,
    pub shoot_cooldown: Countdown,
    /// Cosmetic squash after landing.
    pub squash: Countdown,

    pub on_ground: bool,
    pub corridor_mode: bool,
    pub has_double_jump: bool,
    pub double_jump_available: bool,
    pub dead: bool,

    /// Cosmetic spin, grows monotonically while running on the ground.
    pub rotation: f32,
    pub trail: VecDeque<Vec2>,
    pub durations: EffectDurations,
}

impl Player {
    pub fn new(tuning: &SimTuning, upgrades: &StartingUpgrades) -> Self {
        let max_health = (tuning.player_max_health + upgrades.bonus_max_health).max(1);
        Self {
            x: tuning.player_start_x,
            y: tuning.ground_y - tuning.player_size,
            vy: 0.0,
            size: tuning.player_size,
            health: max_health,
            max_health,
            inventory: Inventory::default(),
            shield: Countdown::default(),
            rocket: Countdown::default(),
            magnet: Countdown::new(upgrades.magnet_frames),
            super_bullet: Countdown::new(upgrades.super_bullet_frames),
            invincibility: Countdown::default(),
            shoot_cooldown: Countdown::default(),
            squash: Countdown::default(),
            on_ground: true,
            corridor_mode: false,
            has_double_jump: upgrades.double_jump,
            double_jump_available: upgrades.double_jump,
            dead: false,
            rotation: 0.0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
            durations: EffectDurations::from_tuning(tuning),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    /// Rocket power-up or corridor: forced scroll, steered vertical, no gravity.
    pub fn is_flying(&self) -> bool {
        self.rocket.is_active() || self.corridor_mode
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    // ------------------------------------------------------------------
    // Movement transitions
    // ------------------------------------------------------------------

    /// Ground jump. Refreshes double-jump availability for the coming air time.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = -jump_velocity;
        self.on_ground = false;
        self.double_jump_available = self.has_double_jump;
        true
    }

    /// Second impulse in the air, once per airtime.
    pub fn double_jump(&mut self, jump_velocity: f32) -> bool {
        if self.on_ground || !self.has_double_jump || !self.double_jump_available {
            return false;
        }
        self.vy = -jump_velocity;
        self.double_jump_available = false;
        true
    }

    /// Held-jump float: a small upward push that never exceeds `max_ascent`.
    pub fn fly(&mut self, force: f32, max_ascent: f32) {
        if self.on_ground || self.vy <= -max_ascent {
            return;
        }
        self.vy = (self.vy - force).max(-max_ascent);
    }

    pub fn land(&mut self) {
        self.on_ground = true;
        self.vy = 0.0;
        self.double_jump_available = self.has_double_jump;
    }

    /// Direct vertical control while flying, clamped between `ceiling` and `floor` (top edge).
    pub fn steer_flight(&mut self, up: bool, accel: f32, max_vertical: f32, ceiling: f32, floor: f32) {
        self.vy = if up {
            (self.vy - accel).max(-max_vertical)
        } else {
            (self.vy + accel).min(max_vertical)
        };
        self.y += self.vy;
        if self.y < ceiling {
            self.y = ceiling;
            self.vy = 0.0;
        } else if self.y > floor {
            self.y = floor;
            self.vy = 0.0;
        }
        self.on_ground = false;
    }

    pub fn bounce(&mut self, velocity: f32) {
        self.vy = -velocity;
        self.on_ground = false;
    }

    // ------------------------------------------------------------------
    // Damage
    // ------------------------------------------------------------------

    pub fn take_damage(&mut self, amount: i32) -> DamageResult {
        if self.dead || self.invincibility.is_active() {
            return DamageResult::Ignored;
        }
        if self.shield.is_active() {
            self.shield.drain(self.durations.shield_hit_cost);
            return DamageResult::Absorbed;
        }

        self.health = (self.health - amount).clamp(0, self.max_health);
        self.invincibility.start(self.durations.invincibility);
        if self.health == 0 {
            self.dead = true;
            DamageResult::Died
        } else {
            DamageResult::Hurt
        }
    }

    pub fn heal(&mut self, amount: i32) {
        if !self.dead {
            self.health = (self.health + amount).min(self.max_health);
        }
    }

    // ------------------------------------------------------------------
    // Power-ups
    // ------------------------------------------------------------------

    /// First-empty-slot insertion. A full inventory rejects the pickup.
    pub fn collect_powerup(&mut self, kind: PowerupKind) -> bool {
        self.inventory.insert(kind)
    }

    /// Empties `slot` and starts its effect. Bombs are returned for the caller to launch.
    pub fn use_powerup(&mut self, slot: usize) -> Option<PowerupKind> {
        let kind = self.inventory.take(slot)?;
        match kind {
            PowerupKind::Shield => self.shield.start(self.durations.shield),
            PowerupKind::Rocket => {
                self.rocket.start(self.durations.rocket);
                self.on_ground = false;
            }
            PowerupKind::Magnet => self.magnet.start(self.durations.magnet),
            PowerupKind::SuperBullet => self.super_bullet.start(self.durations.super_bullet),
            PowerupKind::Heart => self.heal(1),
            PowerupKind::Bomb => {}
        }
        Some(kind)
    }

    // ------------------------------------------------------------------
    // Per-frame bookkeeping
    // ------------------------------------------------------------------

    pub fn try_shoot(&mut self) -> bool {
        if self.shoot_cooldown.is_active() {
            return false;
        }
        self.shoot_cooldown.start(self.durations.shoot_cooldown);
        true
    }

    /// Independent countdowns, in a fixed order.
    pub fn tick_timers(&mut self) {
        self.shield.tick();
        self.rocket.tick();
        self.invincibility.tick();
        self.shoot_cooldown.tick();
        self.squash.tick();
        self.magnet.tick();
        self.super_bullet.tick();
    }

    pub fn trigger_squash(&mut self) {
        self.squash.start(self.durations.squash);
    }

    /// Spin while running and record the trail.
    pub fn advance_cosmetics(&mut self, spin: f32) {
        if self.on_ground && !self.is_flying() {
            self.rotation += spin;
        }
        if self.trail.len() == TRAIL_LENGTH {
            self.trail.pop_front();
        }
        self.trail.push_back(self.center());
    }
}
