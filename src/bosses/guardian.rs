//! Guardian: hops toward the player and sends a ground shockwave out on every landing.

use bevy::prelude::*;

use super::{
    BOSS_CONTACT_DAMAGE, BossBehavior, BossContext, BossCore, HazardBox, advance_projectiles,
    projectile_hazards,
};
use crate::physics::{Countdown, Projectile};

const JUMP_INTERVAL: u32 = 120;
const JUMP_INTERVAL_ENRAGED: u32 = 80;
const JUMP_VELOCITY: f32 = 14.0;
const GRAVITY: f32 = 0.6;
const MAX_DRIFT: f32 = 4.0;
const SHOCKWAVE_GROWTH: f32 = 4.0;
const SHOCKWAVE_MAX_RADIUS: f32 = 300.0;
/// Half-width of the ring band that hurts a grounded player.
const SHOCKWAVE_TOLERANCE: f32 = 15.0;
const GROUND_SHOT_SPEED: f32 = 6.0;

/// Expanding ring along the ground, centered where the Guardian landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shockwave {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Shockwave {
    /// Hits a grounded player whose horizontal distance sits within the ring band.
    pub fn hits(&self, player_x: f32, player_on_ground: bool) -> bool {
        player_on_ground && ((player_x - self.x).abs() - self.radius).abs() < SHOCKWAVE_TOLERANCE
    }
}

#[derive(Debug, Clone)]
pub struct Guardian {
    pub jump_timer: Countdown,
    pub vx: f32,
    pub vy: f32,
    pub airborne: bool,
    pub shockwaves: Vec<Shockwave>,
    pub projectiles: Vec<Projectile>,
}

impl Guardian {
    pub fn new() -> Self {
        Self {
            jump_timer: Countdown::new(JUMP_INTERVAL),
            vx: 0.0,
            vy: 0.0,
            airborne: false,
            shockwaves: Vec::new(),
            projectiles: Vec::new(),
        }
    }

    fn interval(phase: u8) -> u32 {
        if phase >= 2 {
            JUMP_INTERVAL_ENRAGED
        } else {
            JUMP_INTERVAL
        }
    }

    fn land(&mut self, core: &mut BossCore, ground_y: f32) {
        core.y = ground_y - core.h;
        self.vy = 0.0;
        self.vx = 0.0;
        self.airborne = false;
        self.jump_timer.start(Self::interval(core.phase));

        let center_x = core.center().x;
        self.shockwaves.push(Shockwave {
            x: center_x,
            y: ground_y,
            radius: 0.0,
        });
        if core.phase >= 2 {
            for dir in [-1.0, 1.0] {
                self.projectiles.push(Projectile::new(
                    Vec2::new(center_x, ground_y - 10.0),
                    Vec2::new(GROUND_SHOT_SPEED * dir, 0.0),
                    Vec2::new(20.0, 20.0),
                    BOSS_CONTACT_DAMAGE,
                ));
            }
        }
    }
}

impl Default for Guardian {
    fn default() -> Self {
        Self::new()
    }
}

impl BossBehavior for Guardian {
    fn update(&mut self, core: &mut BossCore, ctx: &mut BossContext) {
        if self.airborne {
            self.vy += GRAVITY;
            core.x += self.vx;
            core.y += self.vy;
            core.clamp_to_arena();
            if core.bottom() >= ctx.ground_y {
                self.land(core, ctx.ground_y);
            }
        } else {
            self.jump_timer.tick();
            if !self.jump_timer.is_active() {
                self.vy = -JUMP_VELOCITY;
                self.vx = ((ctx.player.x - core.center().x) / 60.0).clamp(-MAX_DRIFT, MAX_DRIFT);
                self.airborne = true;
            }
        }

        for wave in &mut self.shockwaves {
            wave.radius += SHOCKWAVE_GROWTH;
        }
        self.shockwaves.retain(|w| w.radius < SHOCKWAVE_MAX_RADIUS);
        advance_projectiles(&mut self.projectiles, core, ctx.ground_y);
    }

    fn on_phase_change(&mut self, core: &mut BossCore, phase: u8) {
        let interval = Self::interval(phase);
        if self.jump_timer.remaining() > interval {
            self.jump_timer.start(interval);
        }
        debug!("{} hops faster (phase {})", core.name, phase);
    }

    fn on_defeat(&mut self, _core: &mut BossCore) {
        self.shockwaves.clear();
        self.projectiles.clear();
        self.airborne = false;
    }

    fn hazards(&self, _core: &BossCore, out: &mut Vec<HazardBox>) {
        projectile_hazards(&self.projectiles, out);
    }
}
