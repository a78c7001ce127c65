//! Crusher: leaps at where the player stood at takeoff and shakes the screen on impact.

use bevy::prelude::*;
use std::f32::consts::PI;

use super::{
    BOSS_CONTACT_DAMAGE, BossBehavior, BossContext, BossCore, HazardBox, advance_projectiles,
    projectile_hazards,
};
use crate::physics::{Countdown, Projectile};

const LEAP_INTERVAL: u32 = 110;
const LEAP_INTERVAL_ENRAGED: u32 = 80;
const LEAP_VELOCITY: f32 = 16.0;
const RISE_GRAVITY: f32 = 0.6;
const FALL_GRAVITY: f32 = 1.2;
/// Frames over which the horizontal distance to the target is covered.
const LEAP_FRAMES: f32 = 45.0;
const IMPACT_SHAKE: f32 = 12.0;
const SHAKE_DECAY: f32 = 0.9;
const DEBRIS_COUNT: usize = 6;
const DEBRIS_SPEED: f32 = 6.0;
const DEBRIS_GRAVITY: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Crusher {
    pub leap_timer: Countdown,
    /// Player x captured at takeoff. Not tracked during the leap.
    pub target_x: f32,
    pub vx: f32,
    pub vy: f32,
    pub airborne: bool,
    pub shake: f32,
    pub debris: Vec<Projectile>,
}

impl Crusher {
    pub fn new() -> Self {
        Self {
            leap_timer: Countdown::new(LEAP_INTERVAL),
            target_x: 0.0,
            vx: 0.0,
            vy: 0.0,
            airborne: false,
            shake: 0.0,
            debris: Vec::new(),
        }
    }

    fn interval(phase: u8) -> u32 {
        if phase >= 2 {
            LEAP_INTERVAL_ENRAGED
        } else {
            LEAP_INTERVAL
        }
    }

    fn impact(&mut self, core: &mut BossCore, ground_y: f32) {
        core.y = ground_y - core.h;
        self.vx = 0.0;
        self.vy = 0.0;
        self.airborne = false;
        self.shake = IMPACT_SHAKE;
        self.leap_timer.start(Self::interval(core.phase));

        if core.phase >= 2 {
            let origin = Vec2::new(core.center().x, core.y);
            for i in 0..DEBRIS_COUNT {
                // Upper half circle; y-down so upward angles lie in (PI, 2PI).
                let angle = PI + (i as f32 + 0.5) * PI / DEBRIS_COUNT as f32;
                self.debris.push(
                    Projectile::new(
                        origin,
                        Vec2::from_angle(angle) * DEBRIS_SPEED,
                        Vec2::new(16.0, 16.0),
                        BOSS_CONTACT_DAMAGE,
                    )
                    .with_gravity(DEBRIS_GRAVITY),
                );
            }
        }
    }
}

impl Default for Crusher {
    fn default() -> Self {
        Self::new()
    }
}

impl BossBehavior for Crusher {
    fn update(&mut self, core: &mut BossCore, ctx: &mut BossContext) {
        self.shake *= SHAKE_DECAY;
        if self.shake < 0.1 {
            self.shake = 0.0;
        }

        if self.airborne {
            self.vy += if self.vy < 0.0 {
                RISE_GRAVITY
            } else {
                FALL_GRAVITY
            };
            core.x += self.vx;
            core.y += self.vy;
            core.clamp_to_arena();
            if core.bottom() >= ctx.ground_y {
                self.impact(core, ctx.ground_y);
            }
        } else {
            self.leap_timer.tick();
            if !self.leap_timer.is_active() {
                self.target_x = ctx.player.x;
                self.vx = (self.target_x - core.center().x) / LEAP_FRAMES;
                self.vy = -LEAP_VELOCITY;
                self.airborne = true;
            }
        }

        advance_projectiles(&mut self.debris, core, ctx.ground_y);
        self.debris.retain(|d| d.vel.y < 0.0 || d.bottom() < ctx.ground_y);
    }

    fn on_phase_change(&mut self, core: &mut BossCore, phase: u8) {
        debug!("{} starts throwing debris (phase {})", core.name, phase);
    }

    fn on_defeat(&mut self, _core: &mut BossCore) {
        self.debris.clear();
        self.shake = 0.0;
        self.airborne = false;
    }

    fn hazards(&self, _core: &BossCore, out: &mut Vec<HazardBox>) {
        projectile_hazards(&self.debris, out);
    }
}
