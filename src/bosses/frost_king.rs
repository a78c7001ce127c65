//! FrostKing: aimed ice fans, then pillars from the ground, then teleports.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::{
    BOSS_CONTACT_DAMAGE, BossBehavior, BossContext, BossCore, HazardBox, advance_projectiles,
    projectile_hazards,
};
use crate::physics::{Aabb, Countdown, Projectile};

const FAN_INTERVAL: u32 = 90;
const FAN_SPREAD: f32 = 0.25;
const SHARD_SPEED: f32 = 5.0;
const BURST_COUNT: usize = 8;
const BURST_SPEED: f32 = 4.0;
const PILLAR_INTERVAL: u32 = 150;
const PILLAR_WARNING: u32 = 40;
const PILLAR_LIFETIME: u32 = 120;
const PILLAR_GROWTH: f32 = 8.0;
const PILLAR_MAX_HEIGHT: f32 = 140.0;
const PILLAR_WIDTH: f32 = 40.0;
const TELEPORT_INTERVAL: u32 = 200;
const AIRBORNE_CHANCE: f64 = 0.3;

/// Warning marker on the ground, then a column of ice that grows and melts away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcePillar {
    pub x: f32,
    pub height: f32,
    pub warning: Countdown,
    pub lifetime: Countdown,
}

impl IcePillar {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            height: 0.0,
            warning: Countdown::new(PILLAR_WARNING),
            lifetime: Countdown::new(PILLAR_LIFETIME),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.warning.is_active()
    }

    fn update(&mut self) {
        if self.warning.is_active() {
            self.warning.tick();
            return;
        }
        self.height = (self.height + PILLAR_GROWTH).min(PILLAR_MAX_HEIGHT);
        self.lifetime.tick();
    }

    fn expired(&self) -> bool {
        !self.warning.is_active() && !self.lifetime.is_active()
    }

    /// Solid column standing on the ground; none while still a warning marker.
    pub fn hitbox(&self, ground_y: f32) -> Option<Aabb> {
        (!self.is_warning() && self.height > 0.0).then(|| {
            Aabb::new(
                self.x - PILLAR_WIDTH / 2.0,
                ground_y - self.height,
                PILLAR_WIDTH,
                self.height,
            )
        })
    }

    /// Footprint of the warning marker, for drawing.
    pub fn marker(&self, ground_y: f32) -> Aabb {
        Aabb::new(self.x - PILLAR_WIDTH / 2.0, ground_y - 4.0, PILLAR_WIDTH, 4.0)
    }
}

#[derive(Debug, Clone)]
pub struct FrostKing {
    pub fan_timer: Countdown,
    pub pillar_timer: Countdown,
    pub teleport_timer: Countdown,
    pub shards: Vec<Projectile>,
    pub pillars: Vec<IcePillar>,
}

impl FrostKing {
    pub fn new() -> Self {
        Self {
            fan_timer: Countdown::new(FAN_INTERVAL),
            pillar_timer: Countdown::new(PILLAR_INTERVAL),
            teleport_timer: Countdown::new(TELEPORT_INTERVAL),
            shards: Vec::new(),
            pillars: Vec::new(),
        }
    }

    fn shard(origin: Vec2, dir: Vec2, speed: f32) -> Projectile {
        Projectile::new(origin, dir * speed, Vec2::new(14.0, 14.0), BOSS_CONTACT_DAMAGE)
    }

    fn fire_fan(&mut self, core: &BossCore, target: Vec2) {
        let origin = core.center();
        let aim = (target - origin).normalize_or(Vec2::NEG_X);
        for offset in [-FAN_SPREAD, 0.0, FAN_SPREAD] {
            self.shards
                .push(Self::shard(origin, Vec2::from_angle(offset).rotate(aim), SHARD_SPEED));
        }
    }

    fn teleport(&mut self, core: &mut BossCore, ctx: &mut BossContext) {
        let min_x = core.arena_left + 50.0;
        let max_x = (core.arena_right - 50.0 - core.w).max(min_x + 1.0);
        core.x = ctx.rng.random_range(min_x..max_x);
        let lift = if ctx.rng.random_bool(AIRBORNE_CHANCE) {
            ctx.rng.random_range(80.0..160.0)
        } else {
            0.0
        };
        core.y = ctx.ground_y - core.h - lift;
    }
}

impl Default for FrostKing {
    fn default() -> Self {
        Self::new()
    }
}

impl BossBehavior for FrostKing {
    fn update(&mut self, core: &mut BossCore, ctx: &mut BossContext) {
        self.fan_timer.tick();
        if !self.fan_timer.is_active() {
            self.fire_fan(core, ctx.player);
            self.fan_timer.start(FAN_INTERVAL);
        }

        if core.phase >= 2 {
            self.pillar_timer.tick();
            if !self.pillar_timer.is_active() {
                self.pillars.push(IcePillar::new(ctx.player.x));
                self.pillar_timer.start(PILLAR_INTERVAL);
            }
        }

        if core.phase >= 3 {
            self.teleport_timer.tick();
            if !self.teleport_timer.is_active() {
                self.teleport(core, ctx);
                self.teleport_timer.start(TELEPORT_INTERVAL);
            }
        }

        for pillar in &mut self.pillars {
            pillar.update();
        }
        self.pillars.retain(|p| !p.expired());
        advance_projectiles(&mut self.shards, core, ctx.ground_y);
    }

    /// Radial burst on every phase change.
    fn on_phase_change(&mut self, core: &mut BossCore, phase: u8) {
        let origin = core.center();
        for i in 0..BURST_COUNT {
            let dir = Vec2::from_angle(i as f32 * TAU / BURST_COUNT as f32);
            self.shards.push(Self::shard(origin, dir, BURST_SPEED));
        }
        debug!("{} bursts into phase {}", core.name, phase);
    }

    fn on_defeat(&mut self, _core: &mut BossCore) {
        self.shards.clear();
        self.pillars.clear();
    }

    fn hazards(&self, _core: &BossCore, out: &mut Vec<HazardBox>) {
        projectile_hazards(&self.shards, out);
    }
}
