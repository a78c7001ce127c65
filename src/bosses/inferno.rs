//! Inferno: lobbed fireballs leaving lava pools, chasing minions, and a sweeping beam.

use bevy::prelude::*;

use super::{
    BOSS_CONTACT_DAMAGE, BossBehavior, BossContext, BossCore, HazardBox, projectile_hazards,
};
use crate::physics::{Aabb, Countdown, Projectile, overlap};

const LOB_INTERVAL: u32 = 100;
const LOB_VELOCITY: f32 = 9.0;
const LOB_GRAVITY: f32 = 0.4;
const POOL_WIDTH: f32 = 60.0;
const POOL_HEIGHT: f32 = 10.0;
const POOL_LIFETIME: u32 = 240;
const MINION_INTERVAL: u32 = 180;
const MAX_MINIONS: usize = 3;
const MINION_HP: i32 = 2;
const MINION_SIZE: f32 = 24.0;
const MINION_SPEED: f32 = 1.5;
const BEAM_IDLE: u32 = 200;
const BEAM_WARNING: u32 = 60;
const BEAM_ACTIVE: u32 = 40;
const BEAM_HEIGHT: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LavaPool {
    pub bounds: Aabb,
    pub lifetime: Countdown,
}

/// Small ground walker with its own hp, damageable independently of the boss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minion {
    pub x: f32,
    pub y: f32,
    pub hp: i32,
    pub alive: bool,
}

impl Minion {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, MINION_SIZE, MINION_SIZE)
    }
}

/// Horizontal beam cycle: idle, then a telegraph locked to a row, then the damaging beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeamState {
    Idle(Countdown),
    Warning { y: f32, timer: Countdown },
    Active { y: f32, timer: Countdown },
}

#[derive(Debug, Clone)]
pub struct Inferno {
    pub lob_timer: Countdown,
    pub fireballs: Vec<Projectile>,
    pub pools: Vec<LavaPool>,
    pub minion_timer: Countdown,
    pub minions: Vec<Minion>,
    pub beam: BeamState,
}

impl Inferno {
    pub fn new() -> Self {
        Self {
            lob_timer: Countdown::new(LOB_INTERVAL),
            fireballs: Vec::new(),
            pools: Vec::new(),
            minion_timer: Countdown::new(MINION_INTERVAL),
            minions: Vec::new(),
            beam: BeamState::Idle(Countdown::new(BEAM_IDLE)),
        }
    }

    /// Row of the beam and whether it currently deals damage.
    pub fn beam_row(&self) -> Option<(f32, bool)> {
        match self.beam {
            BeamState::Idle(_) => None,
            BeamState::Warning { y, .. } => Some((y, false)),
            BeamState::Active { y, .. } => Some((y, true)),
        }
    }

    pub fn beam_bounds(core: &BossCore, y: f32) -> Aabb {
        Aabb::new(
            core.arena_left,
            y - BEAM_HEIGHT / 2.0,
            core.arena_right - core.arena_left,
            BEAM_HEIGHT,
        )
    }

    pub fn damage_minions(&mut self, area: &Aabb, damage: i32) -> bool {
        let mut hit = false;
        for minion in self.minions.iter_mut().filter(|m| m.alive) {
            if overlap(&minion.bounds(), area) {
                hit = true;
                minion.hp -= damage;
                if minion.hp <= 0 {
                    minion.alive = false;
                }
            }
        }
        self.minions.retain(|m| m.alive);
        hit
    }

    fn lob(&mut self, core: &BossCore, target_x: f32) {
        let origin = core.center();
        // Airtime of a lob that lands back at launch height.
        let airtime = 2.0 * LOB_VELOCITY / LOB_GRAVITY;
        let vx = (target_x - origin.x) / airtime;
        self.fireballs.push(
            Projectile::new(
                origin,
                Vec2::new(vx, -LOB_VELOCITY),
                Vec2::new(18.0, 18.0),
                BOSS_CONTACT_DAMAGE,
            )
            .with_gravity(LOB_GRAVITY),
        );
    }

    fn advance_fireballs(&mut self, core: &BossCore, ground_y: f32) {
        for ball in &mut self.fireballs {
            ball.advance();
        }
        let mut landed = Vec::new();
        self.fireballs.retain(|ball| {
            if ball.bottom() >= ground_y {
                landed.push(ball.pos.x);
                false
            } else {
                !ball.is_outside(core.arena_left - 50.0, core.arena_right + 50.0, -400.0, ground_y)
            }
        });
        for x in landed {
            self.pools.push(LavaPool {
                bounds: Aabb::new(x - POOL_WIDTH / 2.0, ground_y - POOL_HEIGHT, POOL_WIDTH, POOL_HEIGHT),
                lifetime: Countdown::new(POOL_LIFETIME),
            });
        }
    }

    fn advance_beam(&mut self, player_y: f32) {
        self.beam = match self.beam {
            BeamState::Idle(mut timer) => {
                timer.tick();
                if timer.is_active() {
                    BeamState::Idle(timer)
                } else {
                    BeamState::Warning {
                        y: player_y,
                        timer: Countdown::new(BEAM_WARNING),
                    }
                }
            }
            BeamState::Warning { y, mut timer } => {
                timer.tick();
                if timer.is_active() {
                    BeamState::Warning { y, timer }
                } else {
                    BeamState::Active {
                        y,
                        timer: Countdown::new(BEAM_ACTIVE),
                    }
                }
            }
            BeamState::Active { y, mut timer } => {
                timer.tick();
                if timer.is_active() {
                    BeamState::Active { y, timer }
                } else {
                    BeamState::Idle(Countdown::new(BEAM_IDLE))
                }
            }
        };
    }
}

impl Default for Inferno {
    fn default() -> Self {
        Self::new()
    }
}

impl BossBehavior for Inferno {
    fn update(&mut self, core: &mut BossCore, ctx: &mut BossContext) {
        self.lob_timer.tick();
        if !self.lob_timer.is_active() {
            self.lob(core, ctx.player.x);
            self.lob_timer.start(LOB_INTERVAL);
        }
        self.advance_fireballs(core, ctx.ground_y);
        for pool in &mut self.pools {
            pool.lifetime.tick();
        }
        self.pools.retain(|p| p.lifetime.is_active());

        if core.phase >= 2 {
            self.minion_timer.tick();
            if !self.minion_timer.is_active() {
                if self.minions.len() < MAX_MINIONS {
                    self.minions.push(Minion {
                        x: core.center().x - MINION_SIZE / 2.0,
                        y: ctx.ground_y - MINION_SIZE,
                        hp: MINION_HP,
                        alive: true,
                    });
                }
                self.minion_timer.start(MINION_INTERVAL);
            }
        }
        for minion in &mut self.minions {
            let dx = ctx.player.x - (minion.x + MINION_SIZE / 2.0);
            if dx.abs() > MINION_SPEED {
                minion.x += MINION_SPEED * dx.signum();
            }
        }

        if core.phase >= 3 {
            self.advance_beam(ctx.player.y);
        }
    }

    fn on_phase_change(&mut self, core: &mut BossCore, phase: u8) {
        debug!("{} enters phase {}", core.name, phase);
    }

    fn on_defeat(&mut self, _core: &mut BossCore) {
        self.fireballs.clear();
        self.pools.clear();
        self.minions.clear();
        self.beam = BeamState::Idle(Countdown::new(BEAM_IDLE));
    }

    fn hazards(&self, core: &BossCore, out: &mut Vec<HazardBox>) {
        projectile_hazards(&self.fireballs, out);
        out.extend(self.pools.iter().map(|p| HazardBox::new(p.bounds)));
        out.extend(
            self.minions
                .iter()
                .filter(|m| m.alive)
                .map(|m| HazardBox::new(m.bounds())),
        );
        if let BeamState::Active { y, .. } = self.beam {
            out.push(HazardBox::new(Self::beam_bounds(core, y)));
        }
    }
}
