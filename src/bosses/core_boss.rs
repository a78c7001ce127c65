//! Core: floating teleporter that calls down vertical beams, pulses, and gathers orbiters.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::{BossBehavior, BossContext, BossCore, HazardBox};
use crate::physics::{Aabb, Countdown};

/// Height the Core floats above the ground.
pub(super) const HOVER_HEIGHT: f32 = 120.0;
const TELEPORT_INTERVAL: u32 = 240;
const BEAM_INTERVAL: u32 = 120;
const BEAM_WARNING: u32 = 50;
const BEAM_ACTIVE: u32 = 30;
const BEAM_WIDTH: f32 = 30.0;
const BEAM_JITTER: f32 = 60.0;
const PULSE_PERIOD: u32 = 180;
const PULSE_ACTIVE: u32 = 60;
const PULSE_RADIUS: f32 = 110.0;
const ORBITER_COUNT: usize = 3;
pub const ORBIT_RADIUS: f32 = 100.0;
const ORBIT_SPEED: f32 = 0.05;
const ORBITER_SIZE: f32 = 20.0;

/// Column that warns, then burns for a short window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBeam {
    pub x: f32,
    pub warning: Countdown,
    pub active: Countdown,
}

impl VerticalBeam {
    fn new(x: f32) -> Self {
        Self {
            x,
            warning: Countdown::new(BEAM_WARNING),
            active: Countdown::new(BEAM_ACTIVE),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.warning.is_active()
    }

    pub fn is_active(&self) -> bool {
        !self.warning.is_active() && self.active.is_active()
    }

    fn update(&mut self) {
        if self.warning.is_active() {
            self.warning.tick();
        } else {
            self.active.tick();
        }
    }

    fn finished(&self) -> bool {
        !self.warning.is_active() && !self.active.is_active()
    }

    pub fn bounds(&self, ground_y: f32) -> Aabb {
        Aabb::new(self.x - BEAM_WIDTH / 2.0, 0.0, BEAM_WIDTH, ground_y)
    }
}

#[derive(Debug, Clone)]
pub struct CoreBoss {
    pub teleport_timer: Countdown,
    pub beam_timer: Countdown,
    pub beams: Vec<VerticalBeam>,
    pub pulse_clock: u32,
    /// Orbiter angles in radians. Spawned once on reaching phase 3.
    pub orbiters: Vec<f32>,
    ground_y: f32,
}

impl CoreBoss {
    pub fn new() -> Self {
        Self {
            teleport_timer: Countdown::new(TELEPORT_INTERVAL),
            beam_timer: Countdown::new(BEAM_INTERVAL),
            beams: Vec::new(),
            pulse_clock: 0,
            orbiters: Vec::new(),
            ground_y: 0.0,
        }
    }

    /// The pulse field is live for the first part of every period, from phase 2 on.
    pub fn pulse_active(&self, core: &BossCore) -> bool {
        core.phase >= 2 && self.pulse_clock % PULSE_PERIOD < PULSE_ACTIVE
    }

    /// Center and radius of the live pulse field.
    pub fn pulse_field(&self, core: &BossCore) -> Option<(Vec2, f32)> {
        self.pulse_active(core)
            .then(|| (core.center(), PULSE_RADIUS))
    }

    pub fn orbiter_positions(&self, core: &BossCore) -> impl Iterator<Item = Vec2> + '_ {
        let center = core.center();
        self.orbiters
            .iter()
            .map(move |a| center + Vec2::from_angle(*a) * ORBIT_RADIUS)
    }

    fn spawn_orbiters(&mut self) {
        if self.orbiters.is_empty() {
            self.orbiters = (0..ORBITER_COUNT)
                .map(|i| i as f32 * TAU / ORBITER_COUNT as f32)
                .collect();
        }
    }

    fn teleport(core: &mut BossCore, ctx: &mut BossContext) {
        let min_x = core.arena_left + 50.0;
        let max_x = (core.arena_right - 50.0 - core.w).max(min_x + 1.0);
        core.x = ctx.rng.random_range(min_x..max_x);
        core.y = ctx.ground_y - core.h - ctx.rng.random_range(40.0..200.0);
    }
}

impl Default for CoreBoss {
    fn default() -> Self {
        Self::new()
    }
}

impl BossBehavior for CoreBoss {
    fn update(&mut self, core: &mut BossCore, ctx: &mut BossContext) {
        self.ground_y = ctx.ground_y;

        self.teleport_timer.tick();
        if !self.teleport_timer.is_active() {
            Self::teleport(core, ctx);
            self.teleport_timer.start(TELEPORT_INTERVAL);
        }

        self.beam_timer.tick();
        if !self.beam_timer.is_active() {
            let jitter = ctx.rng.random_range(-BEAM_JITTER..BEAM_JITTER);
            self.beams.push(VerticalBeam::new(ctx.player.x + jitter));
            self.beam_timer.start(BEAM_INTERVAL);
        }
        for beam in &mut self.beams {
            beam.update();
        }
        self.beams.retain(|b| !b.finished());

        if core.phase >= 2 {
            self.pulse_clock = self.pulse_clock.wrapping_add(1);
        }
        if core.phase >= 3 {
            self.spawn_orbiters();
            for angle in &mut self.orbiters {
                *angle = (*angle + ORBIT_SPEED) % TAU;
            }
        }
    }

    fn on_phase_change(&mut self, core: &mut BossCore, phase: u8) {
        if phase >= 2 {
            self.pulse_clock = 0;
        }
        if phase >= 3 {
            self.spawn_orbiters();
        }
        debug!("{} shifts to phase {}", core.name, phase);
    }

    fn on_defeat(&mut self, _core: &mut BossCore) {
        self.beams.clear();
        self.orbiters.clear();
    }

    fn hazards(&self, core: &BossCore, out: &mut Vec<HazardBox>) {
        out.extend(
            self.beams
                .iter()
                .filter(|b| b.is_active())
                .map(|b| HazardBox::new(b.bounds(self.ground_y))),
        );
        out.extend(
            self.orbiter_positions(core)
                .map(|p| HazardBox::new(Aabb::centered(p, Vec2::splat(ORBITER_SIZE)))),
        );
    }
}
