//! Run domain: fire-and-forget visual feedback. Never read by gameplay.

use bevy::prelude::*;
use std::f32::consts::TAU;

const MAX_PARTICLES: usize = 256;
const PARTICLE_GRAVITY: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleTint {
    Spark,
    Coin,
    Damage,
    Explosion,
    Ice,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub tint: ParticleTint,
}

#[derive(Debug, Clone, Default)]
pub struct Particles {
    pub live: Vec<Particle>,
}

impl Particles {
    /// Evenly spread ring of particles. Oldest ones are dropped past the cap.
    pub fn burst(&mut self, origin: Vec2, count: usize, speed: f32, tint: ParticleTint) {
        for i in 0..count {
            let dir = Vec2::from_angle(i as f32 * TAU / count.max(1) as f32);
            self.live.push(Particle {
                pos: origin,
                vel: dir * speed,
                life: 30,
                tint,
            });
        }
        if self.live.len() > MAX_PARTICLES {
            let excess = self.live.len() - MAX_PARTICLES;
            self.live.drain(..excess);
        }
    }

    pub fn update(&mut self) {
        for p in &mut self.live {
            p.vel.y += PARTICLE_GRAVITY;
            p.pos += p.vel;
            p.life = p.life.saturating_sub(1);
        }
        self.live.retain(|p| p.life > 0);
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}
