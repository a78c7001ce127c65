//! Hazards domain: swinging balls on a fixed pivot.

use bevy::prelude::*;

use crate::content::PendulumDef;
use crate::physics::{Aabb, distance_to_box};

#[derive(Debug, Clone)]
pub struct Pendulum {
    pub pivot: Vec2,
    pub length: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
    pub ball_radius: f32,
    pub angle: f32,
}

impl Pendulum {
    pub fn from_def(def: &PendulumDef) -> Self {
        let mut pendulum = Self {
            pivot: Vec2::new(def.pivot_x, def.pivot_y),
            length: def.length,
            amplitude: def.amplitude,
            speed: def.speed,
            phase: def.phase,
            ball_radius: def.ball_radius,
            angle: 0.0,
        };
        pendulum.update(0);
        pendulum
    }

    /// `angle = amplitude * sin(frame * speed + phase)`.
    pub fn update(&mut self, frame: u64) {
        self.angle = self.amplitude * (frame as f32 * self.speed + self.phase).sin();
    }

    pub fn ball(&self) -> Vec2 {
        self.pivot + Vec2::new(self.angle.sin(), self.angle.cos()) * self.length
    }

    /// Ball center inside the radius of the nearest point of `target`.
    pub fn hits(&self, target: &Aabb) -> bool {
        distance_to_box(self.ball(), target) < self.ball_radius
    }
}
