//! Physics domain: a generic moving box shared by every emitter.

use bevy::prelude::*;

use super::Aabb;

/// Player bullets, enemy shots, bombs and boss missiles all use this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: i32,
    /// Per-frame downward acceleration (0 for straight shots).
    pub gravity: f32,
}

impl Projectile {
    pub fn new(center: Vec2, vel: Vec2, size: Vec2, damage: i32) -> Self {
        Self {
            pos: center,
            vel,
            size,
            damage,
            gravity: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn advance(&mut self) {
        self.vel.y += self.gravity;
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// True once the projectile has fully left `[left, right] x [top, bottom]`.
    pub fn is_outside(&self, left: f32, right: f32, top: f32, bottom: f32) -> bool {
        let b = self.bounds();
        b.right() < left || b.x > right || b.bottom() < top || b.y > bottom
    }
}
