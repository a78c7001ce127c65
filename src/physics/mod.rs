//! Physics domain: axis-aligned boxes, gravity integration and contact tests.
//!
//! World space is y-down: the ground line is a positive y and negative `vy` moves upward.

mod projectile;
mod timer;


pub use projectile::Projectile;
pub use timer::Countdown;

use bevy::prelude::*;

/// Vertical window (px) below a platform's top edge in which a falling body still lands.
pub const LANDING_TOLERANCE: f32 = 5.0;

/// Extra margin (px) below a target's midpoint that still counts as a stomp.
pub const STOMP_MARGIN: f32 = 10.0;

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of `size` centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }
}

/// Strict overlap: boxes that only share an edge do not intersect.
pub fn overlap(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// One integration step: `vy += g; y += vy`. No terminal velocity.
pub fn apply_gravity(y: &mut f32, vy: &mut f32, gravity: f32) {
    *vy += gravity;
    *y += *vy;
}

/// Snaps a body of `height` onto the ground line. Returns true when grounded.
pub fn clamp_to_ground(y: &mut f32, vy: &mut f32, height: f32, ground_y: f32) -> bool {
    if *y + height >= ground_y {
        *y = ground_y - height;
        *vy = 0.0;
        true
    } else {
        false
    }
}

/// One-way landing: the mover is not rising, overlaps horizontally, and its bottom edge sits
/// within [`LANDING_TOLERANCE`] of the platform top.
pub fn landing_collision(mover: &Aabb, vy: f32, platform: &Aabb) -> bool {
    let bottom = mover.bottom();
    vy >= 0.0
        && mover.right() > platform.x
        && mover.x < platform.right()
        && bottom >= platform.y
        && bottom <= platform.y + LANDING_TOLERANCE
}

/// A falling attacker whose feet are still above the target's midpoint (plus margin) stomps it.
pub fn stomp_check(attacker: &Aabb, vy: f32, target: &Aabb) -> bool {
    vy > 0.0 && attacker.bottom() < target.y + target.h / 2.0 + STOMP_MARGIN
}

/// Distance from `point` to the nearest point of `aabb` (0 when inside).
pub fn distance_to_box(point: Vec2, aabb: &Aabb) -> f32 {
    let nearest = Vec2::new(
        point.x.clamp(aabb.x, aabb.right()),
        point.y.clamp(aabb.y, aabb.bottom()),
    );
    point.distance(nearest)
}
