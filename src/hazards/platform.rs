//! Hazards domain: static obstacles and oscillating platforms.

use crate::content::{Axis, MotionDef, ObstacleDef, ObstacleKind};
use crate::physics::Aabb;

/// Spike or one-way platform that never moves.
#[derive(Debug, Clone)]
pub struct StaticObstacle {
    pub kind: ObstacleKind,
    pub bounds: Aabb,
}

impl StaticObstacle {
    pub fn from_def(def: &ObstacleDef) -> Self {
        Self {
            kind: def.kind,
            bounds: Aabb::new(def.x, def.y, def.w, def.h),
        }
    }
}

/// Platform oscillating along one axis between `base ± range`.
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    pub base_x: f32,
    pub base_y: f32,
    pub w: f32,
    pub h: f32,
    pub axis: Axis,
    pub range: f32,
    pub speed: f32,
    pub offset: f32,
    pub direction: f32,
    /// Displacement applied on the last update, used to carry riders.
    pub last_delta: f32,
}

impl MovingPlatform {
    pub fn new(def: &ObstacleDef, motion: &MotionDef) -> Self {
        Self {
            base_x: def.x,
            base_y: def.y,
            w: def.w,
            h: def.h,
            axis: motion.axis,
            range: motion.range,
            speed: motion.speed,
            offset: 0.0,
            direction: 1.0,
            last_delta: 0.0,
        }
    }

    pub fn update(&mut self) {
        let before = self.offset;
        self.offset += self.speed * self.direction;
        if self.offset.abs() >= self.range {
            self.offset = self.range * self.offset.signum();
            self.direction = -self.direction;
        }
        self.last_delta = self.offset - before;
    }

    pub fn bounds(&self) -> Aabb {
        match self.axis {
            Axis::Horizontal => Aabb::new(self.base_x + self.offset, self.base_y, self.w, self.h),
            Axis::Vertical => Aabb::new(self.base_x, self.base_y + self.offset, self.w, self.h),
        }
    }

    /// Bounds before the last update. A rider standing on a platform that outruns gravity is
    /// still inside the landing window of this box.
    pub fn previous_bounds(&self) -> Aabb {
        let mut bounds = self.bounds();
        match self.axis {
            Axis::Horizontal => bounds.x -= self.last_delta,
            Axis::Vertical => bounds.y -= self.last_delta,
        }
        bounds
    }
}
