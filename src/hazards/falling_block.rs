//! Hazards domain: blocks that shake, drop and settle into platforms.

use crate::content::FallingBlockDef;
use crate::physics::{Aabb, Countdown};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallingBlockState {
    Idle,
    Warning(Countdown),
    Falling { vy: f32 },
    /// Resting on the ground; acts as a one-way platform.
    Landed,
}

#[derive(Debug, Clone)]
pub struct FallingBlock {
    pub bounds: Aabb,
    pub state: FallingBlockState,
}

impl FallingBlock {
    pub fn from_def(def: &FallingBlockDef) -> Self {
        Self {
            bounds: Aabb::new(def.x, def.y, def.w, def.h),
            state: FallingBlockState::Idle,
        }
    }

    /// Idle -> Warning when the player comes within `trigger` px. A block that spent exactly
    /// `warning_frames` updates in Warning starts falling on the following update.
    pub fn update(
        &mut self,
        player_x: f32,
        trigger: f32,
        warning_frames: u32,
        gravity: f32,
        ground_y: f32,
    ) {
        match &mut self.state {
            FallingBlockState::Idle => {
                if self.bounds.x - player_x <= trigger {
                    self.state = FallingBlockState::Warning(Countdown::new(warning_frames));
                }
            }
            FallingBlockState::Warning(timer) => {
                if timer.is_active() {
                    timer.tick();
                } else {
                    self.state = FallingBlockState::Falling { vy: 0.0 };
                }
            }
            FallingBlockState::Falling { vy } => {
                *vy += gravity;
                self.bounds.y += *vy;
                if self.bounds.bottom() >= ground_y {
                    self.bounds.y = ground_y - self.bounds.h;
                    self.state = FallingBlockState::Landed;
                }
            }
            FallingBlockState::Landed => {}
        }
    }

    pub fn is_falling(&self) -> bool {
        matches!(self.state, FallingBlockState::Falling { .. })
    }

    pub fn is_landed(&self) -> bool {
        self.state == FallingBlockState::Landed
    }
}
