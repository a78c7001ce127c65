//! Frame-counted countdown shared by every timed effect in the simulation.

use serde::{Deserialize, Serialize};

/// Counts whole frames down to zero. Zero means inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown(u32);

impl Countdown {
    pub const fn new(frames: u32) -> Self {
        Self(frames)
    }

    pub fn start(&mut self, frames: u32) {
        self.0 = frames;
    }

    /// Decrements by one, clamped at zero. Returns true on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }

    /// Removes `frames` at once, clamped at zero.
    pub fn drain(&mut self, frames: u32) {
        self.0 = self.0.saturating_sub(frames);
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_active(&self) -> bool {
        self.0 > 0
    }

    pub fn remaining(&self) -> u32 {
        self.0
    }
}
