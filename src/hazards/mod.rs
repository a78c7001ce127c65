//! Hazards domain: level-authored obstacles promoted to mutable runtime copies.

mod corridor;
mod falling_block;
mod pendulum;
mod platform;


pub use corridor::{
    CORRIDOR_COIN_RADIUS, Corridor, SEGMENT_WIDTH, SpikeSide, WallContact, segment_index,
    spike_side,
};
pub use falling_block::{FallingBlock, FallingBlockState};
pub use pendulum::Pendulum;
pub use platform::{MovingPlatform, StaticObstacle};

use crate::content::{LevelDef, ObstacleKind};

/// Runtime hazard set built fresh for each run.
#[derive(Debug, Clone, Default)]
pub struct LevelHazards {
    pub obstacles: Vec<StaticObstacle>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub falling_blocks: Vec<FallingBlock>,
    pub pendulums: Vec<Pendulum>,
    pub corridors: Vec<Corridor>,
}

impl LevelHazards {
    /// Obstacles with a motion descriptor become moving platforms; the rest stay static.
    pub fn from_level(level: &LevelDef) -> Self {
        let mut hazards = Self::default();
        for def in &level.obstacles {
            match &def.motion {
                Some(motion) => hazards
                    .moving_platforms
                    .push(MovingPlatform::new(def, motion)),
                None => hazards.obstacles.push(StaticObstacle::from_def(def)),
            }
        }
        hazards.falling_blocks = level.falling_blocks.iter().map(FallingBlock::from_def).collect();
        hazards.pendulums = level.pendulums.iter().map(Pendulum::from_def).collect();
        hazards.corridors = level.corridors.iter().map(Corridor::from_def).collect();
        hazards
    }

    pub fn spikes(&self) -> impl Iterator<Item = &StaticObstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Spike)
    }

    pub fn platforms(&self) -> impl Iterator<Item = &StaticObstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Platform)
    }

    /// Index of the corridor containing `world_x`, if any.
    pub fn corridor_at(&self, world_x: f32) -> Option<usize> {
        self.corridors.iter().position(|c| c.contains(world_x))
    }
}
