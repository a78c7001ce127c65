//! Run domain: what happened during a frame, and how a run ends.

use serde::Serialize;

use crate::content::{BossType, PowerupKind};

/// Gameplay event produced by a single `RunWorld::step`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FrameEvent {
    PlayerDamaged { health: i32 },
    ShieldAbsorbed,
    PlayerLanded,
    EnemyKilled { kills: u32 },
    CoinCollected { value: u32 },
    PowerupCollected { kind: PowerupKind },
    PowerupUsed { kind: PowerupKind },
    BombExploded { x: f32, y: f32 },
    CageBroken { skin: String },
    CorridorEntered,
    CorridorExited,
    BossSpawned { kind: BossType },
    BossFightStarted,
    BossDamaged { hp: i32 },
    BossPhaseChanged { phase: u8 },
    BossDefeated,
    PlayerDied { score: u32, kills: u32 },
    LevelCompleted { score: u32, kills: u32, coins: u32 },
}

/// Terminal result of a run. Produced exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Died { score: u32, kills: u32 },
    LevelComplete { score: u32, kills: u32, coins: u32 },
}

/// Summary handed to the progress layer when a run ends.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub level_id: String,
    pub seed: u64,
    pub frames: u64,
    pub outcome: RunOutcome,
    pub coins: u32,
    pub freed_skins: Vec<String>,
}
