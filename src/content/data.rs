//! Data definitions for the RON level files.
//!
//! These structs mirror the structure in assets/data/levels.ron and are used
//! for deserialization. The LevelRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Levels (levels.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LevelDef {
    pub id: String,
    pub name: String,
    /// World x at which the boss arena is entered.
    pub length: f32,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    #[serde(default)]
    pub powerups: Vec<PowerupDef>,
    #[serde(default)]
    pub coins: Vec<CoinDef>,
    #[serde(default)]
    pub cages: Vec<CageDef>,
    #[serde(default)]
    pub falling_blocks: Vec<FallingBlockDef>,
    #[serde(default)]
    pub pendulums: Vec<PendulumDef>,
    #[serde(default)]
    pub corridors: Vec<CorridorDef>,
    pub boss: BossDef,
}

// ============================================================================
// Obstacles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum ObstacleKind {
    /// Lethal on touch.
    #[default]
    Spike,
    /// One-way platform, land on top only.
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MotionDef {
    pub axis: Axis,
    /// Half-extent of the oscillation around the authored position.
    pub range: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObstacleDef {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Platforms with motion become moving platforms at run start.
    #[serde(default)]
    pub motion: Option<MotionDef>,
}

// ============================================================================
// Enemies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum EnemyKind {
    #[default]
    Stationary,
    Shooter,
    Flier,
    Armored,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub patrol_range: f32,
}

// ============================================================================
// Pickups
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PowerupKind {
    Shield,
    Bomb,
    Rocket,
    Magnet,
    SuperBullet,
    Heart,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PowerupDef {
    pub kind: PowerupKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoinDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_coin_value")]
    pub value: u32,
}

fn default_coin_value() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CageDef {
    pub x: f32,
    pub y: f32,
    pub skin: String,
}

// ============================================================================
// Dynamic hazards
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallingBlockDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PendulumDef {
    pub pivot_x: f32,
    pub pivot_y: f32,
    pub length: f32,
    /// Maximum swing angle in radians.
    pub amplitude: f32,
    /// Angular frequency in radians per frame.
    pub speed: f32,
    #[serde(default)]
    pub phase: f32,
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f32,
}

fn default_ball_radius() -> f32 {
    18.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorridorDef {
    pub start_x: f32,
    pub end_x: f32,
    /// Gap height at the corridor entrance.
    pub gap: f32,
    /// Gap height at the corridor exit; the gap narrows linearly in between.
    pub min_gap: f32,
    /// Vertical sway of the gap center.
    pub amplitude: f32,
    /// World-x distance per radian of sway.
    pub wavelength: f32,
    #[serde(default)]
    pub moving_spikes: bool,
    #[serde(default)]
    pub rotating_blocks: bool,
    #[serde(default)]
    pub coins: bool,
}

// ============================================================================
// Boss
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BossType {
    Guardian,
    Crusher,
    FrostKing,
    Inferno,
    Core,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BossDef {
    pub kind: BossType,
    pub name: String,
    pub hp: i32,
    pub phases: u8,
}

// ============================================================================
// Starting upgrades (upgrades.ron)
// ============================================================================

/// Pre-activated upgrades produced by the progress layer before a run.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StartingUpgrades {
    #[serde(default)]
    pub bonus_max_health: i32,
    #[serde(default)]
    pub double_jump: bool,
    #[serde(default)]
    pub magnet_frames: u32,
    #[serde(default)]
    pub super_bullet_frames: u32,
}
