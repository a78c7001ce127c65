//! Run domain: every entity of one run, owned by a single `RunWorld`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::bosses::Boss;
use crate::content::{LevelDef, PowerupKind, SimTuning, StartingUpgrades};
use crate::enemies::Enemy;
use crate::hazards::LevelHazards;
use crate::physics::{Aabb, Countdown, Projectile};
use crate::player::{INVENTORY_SLOTS, Player};
use crate::run::camera::GameCamera;
use crate::run::events::{FrameEvent, RunOutcome};
use crate::run::particles::Particles;

pub const COIN_RADIUS: f32 = 10.0;
pub const POWERUP_SIZE: f32 = 24.0;
pub const CAGE_SIZE: f32 = 40.0;
/// Player x inside the arena after the boss spawns, relative to the arena's left wall.
pub const ARENA_ENTRY_OFFSET: f32 = 60.0;
/// Frames between refreshes of the HUD's inventory snapshot.
pub const INVENTORY_DISPLAY_INTERVAL: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct CoinPickup {
    pub pos: Vec2,
    pub value: u32,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerupPickup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub collected: bool,
}

impl PowerupPickup {
    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, Vec2::splat(POWERUP_SIZE))
    }
}

/// Cage holding a cosmetic skin; broken by landing on its top.
#[derive(Debug, Clone, PartialEq)]
pub struct Cage {
    pub bounds: Aabb,
    pub skin: String,
    pub broken: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBullet {
    pub shot: Projectile,
    /// Super-bullet shots pass through enemies instead of stopping at the first.
    pub piercing: bool,
    /// Enemies already hit by a piercing shot.
    pub hit: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BossPhase {
    None,
    Intro,
    Fight,
    Defeated,
}

/// Frame-by-frame summary used for determinism checks.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub frame: u64,
    pub score: u32,
    pub kills: u32,
    pub coins: u32,
    pub player_x: f32,
    pub player_y: f32,
    pub player_vy: f32,
    pub health: i32,
    pub boss_phase: BossPhase,
    pub boss_hp: Option<i32>,
    pub enemies_alive: usize,
}

/// The complete simulation state of one run.
#[derive(Resource, Debug, Clone)]
pub struct RunWorld {
    pub tuning: SimTuning,
    pub level: LevelDef,
    pub seed: u64,
    pub frame: u64,

    pub player: Player,
    pub camera: GameCamera,
    pub enemies: Vec<Enemy>,
    pub hazards: LevelHazards,
    pub coins: Vec<CoinPickup>,
    pub cages: Vec<Cage>,
    pub powerups: Vec<PowerupPickup>,

    pub bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<Projectile>,
    pub bombs: Vec<Projectile>,

    pub boss: Option<Boss>,
    pub boss_phase: BossPhase,
    pub intro_timer: Countdown,
    pub victory_timer: Countdown,
    /// Index into `hazards.corridors` of the corridor the player is flying through.
    pub active_corridor: Option<usize>,

    pub kills: u32,
    pub coins_collected: u32,
    pub freed_skins: Vec<String>,
    pub outcome: Option<RunOutcome>,
    pub events: Vec<FrameEvent>,

    pub particles: Particles,
    /// Eases toward the true score. Cosmetic only.
    pub displayed_score: f32,
    pub inventory_display: [Option<PowerupKind>; INVENTORY_SLOTS],

    pub(crate) rng: ChaCha8Rng,
}

impl RunWorld {
    /// Fresh entity set for `level`. Nothing carries over from a previous run.
    pub fn new(level: &LevelDef, tuning: &SimTuning, upgrades: &StartingUpgrades, seed: u64) -> Self {
        let player = Player::new(tuning, upgrades);
        let inventory_display = player.inventory.slots();
        Self {
            tuning: tuning.clone(),
            level: level.clone(),
            seed,
            frame: 0,
            player,
            camera: GameCamera::new(tuning),
            enemies: level
                .enemies
                .iter()
                .map(|def| Enemy::from_def(def, tuning))
                .collect(),
            hazards: LevelHazards::from_level(level),
            coins: level
                .coins
                .iter()
                .map(|c| CoinPickup {
                    pos: Vec2::new(c.x, c.y),
                    value: c.value,
                    collected: false,
                })
                .collect(),
            cages: level
                .cages
                .iter()
                .map(|c| Cage {
                    bounds: Aabb::new(c.x, c.y, CAGE_SIZE, CAGE_SIZE),
                    skin: c.skin.clone(),
                    broken: false,
                })
                .collect(),
            powerups: level
                .powerups
                .iter()
                .map(|p| PowerupPickup {
                    kind: p.kind,
                    pos: Vec2::new(p.x, p.y),
                    collected: false,
                })
                .collect(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            bombs: Vec::new(),
            boss: None,
            boss_phase: BossPhase::None,
            intro_timer: Countdown::default(),
            victory_timer: Countdown::default(),
            active_corridor: None,
            kills: 0,
            coins_collected: 0,
            freed_skins: Vec::new(),
            outcome: None,
            events: Vec::new(),
            particles: Particles::default(),
            displayed_score: 0.0,
            inventory_display,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// `floor(camera x / 10)`. The only source of score.
    pub fn score(&self) -> u32 {
        (self.camera.x.max(0.0) / 10.0).floor() as u32
    }

    /// The arena starts where the level ends.
    pub fn arena_left(&self) -> f32 {
        self.level.length
    }

    pub fn arena_right(&self) -> f32 {
        self.level.length + self.tuning.arena_width
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            frame: self.frame,
            score: self.score(),
            kills: self.kills,
            coins: self.coins_collected,
            player_x: self.player.x,
            player_y: self.player.y,
            player_vy: self.player.vy,
            health: self.player.health,
            boss_phase: self.boss_phase,
            boss_hp: self.boss.as_ref().map(|b| b.core.hp),
            enemies_alive: self.enemies.iter().filter(|e| e.alive).count(),
        }
    }

    /// Puts the player on the ground a short run before the arena trigger.
    #[cfg(feature = "dev-tools")]
    pub fn warp_near_arena(&mut self) {
        if self.boss_phase != BossPhase::None {
            return;
        }
        self.player.x = (self.arena_left() - 300.0).max(self.player.x);
        self.player.y = self.tuning.ground_y - self.player.size;
        self.player.vy = 0.0;
        self.player.on_ground = true;
        self.player.corridor_mode = false;
        self.active_corridor = None;
    }

    #[cfg(feature = "dev-tools")]
    pub fn restore_health(&mut self) {
        self.player.heal(self.player.max_health);
    }
}
