//! Bosses domain: the shared boss lifecycle and the five attack patterns.
//!
//! A [`Boss`] is a [`BossCore`] (hp, phases, invincibility, body) plus a [`BossKind`] holding the
//! private attack state of one concrete boss. The core owns the damage contract; each kind owns
//! its behavior hooks and exposes its hazards as plain boxes so the run loop can test them
//! without knowing which boss it is fighting.

mod core_boss;
mod crusher;
mod frost_king;
mod guardian;
mod inferno;

#[cfg(test)]
mod tests;

pub use core_boss::CoreBoss;
pub use crusher::Crusher;
pub use frost_king::{FrostKing, IcePillar};
pub use guardian::{Guardian, Shockwave};
pub use inferno::{Inferno, Minion};

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::content::{BossDef, BossType, SimTuning};
use crate::physics::{Aabb, Countdown, Projectile};

/// Contact damage of the boss body and of every boss hazard.
pub const BOSS_CONTACT_DAMAGE: i32 = 1;

/// Axis-aligned hazard with the damage it deals on touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardBox {
    pub aabb: Aabb,
    pub damage: i32,
}

impl HazardBox {
    pub fn new(aabb: Aabb) -> Self {
        Self {
            aabb,
            damage: BOSS_CONTACT_DAMAGE,
        }
    }
}

/// What the boss may read about the world during its update.
pub struct BossContext<'a> {
    /// Player center.
    pub player: Vec2,
    pub ground_y: f32,
    pub rng: &'a mut ChaCha8Rng,
}

/// Result of [`Boss::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHit {
    /// Invincible or already dead; nothing changed.
    Ignored,
    Damaged { new_phase: Option<u8> },
    /// This hit brought hp to zero. Returned at most once per boss.
    Defeated,
}

// -----------------------------------------------------------------------------
// Shared lifecycle
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BossCore {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub total_phases: u8,
    pub phase: u8,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub arena_left: f32,
    pub arena_right: f32,
    pub alive: bool,
    pub defeated: bool,
    pub invincibility: Countdown,
    invincibility_frames: u32,
    /// Behavior is suspended while the intro plays.
    pub intro_playing: bool,
}

/// Applied-damage summary handed from the core to the hook dispatch.
struct DamageOutcome {
    new_phase: Option<u8>,
    defeated: bool,
}

impl BossCore {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// `total - floor(hp / (max_hp / total)) + 1`, clamped to `1..=total`.
    pub fn phase_for_hp(hp: i32, max_hp: i32, total_phases: u8) -> u8 {
        let total = i32::from(total_phases.max(1));
        let tier = (hp.max(0) * total) / max_hp.max(1);
        (total - tier + 1).clamp(1, total) as u8
    }

    /// Keeps the body inside the arena walls.
    pub fn clamp_to_arena(&mut self) {
        self.x = self.x.clamp(self.arena_left, (self.arena_right - self.w).max(self.arena_left));
    }

    fn apply_damage(&mut self, amount: i32) -> Option<DamageOutcome> {
        if !self.alive || self.invincibility.is_active() {
            return None;
        }
        self.hp = (self.hp - amount).max(0);
        self.invincibility.start(self.invincibility_frames);

        let computed = Self::phase_for_hp(self.hp, self.max_hp, self.total_phases);
        let new_phase = (computed > self.phase).then(|| {
            self.phase = computed;
            computed
        });

        let defeated = self.hp == 0;
        if defeated {
            self.alive = false;
            self.defeated = true;
        }
        Some(DamageOutcome {
            new_phase,
            defeated,
        })
    }
}

/// Hooks each concrete boss implements. Dispatch goes through [`BossKind`], never a trait object.
pub trait BossBehavior {
    /// Advances the attack pattern. Called every fight frame while alive.
    fn update(&mut self, core: &mut BossCore, ctx: &mut BossContext);
    fn on_phase_change(&mut self, core: &mut BossCore, phase: u8);
    fn on_defeat(&mut self, core: &mut BossCore);
    /// Generic damaging boxes from the current attack state.
    fn hazards(&self, core: &BossCore, out: &mut Vec<HazardBox>);
}

#[derive(Debug, Clone)]
pub enum BossKind {
    Guardian(Guardian),
    Crusher(Crusher),
    FrostKing(FrostKing),
    Inferno(Inferno),
    Core(CoreBoss),
}

macro_rules! dispatch {
    ($kind:expr, $b:ident => $body:expr) => {
        match $kind {
            BossKind::Guardian($b) => $body,
            BossKind::Crusher($b) => $body,
            BossKind::FrostKing($b) => $body,
            BossKind::Inferno($b) => $body,
            BossKind::Core($b) => $body,
        }
    };
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub core: BossCore,
    pub kind: BossKind,
}

impl Boss {
    /// Builds the boss named by `def`, standing 150 px inside the arena's right wall.
    pub fn spawn(def: &BossDef, arena_left: f32, tuning: &SimTuning) -> Self {
        let (w, h, kind) = match def.kind {
            BossType::Guardian => (80.0, 80.0, BossKind::Guardian(Guardian::new())),
            BossType::Crusher => (90.0, 90.0, BossKind::Crusher(Crusher::new())),
            BossType::FrostKing => (70.0, 90.0, BossKind::FrostKing(FrostKing::new())),
            BossType::Inferno => (80.0, 80.0, BossKind::Inferno(Inferno::new())),
            BossType::Core => (70.0, 70.0, BossKind::Core(CoreBoss::new())),
        };
        let arena_right = arena_left + tuning.arena_width;
        let hover = match def.kind {
            BossType::Core => core_boss::HOVER_HEIGHT,
            _ => 0.0,
        };
        let max_hp = def.hp.max(1);
        let total_phases = def.phases.max(1);
        let core = BossCore {
            name: def.name.clone(),
            hp: max_hp,
            max_hp,
            total_phases,
            phase: BossCore::phase_for_hp(max_hp, max_hp, total_phases),
            x: arena_right - 150.0 - w / 2.0,
            y: tuning.ground_y - h - hover,
            w,
            h,
            arena_left,
            arena_right,
            alive: true,
            defeated: false,
            invincibility: Countdown::default(),
            invincibility_frames: tuning.boss_invincibility_frames,
            intro_playing: true,
        };
        Self { core, kind }
    }

    pub fn boss_type(&self) -> BossType {
        match self.kind {
            BossKind::Guardian(_) => BossType::Guardian,
            BossKind::Crusher(_) => BossType::Crusher,
            BossKind::FrostKing(_) => BossType::FrostKing,
            BossKind::Inferno(_) => BossType::Inferno,
            BossKind::Core(_) => BossType::Core,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.core.bounds()
    }

    pub fn is_alive(&self) -> bool {
        self.core.alive
    }

    pub fn end_intro(&mut self) {
        self.core.intro_playing = false;
    }

    /// Advances invincibility and, outside the intro, the attack pattern.
    pub fn update(&mut self, ctx: &mut BossContext) {
        if !self.core.alive {
            return;
        }
        self.core.invincibility.tick();
        if self.core.intro_playing {
            return;
        }
        let core = &mut self.core;
        dispatch!(&mut self.kind, b => b.update(core, ctx));
    }

    /// Shared damage contract: ignored while invincible or dead; otherwise hp drops, the
    /// invincibility window restarts, the phase hook fires once per increase and the defeat
    /// hook fires once.
    pub fn take_damage(&mut self, amount: i32) -> BossHit {
        let Some(outcome) = self.core.apply_damage(amount) else {
            return BossHit::Ignored;
        };
        let core = &mut self.core;
        if let Some(phase) = outcome.new_phase {
            dispatch!(&mut self.kind, b => b.on_phase_change(core, phase));
        }
        if outcome.defeated {
            dispatch!(&mut self.kind, b => b.on_defeat(core));
            return BossHit::Defeated;
        }
        BossHit::Damaged {
            new_phase: outcome.new_phase,
        }
    }

    pub fn hazards(&self) -> Vec<HazardBox> {
        let mut out = Vec::new();
        if self.core.alive {
            dispatch!(&self.kind, b => b.hazards(&self.core, &mut out));
        }
        out
    }

    pub fn shockwaves(&self) -> &[Shockwave] {
        match &self.kind {
            BossKind::Guardian(g) => &g.shockwaves,
            _ => &[],
        }
    }

    /// Only the FrostKing grows ice pillars.
    pub fn ice_pillars(&self) -> Option<&[IcePillar]> {
        match &self.kind {
            BossKind::FrostKing(f) => Some(&f.pillars),
            _ => None,
        }
    }

    /// Only the Crusher shakes the screen.
    pub fn screen_shake(&self) -> Option<f32> {
        match &self.kind {
            BossKind::Crusher(c) => Some(c.shake),
            _ => None,
        }
    }

    /// Only the Core projects a circular pulse field.
    pub fn pulse_field(&self) -> Option<(Vec2, f32)> {
        match &self.kind {
            BossKind::Core(c) if self.core.alive => c.pulse_field(&self.core),
            _ => None,
        }
    }

    pub fn minions(&self) -> &[Minion] {
        match &self.kind {
            BossKind::Inferno(i) => &i.minions,
            _ => &[],
        }
    }

    /// Damages every minion touching `area`. Returns true when at least one was hit.
    pub fn damage_minions(&mut self, area: &Aabb, damage: i32) -> bool {
        match &mut self.kind {
            BossKind::Inferno(i) => i.damage_minions(area, damage),
            _ => false,
        }
    }
}

/// Moves projectiles and drops the ones that left the arena.
pub(crate) fn advance_projectiles(projectiles: &mut Vec<Projectile>, core: &BossCore, ground_y: f32) {
    for p in projectiles.iter_mut() {
        p.advance();
    }
    projectiles
        .retain(|p| !p.is_outside(core.arena_left - 50.0, core.arena_right + 50.0, -400.0, ground_y));
}

pub(crate) fn projectile_hazards(projectiles: &[Projectile], out: &mut Vec<HazardBox>) {
    out.extend(projectiles.iter().map(|p| HazardBox {
        aabb: p.bounds(),
        damage: p.damage,
    }));
}
