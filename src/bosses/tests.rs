//! Bosses domain: tests for the shared damage contract and each attack pattern.

use bevy::prelude::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::inferno::BeamState;
use super::{Boss, BossContext, BossCore, BossHit, BossKind, Shockwave};
use crate::content::{BossDef, BossType, SimTuning};
use crate::physics::{Aabb, distance_to_box};

const ARENA_LEFT: f32 = 3000.0;
const GROUND: f32 = 400.0;

fn spawn(kind: BossType, hp: i32, phases: u8) -> Boss {
    let def = BossDef {
        kind,
        name: format!("{:?}", kind),
        hp,
        phases,
    };
    let mut boss = Boss::spawn(&def, ARENA_LEFT, &SimTuning::default());
    boss.end_intro();
    boss
}

fn step(boss: &mut Boss, rng: &mut ChaCha8Rng, frames: usize, player: Vec2) {
    for _ in 0..frames {
        let mut ctx = BossContext {
            player,
            ground_y: GROUND,
            rng: &mut *rng,
        };
        boss.update(&mut ctx);
    }
}

fn player_pos() -> Vec2 {
    Vec2::new(ARENA_LEFT + 100.0, GROUND - 15.0)
}

/// Lands a hit regardless of the invincibility window.
fn force_hit(boss: &mut Boss, amount: i32) -> BossHit {
    boss.core.invincibility.clear();
    boss.take_damage(amount)
}

// -----------------------------------------------------------------------------
// Shared lifecycle
// -----------------------------------------------------------------------------

#[test]
fn test_phase_formula() {
    assert_eq!(BossCore::phase_for_hp(20, 20, 2), 1);
    assert_eq!(BossCore::phase_for_hp(19, 20, 2), 2);
    assert_eq!(BossCore::phase_for_hp(10, 20, 2), 2);
    assert_eq!(BossCore::phase_for_hp(0, 20, 2), 2);
    assert_eq!(BossCore::phase_for_hp(30, 30, 3), 1);
    assert_eq!(BossCore::phase_for_hp(25, 30, 3), 2);
    assert_eq!(BossCore::phase_for_hp(15, 30, 3), 3);
    assert_eq!(BossCore::phase_for_hp(5, 5, 1), 1);
}

#[test]
fn test_guardian_phase_change_fires_once_and_invincibility_blocks_followup() {
    let mut boss = spawn(BossType::Guardian, 20, 2);
    assert_eq!(boss.core.phase, 1);
    let BossKind::Guardian(g) = &boss.kind else {
        panic!("expected a guardian");
    };
    assert_eq!(g.jump_timer.remaining(), 120);

    assert_eq!(boss.take_damage(1), BossHit::Damaged { new_phase: Some(2) });
    assert_eq!(boss.core.phase, 2);
    assert_eq!(boss.core.hp, 19);
    assert!(boss.core.invincibility.is_active());
    let BossKind::Guardian(g) = &boss.kind else {
        panic!("expected a guardian");
    };
    assert_eq!(g.jump_timer.remaining(), 80, "phase hook shortened the cadence");

    assert_eq!(boss.take_damage(1), BossHit::Ignored);
    assert_eq!(boss.core.hp, 19);
    assert_eq!(boss.core.phase, 2);

    assert_eq!(force_hit(&mut boss, 1), BossHit::Damaged { new_phase: None });
}

#[test]
fn test_invincibility_expires_after_window() {
    let mut boss = spawn(BossType::Inferno, 10, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    boss.take_damage(1);
    step(&mut boss, &mut rng, 29, player_pos());
    assert_eq!(boss.take_damage(1), BossHit::Ignored);
    step(&mut boss, &mut rng, 1, player_pos());
    assert_eq!(boss.take_damage(1), BossHit::Damaged { new_phase: None });
    assert_eq!(boss.core.hp, 8);
}

#[test]
fn test_phase_never_decreases() {
    let mut boss = spawn(BossType::Core, 30, 3);
    let mut last = boss.core.phase;
    for _ in 0..29 {
        force_hit(&mut boss, 1);
        assert!(boss.core.phase >= last);
        assert_eq!(
            boss.core.phase,
            BossCore::phase_for_hp(boss.core.hp, 30, 3)
        );
        last = boss.core.phase;
    }
    assert_eq!(last, 3);
}

#[test]
fn test_defeat_fires_once_and_clears_hazards() {
    let mut boss = spawn(BossType::FrostKing, 3, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    step(&mut boss, &mut rng, 95, player_pos());
    assert!(!boss.hazards().is_empty());

    assert_eq!(force_hit(&mut boss, 5), BossHit::Defeated);
    assert_eq!(boss.core.hp, 0);
    assert!(!boss.core.alive);
    assert!(boss.core.defeated);
    assert!(boss.hazards().is_empty());
    assert_eq!(force_hit(&mut boss, 1), BossHit::Ignored);
}

#[test]
fn test_intro_freezes_behavior() {
    let def = BossDef {
        kind: BossType::Guardian,
        name: "Guardian".into(),
        hp: 20,
        phases: 2,
    };
    let mut boss = Boss::spawn(&def, ARENA_LEFT, &SimTuning::default());
    assert!(boss.core.intro_playing);
    let start = (boss.core.x, boss.core.y);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    step(&mut boss, &mut rng, 300, player_pos());
    assert_eq!((boss.core.x, boss.core.y), start);
    assert!(boss.shockwaves().is_empty());
}

#[test]
fn test_spawn_places_boss_inside_arena_on_ground() {
    let tuning = SimTuning::default();
    for kind in [
        BossType::Guardian,
        BossType::Crusher,
        BossType::FrostKing,
        BossType::Inferno,
        BossType::Core,
    ] {
        let boss = spawn(kind, 10, 2);
        assert_eq!(boss.boss_type(), kind);
        let center = boss.core.center();
        assert_eq!(center.x, ARENA_LEFT + tuning.arena_width - 150.0);
        assert!(boss.core.bottom() <= GROUND);
    }
}

// -----------------------------------------------------------------------------
// Capability accessors
// -----------------------------------------------------------------------------

#[test]
fn test_capabilities_only_on_their_bosses() {
    assert!(spawn(BossType::FrostKing, 10, 2).ice_pillars().is_some());
    assert!(spawn(BossType::Crusher, 10, 2).screen_shake().is_some());
    for kind in [BossType::Guardian, BossType::Inferno, BossType::Core] {
        let boss = spawn(kind, 10, 2);
        assert!(boss.ice_pillars().is_none());
        assert!(boss.screen_shake().is_none());
    }
    for kind in [BossType::Guardian, BossType::Crusher, BossType::FrostKing, BossType::Inferno] {
        let mut boss = spawn(kind, 30, 3);
        force_hit(&mut boss, 5);
        assert!(boss.pulse_field().is_none());
    }
    assert!(spawn(BossType::Crusher, 10, 2).shockwaves().is_empty());
}

// -----------------------------------------------------------------------------
// Guardian
// -----------------------------------------------------------------------------

#[test]
fn test_guardian_landing_spawns_shockwave() {
    let mut boss = spawn(BossType::Guardian, 20, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut saw_shockwave = false;
    for _ in 0..220 {
        step(&mut boss, &mut rng, 1, player_pos());
        assert!(boss.core.bottom() <= GROUND + 0.01);
        saw_shockwave |= !boss.shockwaves().is_empty();
    }
    assert!(saw_shockwave);
    assert!(boss.hazards().is_empty(), "phase 1 lands without projectiles");
}

#[test]
fn test_enraged_guardian_fires_ground_shots_on_landing() {
    let mut boss = spawn(BossType::Guardian, 20, 2);
    force_hit(&mut boss, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut saw_shots = false;
    for _ in 0..200 {
        step(&mut boss, &mut rng, 1, player_pos());
        saw_shots |= boss.hazards().len() == 2;
    }
    assert!(saw_shots);
}

#[test]
fn test_shockwave_ring_only_hits_grounded_player() {
    let wave = Shockwave {
        x: 1000.0,
        y: GROUND,
        radius: 100.0,
    };
    assert!(wave.hits(1100.0, true));
    assert!(wave.hits(890.0, true));
    assert!(!wave.hits(1100.0, false));
    assert!(!wave.hits(1000.0, true));
    assert!(!wave.hits(1200.0, true));
}

// -----------------------------------------------------------------------------
// Crusher
// -----------------------------------------------------------------------------

#[test]
fn test_crusher_leaps_at_remembered_target() {
    let mut boss = spawn(BossType::Crusher, 20, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let launch_player = player_pos();
    step(&mut boss, &mut rng, 110, launch_player);
    let BossKind::Crusher(c) = &boss.kind else {
        panic!("expected a crusher");
    };
    assert!(c.airborne);
    let vx = c.vx;
    assert_eq!(c.target_x, launch_player.x);

    step(&mut boss, &mut rng, 5, Vec2::new(ARENA_LEFT + 700.0, GROUND - 15.0));
    let BossKind::Crusher(c) = &boss.kind else {
        panic!("expected a crusher");
    };
    assert_eq!(c.vx, vx, "target is not tracked mid-leap");
    assert_eq!(c.target_x, launch_player.x);
}

#[test]
fn test_crusher_impact_shakes_then_decays() {
    let mut boss = spawn(BossType::Crusher, 20, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut peak = 0.0f32;
    for _ in 0..200 {
        step(&mut boss, &mut rng, 1, player_pos());
        let shake = boss.screen_shake().unwrap_or(0.0);
        if shake > 0.0 && peak == 0.0 {
            peak = shake;
        }
    }
    assert_eq!(peak, 12.0);
}

#[test]
fn test_enraged_crusher_throws_six_debris() {
    let mut boss = spawn(BossType::Crusher, 20, 2);
    force_hit(&mut boss, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut most = 0;
    for _ in 0..200 {
        step(&mut boss, &mut rng, 1, player_pos());
        most = most.max(boss.hazards().len());
    }
    assert_eq!(most, 6);
}

// -----------------------------------------------------------------------------
// FrostKing
// -----------------------------------------------------------------------------

#[test]
fn test_frost_king_fires_three_shard_fan() {
    let mut boss = spawn(BossType::FrostKing, 30, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    step(&mut boss, &mut rng, 89, player_pos());
    assert!(boss.hazards().is_empty());
    step(&mut boss, &mut rng, 1, player_pos());
    assert_eq!(boss.hazards().len(), 3);
}

#[test]
fn test_frost_king_bursts_on_phase_change() {
    let mut boss = spawn(BossType::FrostKing, 30, 3);
    force_hit(&mut boss, 5);
    assert_eq!(boss.core.phase, 2);
    assert_eq!(boss.hazards().len(), 8);
}

#[test]
fn test_frost_king_pillar_warns_then_grows() {
    let mut boss = spawn(BossType::FrostKing, 30, 3);
    force_hit(&mut boss, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    step(&mut boss, &mut rng, 150, player_pos());
    let pillars = boss.ice_pillars().unwrap_or(&[]);
    assert_eq!(pillars.len(), 1);
    assert!(pillars[0].is_warning());
    assert!(pillars[0].hitbox(GROUND).is_none());
    assert_eq!(pillars[0].x, player_pos().x);

    step(&mut boss, &mut rng, 60, player_pos());
    let pillars = boss.ice_pillars().unwrap_or(&[]);
    let hitbox = pillars[0].hitbox(GROUND);
    assert!(hitbox.is_some_and(|h| h.bottom() == GROUND && h.h > 0.0));

    step(&mut boss, &mut rng, 130, player_pos());
    let pillars = boss.ice_pillars().unwrap_or(&[]);
    assert!(pillars.iter().all(|p| p.height <= 140.0));
}

#[test]
fn test_frost_king_teleports_inside_arena() {
    let mut boss = spawn(BossType::FrostKing, 30, 3);
    force_hit(&mut boss, 20);
    assert_eq!(boss.core.phase, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let start = boss.core.x;
    step(&mut boss, &mut rng, 200, player_pos());
    assert_ne!(boss.core.x, start);
    assert!(boss.core.x >= ARENA_LEFT);
    assert!(boss.core.x + boss.core.w <= ARENA_LEFT + 800.0);
    assert!(boss.core.bottom() <= GROUND);
}

// -----------------------------------------------------------------------------
// Inferno
// -----------------------------------------------------------------------------

#[test]
fn test_inferno_fireball_leaves_lava_pool() {
    let mut boss = spawn(BossType::Inferno, 30, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    step(&mut boss, &mut rng, 180, player_pos());
    let BossKind::Inferno(inferno) = &boss.kind else {
        panic!("expected inferno");
    };
    assert_eq!(inferno.pools.len(), 1);
    assert_eq!(inferno.pools[0].bounds.bottom(), GROUND);
}

#[test]
fn test_inferno_minions_are_capped_and_damageable() {
    let mut boss = spawn(BossType::Inferno, 30, 3);
    force_hit(&mut boss, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    step(&mut boss, &mut rng, 1000, player_pos());
    assert_eq!(boss.minions().len(), 3);

    let target = boss.minions()[0].bounds();
    assert!(boss.damage_minions(&target, 1));
    assert!(boss.minions().iter().all(|m| m.alive));
    assert!(boss.damage_minions(&target, 1));
    assert!(boss.minions().len() < 3);
    assert_eq!(boss.core.hp, 25, "minion hits never touch boss hp");
}

#[test]
fn test_inferno_beam_cycle() {
    let mut boss = spawn(BossType::Inferno, 30, 3);
    force_hit(&mut boss, 20);
    assert_eq!(boss.core.phase, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(14);
    let player = player_pos();

    step(&mut boss, &mut rng, 199, player);
    let BossKind::Inferno(inferno) = &boss.kind else {
        panic!("expected inferno");
    };
    assert!(matches!(inferno.beam, BeamState::Idle(_)));

    step(&mut boss, &mut rng, 1, player);
    let BossKind::Inferno(inferno) = &boss.kind else {
        panic!("expected inferno");
    };
    assert_eq!(inferno.beam_row(), Some((player.y, false)));

    step(&mut boss, &mut rng, 60, player);
    let BossKind::Inferno(inferno) = &boss.kind else {
        panic!("expected inferno");
    };
    assert_eq!(inferno.beam_row(), Some((player.y, true)));
    assert!(boss.hazards().iter().any(|h| h.aabb.w == 800.0));

    step(&mut boss, &mut rng, 40, player);
    let BossKind::Inferno(inferno) = &boss.kind else {
        panic!("expected inferno");
    };
    assert!(inferno.beam_row().is_none());
}

// -----------------------------------------------------------------------------
// Core
// -----------------------------------------------------------------------------

#[test]
fn test_core_beam_warns_before_burning() {
    let mut boss = spawn(BossType::Core, 30, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(15);
    step(&mut boss, &mut rng, 120, player_pos());
    let BossKind::Core(core) = &boss.kind else {
        panic!("expected core");
    };
    assert_eq!(core.beams.len(), 1);
    assert!(core.beams[0].is_warning());
    assert!((core.beams[0].x - player_pos().x).abs() <= 60.0);
    assert!(boss.hazards().is_empty());

    step(&mut boss, &mut rng, 50, player_pos());
    assert_eq!(boss.hazards().len(), 1);
}

#[test]
fn test_core_pulse_duty_cycle() {
    let mut boss = spawn(BossType::Core, 30, 3);
    force_hit(&mut boss, 5);
    assert_eq!(boss.core.phase, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(16);

    step(&mut boss, &mut rng, 1, player_pos());
    let BossKind::Core(core) = &boss.kind else {
        panic!("expected core");
    };
    assert!(core.pulse_active(&boss.core));

    step(&mut boss, &mut rng, 59, player_pos());
    let BossKind::Core(core) = &boss.kind else {
        panic!("expected core");
    };
    assert!(!core.pulse_active(&boss.core));
}

#[test]
fn test_core_pulse_field_is_round() {
    let mut boss = spawn(BossType::Core, 30, 3);
    assert!(boss.pulse_field().is_none(), "phase 1 has no pulse");
    force_hit(&mut boss, 5);
    let (center, radius) = boss.pulse_field().expect("pulse live on entering phase 2");
    assert_eq!(center, boss.core.center());
    assert_eq!(radius, 110.0);

    // Straight out to the side reaches further than along the diagonal.
    let side = Aabb::new(center.x + 95.0, center.y - 15.0, 30.0, 30.0);
    let corner = Aabb::new(center.x + radius * 0.8, center.y + radius * 0.8, 30.0, 30.0);
    assert!(distance_to_box(center, &side) < radius);
    assert!(distance_to_box(center, &corner) >= radius);

    boss.core.alive = false;
    assert!(boss.pulse_field().is_none());
}

#[test]
fn test_core_orbiters_spawn_once_and_rotate() {
    let mut boss = spawn(BossType::Core, 30, 3);
    force_hit(&mut boss, 20);
    let BossKind::Core(core) = &boss.kind else {
        panic!("expected core");
    };
    assert_eq!(core.orbiters.len(), 3);
    let before = core.orbiters[0];

    let mut rng = ChaCha8Rng::seed_from_u64(17);
    step(&mut boss, &mut rng, 10, player_pos());
    let BossKind::Core(core) = &boss.kind else {
        panic!("expected core");
    };
    assert_eq!(core.orbiters.len(), 3);
    assert!((core.orbiters[0] - before - 0.5).abs() < 1e-4);
    for pos in core.orbiter_positions(&boss.core) {
        assert!((pos.distance(boss.core.center()) - 100.0).abs() < 1e-3);
    }
}
