//! Run domain: headless tests driving `RunWorld` frame by frame.

use bevy::prelude::Vec2;

use super::events::{FrameEvent, RunOutcome};
use super::input::FrameInput;
use super::world::{Cage, CoinPickup, PowerupPickup};
use super::{BossPhase, RunWorld};
use crate::bosses::{BossKind, IcePillar};
use crate::content::{
    Axis, BossDef, BossType, CorridorDef, EnemyDef, EnemyKind, LevelDef, MotionDef, ObstacleDef,
    ObstacleKind, PendulumDef, PowerupKind, SimTuning, StartingUpgrades,
};
use crate::hazards::{
    FallingBlock, FallingBlockState, MovingPlatform, Pendulum, SpikeSide, StaticObstacle,
    segment_index, spike_side,
};
use crate::physics::{Aabb, Countdown, Projectile};

const SEED: u64 = 42;

fn flat_level(length: f32) -> LevelDef {
    LevelDef {
        id: "test".to_string(),
        name: "Test Level".to_string(),
        length,
        obstacles: Vec::new(),
        enemies: Vec::new(),
        powerups: Vec::new(),
        coins: Vec::new(),
        cages: Vec::new(),
        falling_blocks: Vec::new(),
        pendulums: Vec::new(),
        corridors: Vec::new(),
        boss: BossDef {
            kind: BossType::Guardian,
            name: "Guardian".to_string(),
            hp: 5,
            phases: 2,
        },
    }
}

fn world_for(level: &LevelDef) -> RunWorld {
    RunWorld::new(
        level,
        &SimTuning::default(),
        &StartingUpgrades::default(),
        SEED,
    )
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn place_spike(world: &mut RunWorld, x: f32, w: f32) {
    let ground = world.tuning.ground_y;
    world.hazards.obstacles.push(StaticObstacle {
        kind: ObstacleKind::Spike,
        bounds: Aabb::new(x, ground - 20.0, w, 20.0),
    });
}

fn stationary(x: f32) -> EnemyDef {
    EnemyDef {
        kind: EnemyKind::Stationary,
        x,
        y: 370.0,
        patrol_range: 0.0,
    }
}

fn corridor_level() -> LevelDef {
    let mut level = flat_level(5000.0);
    level.corridors.push(CorridorDef {
        start_x: 300.0,
        end_x: 3000.0,
        gap: 220.0,
        min_gap: 120.0,
        amplitude: 40.0,
        wavelength: 120.0,
        moving_spikes: false,
        rotating_blocks: false,
        coins: false,
    });
    level
}

/// Steps until the player is inside the first corridor.
fn fly_into_corridor(world: &mut RunWorld) {
    for _ in 0..100 {
        world.step(&idle());
        if world.player.corridor_mode {
            return;
        }
    }
    panic!("never reached the corridor");
}

// -----------------------------------------------------------------------------
// Damage and death
// -----------------------------------------------------------------------------

#[test]
fn test_spike_hit_then_invincibility_window() {
    let mut world = world_for(&flat_level(5000.0));
    place_spike(&mut world, 100.0, 60.0);

    assert_eq!(world.step(&idle()), None);
    assert_eq!(world.player.health, 2);
    assert!(!world.player.dead);
    assert!(world.player.invincibility.is_active());
    assert!(
        world
            .events
            .contains(&FrameEvent::PlayerDamaged { health: 2 })
    );

    // Still on the spike for a few more frames.
    for _ in 0..4 {
        world.step(&idle());
        assert!(overlaps_spike(&world));
        assert_eq!(world.player.health, 2);
    }
}

fn overlaps_spike(world: &RunWorld) -> bool {
    let bounds = world.player.bounds();
    world
        .hazards
        .spikes()
        .any(|s| crate::physics::overlap(&bounds, &s.bounds))
}

#[test]
fn test_shield_absorbs_spike() {
    let mut world = world_for(&flat_level(5000.0));
    assert!(world.player.collect_powerup(PowerupKind::Shield));
    world.step(&FrameInput {
        use_slot: Some(0),
        ..idle()
    });
    assert!(world.player.shield.is_active());
    assert!(world.events.contains(&FrameEvent::PowerupUsed {
        kind: PowerupKind::Shield
    }));

    let x = world.player.x;
    place_spike(&mut world, x, 60.0);
    world.step(&idle());
    assert_eq!(world.player.health, 3);
    assert!(world.events.contains(&FrameEvent::ShieldAbsorbed));
    assert!(!world.player.invincibility.is_active());
}

#[test]
fn test_last_hit_reports_score_and_kills_once() {
    let mut world = world_for(&flat_level(5000.0));
    for _ in 0..200 {
        assert_eq!(world.step(&idle()), None);
    }
    world.player.health = 1;
    world.kills = 2;
    let x = world.player.x;
    place_spike(&mut world, x, 100.0);

    let outcome = world.step(&idle());
    let score = world.score();
    assert!(score > 0);
    assert_eq!(outcome, Some(RunOutcome::Died { score, kills: 2 }));
    assert!(
        world
            .events
            .contains(&FrameEvent::PlayerDied { score, kills: 2 })
    );
    assert_eq!(world.player.health, 0);
    assert!(world.player.dead);

    // Terminal: nothing else happens.
    let frame = world.frame;
    let x = world.player.x;
    assert_eq!(world.step(&idle()), None);
    assert_eq!(world.frame, frame);
    assert_eq!(world.player.x, x);
    assert!(world.is_over());
}

// -----------------------------------------------------------------------------
// Movement
// -----------------------------------------------------------------------------

#[test]
fn test_forced_scroll_and_camera_follow() {
    let mut world = world_for(&flat_level(5000.0));
    let start = world.player.x;
    for _ in 0..120 {
        world.step(&idle());
    }
    assert!(world.player.x > start + 5.0 * 120.0 - 1.0);
    assert!(world.player.on_ground);
    assert!(world.camera.x > 0.0);
    assert!(world.camera.x < world.player.x);
}

#[test]
fn test_held_jump_leaves_ground_and_lands_once() {
    let mut world = world_for(&flat_level(5000.0));
    world.step(&FrameInput {
        jump_held: true,
        jump_pressed: true,
        ..idle()
    });
    assert!(!world.player.on_ground);
    assert!(world.player.vy < 0.0);

    let mut landings = 0;
    for _ in 0..120 {
        world.step(&idle());
        landings += world
            .events
            .iter()
            .filter(|e| **e == FrameEvent::PlayerLanded)
            .count();
    }
    assert_eq!(landings, 1);
    assert!(world.player.on_ground);
    assert!(world.player.squash.remaining() < world.tuning.squash_frames);
}

#[test]
fn test_rides_vertical_platform_without_relanding() {
    let mut world = world_for(&flat_level(5000.0));
    let def = ObstacleDef {
        kind: ObstacleKind::Platform,
        x: 100.0,
        y: 300.0,
        w: 2000.0,
        h: 16.0,
        motion: None,
    };
    let motion = MotionDef {
        axis: Axis::Vertical,
        range: 60.0,
        speed: 1.2,
    };
    world
        .hazards
        .moving_platforms
        .push(MovingPlatform::new(&def, &motion));
    world.player.x = 200.0;
    world.player.y = 270.0;
    world.player.vy = 0.0;
    world.player.on_ground = true;

    // Covers the descent, both turnarounds and the climb.
    for frame in 0..120 {
        world.step(&idle());
        let top = world.hazards.moving_platforms[0].bounds().y;
        assert!(world.player.on_ground, "dropped off on frame {}", frame);
        assert!((world.player.y + world.player.size - top).abs() < 1e-3);
        assert!(!world.events.contains(&FrameEvent::PlayerLanded));
    }
}

// -----------------------------------------------------------------------------
// Corridor
// -----------------------------------------------------------------------------

#[test]
fn test_corridor_entry_switches_to_flight() {
    let mut world = world_for(&corridor_level());
    fly_into_corridor(&mut world);
    assert!(world.events.contains(&FrameEvent::CorridorEntered));
    assert!(world.player.is_flying());
    assert!(!world.player.on_ground);

    // No gravity build-up: vertical speed stays within the flight cap.
    let cap = world.tuning.flight_max_vertical;
    for frame in 0..90 {
        let input = FrameInput {
            jump_held: frame % 20 < 10,
            ..idle()
        };
        world.player.invincibility.start(10);
        world.step(&input);
        assert!(world.player.corridor_mode);
        assert!(world.player.vy.abs() <= cap);
    }
}

#[test]
fn test_corridor_walls_only_hurt_on_spiked_side() {
    let mut world = world_for(&corridor_level());
    fly_into_corridor(&mut world);

    let (mut spiked, mut safe) = (0, 0);
    for _ in 0..20 {
        for _ in 0..6 {
            world.player.invincibility.start(10);
            world.step(&idle());
        }
        world.player.invincibility.clear();
        world.player.health = world.player.max_health;
        world.player.y = 0.0;
        world.player.vy = 0.0;
        world.step(&idle());

        let x = world.player.center().x;
        let corridor = &world.hazards.corridors[0];
        let (top, _) = corridor.gap_bounds(x, world.frame, world.tuning.ground_y);
        assert_eq!(world.player.y, top, "pushed back into the gap");
        if spike_side(segment_index(x)) == SpikeSide::Ceiling {
            assert_eq!(world.player.health, world.player.max_health - 1);
            spiked += 1;
        } else {
            assert_eq!(world.player.health, world.player.max_health);
            safe += 1;
        }
    }
    assert!(spiked > 0 && safe > 0);
}

#[test]
fn test_no_shooting_inside_corridor() {
    let mut world = world_for(&corridor_level());
    fly_into_corridor(&mut world);
    for _ in 0..30 {
        world.player.invincibility.start(10);
        world.step(&FrameInput {
            shoot: true,
            ..idle()
        });
    }
    assert!(world.bullets.is_empty());
}

#[test]
fn test_leaving_corridor_restores_gravity() {
    let mut level = corridor_level();
    level.corridors[0].end_x = 500.0;
    let mut world = world_for(&level);
    fly_into_corridor(&mut world);

    let mut exited = false;
    for _ in 0..120 {
        world.player.invincibility.start(10);
        world.step(&idle());
        exited |= world.events.contains(&FrameEvent::CorridorExited);
    }
    assert!(exited);
    assert!(!world.player.corridor_mode);
    assert!(world.player.on_ground);
}

// -----------------------------------------------------------------------------
// Pickups and weapons
// -----------------------------------------------------------------------------

#[test]
fn test_magnet_pulls_coins_in() {
    let level = flat_level(5000.0);
    let coin = CoinPickup {
        pos: Vec2::new(300.0, 300.0),
        value: 5,
        collected: false,
    };

    let mut plain = world_for(&level);
    plain.coins.push(coin.clone());
    for _ in 0..60 {
        plain.step(&idle());
    }
    assert_eq!(plain.coins_collected, 0, "coin is out of reach without a magnet");

    let mut magnetic = RunWorld::new(
        &level,
        &SimTuning::default(),
        &StartingUpgrades {
            magnet_frames: 600,
            ..Default::default()
        },
        SEED,
    );
    magnetic.coins.push(coin);
    for _ in 0..60 {
        magnetic.step(&idle());
    }
    assert_eq!(magnetic.coins_collected, 5);
    assert!(magnetic.coins[0].collected);
}

#[test]
fn test_magnet_pull_and_powerup_pickup_share_a_frame() {
    let mut world = RunWorld::new(
        &flat_level(5000.0),
        &SimTuning::default(),
        &StartingUpgrades {
            magnet_frames: 600,
            ..Default::default()
        },
        SEED,
    );
    // Five pixels clear of the player's head, well inside one frame of pull.
    let center = world.player.center();
    let gap = world.player.size / 2.0 + super::world::POWERUP_SIZE / 2.0 + 5.0;
    world.powerups.push(PowerupPickup {
        kind: PowerupKind::Bomb,
        pos: center - Vec2::new(0.0, gap),
        collected: false,
    });
    world.step(&idle());
    assert!(world.powerups[0].collected);
    assert_eq!(world.player.inventory.slots()[0], Some(PowerupKind::Bomb));
    assert!(world.events.contains(&FrameEvent::PowerupCollected {
        kind: PowerupKind::Bomb
    }));
}

#[test]
fn test_full_inventory_leaves_pickup() {
    let mut world = world_for(&flat_level(5000.0));
    for kind in [PowerupKind::Shield, PowerupKind::Bomb, PowerupKind::Rocket] {
        assert!(world.player.collect_powerup(kind));
    }
    let center = world.player.center();
    world.powerups.push(PowerupPickup {
        kind: PowerupKind::Magnet,
        pos: center + Vec2::new(5.0, 0.0),
        collected: false,
    });
    world.step(&idle());
    assert!(!world.powerups[0].collected);

    world.step(&FrameInput {
        use_slot: Some(1),
        ..idle()
    });
    world.powerups[0].pos = world.player.center();
    world.step(&idle());
    assert!(world.powerups[0].collected);
    assert_eq!(world.player.inventory.slots()[1], Some(PowerupKind::Magnet));
}

fn shoot_once_at_two_enemies(super_bullet_frames: u32) -> RunWorld {
    let mut level = flat_level(5000.0);
    level.enemies = vec![stationary(400.0), stationary(440.0)];
    let mut world = RunWorld::new(
        &level,
        &SimTuning::default(),
        &StartingUpgrades {
            super_bullet_frames,
            ..Default::default()
        },
        SEED,
    );
    world.step(&FrameInput {
        shoot: true,
        ..idle()
    });
    for _ in 0..40 {
        world.step(&idle());
    }
    world
}

#[test]
fn test_plain_bullet_stops_at_first_enemy() {
    let world = shoot_once_at_two_enemies(0);
    assert_eq!(world.kills, 1);
    assert!(!world.enemies[0].alive);
    assert!(world.enemies[1].alive);
}

#[test]
fn test_super_bullet_pierces() {
    let world = shoot_once_at_two_enemies(600);
    assert_eq!(world.kills, 2);
    assert!(world.enemies.iter().all(|e| !e.alive));
}

#[test]
fn test_bomb_explodes_on_ground_and_kills_nearby_enemy() {
    let mut level = flat_level(5000.0);
    level.enemies.push(stationary(360.0));
    let mut world = world_for(&level);
    assert!(world.player.collect_powerup(PowerupKind::Bomb));
    world.step(&FrameInput {
        use_slot: Some(0),
        ..idle()
    });
    assert_eq!(world.bombs.len(), 1);

    let mut exploded = false;
    for _ in 0..60 {
        world.step(&idle());
        if world
            .events
            .iter()
            .any(|e| matches!(e, FrameEvent::BombExploded { .. }))
        {
            exploded = true;
            break;
        }
    }
    assert!(exploded);
    assert!(world.bombs.is_empty());
    assert_eq!(world.kills, 1);
    assert_eq!(world.player.health, 3);
}

#[test]
fn test_stomp_kills_and_bounces() {
    let mut level = flat_level(5000.0);
    level.enemies.push(stationary(300.0));
    let mut world = world_for(&level);

    // Drop onto the enemy from above.
    world.step(&idle());
    world.player.x = 295.0;
    world.player.y = 335.0;
    world.player.vy = 6.0;
    world.player.on_ground = false;
    world.step(&idle());

    assert_eq!(world.kills, 1);
    assert!(!world.enemies[0].alive);
    assert!(world.player.vy < 0.0);
    assert_eq!(world.player.health, 3);
}

// -----------------------------------------------------------------------------
// Boss flow
// -----------------------------------------------------------------------------

#[test]
fn test_arena_entry_intro_and_level_completion() {
    let mut level = flat_level(400.0);
    level.boss.hp = 1;
    level.boss.phases = 1;
    let mut world = world_for(&level);

    let mut outcomes = Vec::new();
    let mut saw = (false, false, false);
    for _ in 0..1000 {
        let phase = world.boss_phase;
        if let Some(outcome) = world.step(&FrameInput {
            shoot: true,
            ..idle()
        }) {
            outcomes.push(outcome);
        }
        saw.0 |= world
            .events
            .iter()
            .any(|e| matches!(e, FrameEvent::BossSpawned { .. }));
        saw.1 |= world.events.contains(&FrameEvent::BossFightStarted);
        saw.2 |= world.events.contains(&FrameEvent::BossDefeated);
        if phase == BossPhase::None && world.boss_phase == BossPhase::Intro {
            assert!(world.camera.is_locked());
            assert_eq!(world.player.x, world.arena_left() + 60.0);
        }
    }

    assert!(saw.0 && saw.1 && saw.2);
    assert_eq!(outcomes.len(), 1);
    let RunOutcome::LevelComplete { score, kills, .. } = outcomes[0] else {
        panic!("expected level completion, got {:?}", outcomes[0]);
    };
    assert_eq!(score, world.score());
    assert_eq!(kills, 0);
    assert_eq!(world.boss_phase, BossPhase::Defeated);
}

#[test]
fn test_boss_intro_freezes_player() {
    let mut world = world_for(&flat_level(400.0));
    while world.boss_phase == BossPhase::None {
        world.step(&idle());
    }
    let x = world.player.x;
    for _ in 0..10 {
        world.step(&FrameInput {
            right: true,
            jump_held: true,
            ..idle()
        });
    }
    assert_eq!(world.boss_phase, BossPhase::Intro);
    assert_eq!(world.player.x, x);
}

#[test]
fn test_arena_movement_is_manual_and_clamped() {
    let mut world = world_for(&flat_level(400.0));
    while world.boss_phase != BossPhase::Fight {
        world.step(&idle());
    }
    let x = world.player.x;
    world.step(&idle());
    assert_eq!(world.player.x, x, "no forced scroll in the arena");

    for _ in 0..40 {
        world.player.invincibility.start(10);
        world.step(&FrameInput {
            left: true,
            ..idle()
        });
    }
    assert_eq!(world.player.x, world.arena_left());
}

// -----------------------------------------------------------------------------
// Mid-frame hits
// -----------------------------------------------------------------------------

/// Runs well past the start so the camera is following, then leaves the player on 1 HP.
fn one_hit_from_death() -> RunWorld {
    let mut world = world_for(&flat_level(5000.0));
    for _ in 0..200 {
        world.step(&idle());
    }
    world.player.health = 1;
    world
}

/// A lethal hit ends the frame where it lands: later stages such as the camera never run.
fn assert_died_mid_frame(world: &mut RunWorld) {
    let camera = world.camera.x;
    let outcome = world.step(&idle());
    assert!(matches!(outcome, Some(RunOutcome::Died { .. })), "{:?}", outcome);
    assert_eq!(world.camera.x, camera);
    assert_eq!(world.step(&idle()), None);
}

#[test]
fn test_pendulum_kill_stops_the_frame() {
    let mut world = one_hit_from_death();
    let x = world.player.x;
    world.hazards.pendulums.push(Pendulum::from_def(&PendulumDef {
        pivot_x: x + 20.0,
        pivot_y: 0.0,
        length: 380.0,
        amplitude: 0.0,
        speed: 0.0,
        phase: 0.0,
        ball_radius: 18.0,
    }));
    assert_died_mid_frame(&mut world);
}

#[test]
fn test_falling_block_kill_stops_the_frame() {
    let mut world = one_hit_from_death();
    let x = world.player.x;
    world.hazards.falling_blocks.push(FallingBlock {
        bounds: Aabb::new(x, 330.0, 60.0, 40.0),
        state: FallingBlockState::Falling { vy: 1.0 },
    });
    assert_died_mid_frame(&mut world);
}

#[test]
fn test_enemy_bullet_hits_and_is_spent() {
    let mut world = world_for(&flat_level(5000.0));
    let center = world.player.center();
    world.enemy_bullets.push(Projectile::new(
        center + Vec2::new(10.0, 0.0),
        Vec2::ZERO,
        Vec2::splat(10.0),
        1,
    ));
    assert_eq!(world.step(&idle()), None);
    assert_eq!(world.player.health, 2);
    assert!(world.enemy_bullets.is_empty());
    assert!(
        world
            .events
            .contains(&FrameEvent::PlayerDamaged { health: 2 })
    );
}

#[test]
fn test_cage_breaks_under_a_falling_player() {
    let mut world = world_for(&flat_level(5000.0));
    world.cages.push(Cage {
        bounds: Aabb::new(300.0, 360.0, 40.0, 40.0),
        skin: "crimson".to_string(),
        broken: false,
    });

    world.step(&idle());
    world.player.x = 295.0;
    world.player.y = 335.0;
    world.player.vy = 6.0;
    world.player.on_ground = false;
    world.step(&idle());

    assert!(world.cages[0].broken);
    assert_eq!(world.freed_skins, vec!["crimson".to_string()]);
    assert!(world.player.vy < 0.0);
    assert!(world.events.contains(&FrameEvent::CageBroken {
        skin: "crimson".to_string()
    }));
}

// -----------------------------------------------------------------------------
// Boss contact and hazards
// -----------------------------------------------------------------------------

/// Steps a short level with the given boss until the fight begins.
fn boss_fight(kind: BossType, hp: i32, phases: u8) -> RunWorld {
    let mut level = flat_level(400.0);
    level.boss.kind = kind;
    level.boss.hp = hp;
    level.boss.phases = phases;
    let mut world = world_for(&level);
    for _ in 0..1000 {
        if world.boss_phase == BossPhase::Fight {
            return world;
        }
        world.step(&idle());
    }
    panic!("fight never started");
}

fn boss_kind(world: &mut RunWorld) -> &mut BossKind {
    &mut world.boss.as_mut().expect("boss spawned").kind
}

/// Parks the Guardian on the ground and keeps it there for the next frame.
fn grounded_guardian() -> RunWorld {
    let mut world = boss_fight(BossType::Guardian, 5, 2);
    let ground = world.tuning.ground_y;
    let BossKind::Guardian(guardian) = boss_kind(&mut world) else {
        panic!("expected the Guardian");
    };
    guardian.jump_timer.start(1000);
    let boss = world.boss.as_mut().expect("boss spawned");
    boss.core.y = ground - boss.core.h;
    world
}

#[test]
fn test_boss_stomp_damages_boss_and_bounces() {
    let mut world = grounded_guardian();
    let body = world.boss.as_ref().expect("boss spawned").bounds();
    world.player.x = body.x + 10.0;
    world.player.y = body.y - 25.0;
    world.player.vy = 6.0;
    world.player.on_ground = false;

    assert_eq!(world.step(&idle()), None);
    assert_eq!(world.boss.as_ref().expect("boss spawned").core.hp, 4);
    assert!(world.player.vy < 0.0);
    assert_eq!(world.player.health, 3);
}

#[test]
fn test_boss_side_contact_hurts_player() {
    let mut world = grounded_guardian();
    let body = world.boss.as_ref().expect("boss spawned").bounds();
    world.player.x = body.x - 20.0;

    assert_eq!(world.step(&idle()), None);
    assert_eq!(world.player.health, 2);
    assert_eq!(world.boss.as_ref().expect("boss spawned").core.hp, 5);
}

#[test]
fn test_boss_hazard_spawned_this_frame_hits_next_frame() {
    let mut world = boss_fight(BossType::Core, 40, 3);
    let BossKind::Core(core) = boss_kind(&mut world) else {
        panic!("expected the Core");
    };
    core.teleport_timer.start(1000);
    core.beam_timer.start(1);
    world.step(&idle());

    // Re-aim the new beam at the player and leave one warning frame.
    let x = world.player.center().x;
    let BossKind::Core(core) = boss_kind(&mut world) else {
        panic!("expected the Core");
    };
    core.beam_timer.start(1000);
    assert_eq!(core.beams.len(), 1);
    core.beams[0].x = x;
    core.beams[0].warning = Countdown::new(1);

    world.step(&idle());
    assert!(!world.boss.as_ref().expect("boss spawned").hazards().is_empty());
    assert_eq!(world.player.health, 3, "beam went live after the hazard check");

    world.step(&idle());
    assert_eq!(world.player.health, 2);
}

#[test]
fn test_core_pulse_hurts_anywhere_inside_its_radius() {
    let mut world = boss_fight(BossType::Core, 40, 3);
    let BossKind::Core(core) = boss_kind(&mut world) else {
        panic!("expected the Core");
    };
    core.teleport_timer.start(1000);
    core.beam_timer.start(1000);
    let boss = world.boss.as_mut().expect("boss spawned");
    boss.take_damage(1);
    assert_eq!(boss.core.phase, 2);
    let center = boss.core.center();

    // Level with the center and 95 px out: clear of the body, inside the ring.
    world.player.x = center.x + 95.0;
    world.player.y = center.y - world.player.size / 2.0;
    world.player.vy = 0.0;
    world.player.on_ground = false;

    assert_eq!(world.step(&idle()), None);
    assert_eq!(world.player.health, 2);
}

#[test]
fn test_ice_pillar_hurts_only_once_grown() {
    let mut world = boss_fight(BossType::FrostKing, 30, 2);
    let x = world.player.center().x;
    let BossKind::FrostKing(frost) = boss_kind(&mut world) else {
        panic!("expected the FrostKing");
    };
    frost.fan_timer.start(1000);
    frost.pillar_timer.start(1000);
    frost.teleport_timer.start(1000);
    frost.pillars.push(IcePillar::new(x));

    world.step(&idle());
    assert_eq!(world.player.health, 3, "warning markers are harmless");

    let BossKind::FrostKing(frost) = boss_kind(&mut world) else {
        panic!("expected the FrostKing");
    };
    frost.pillars[0] = IcePillar {
        x,
        height: 100.0,
        warning: Countdown::default(),
        lifetime: Countdown::new(60),
    };
    world.step(&idle());
    assert_eq!(world.player.health, 2);
}

// -----------------------------------------------------------------------------
// Determinism
// -----------------------------------------------------------------------------

fn scripted_input(frame: usize) -> FrameInput {
    FrameInput {
        jump_held: frame % 45 < 12,
        jump_pressed: frame % 45 == 0,
        shoot: frame % 3 == 0,
        left: false,
        right: frame % 7 == 0,
        use_slot: None,
    }
}

fn busy_level() -> LevelDef {
    let mut level = flat_level(1500.0);
    level.boss.kind = BossType::Core;
    level.boss.name = "Core".to_string();
    level.boss.hp = 40;
    level.boss.phases = 3;
    level.enemies = vec![
        EnemyDef {
            kind: EnemyKind::Shooter,
            x: 900.0,
            y: 370.0,
            patrol_range: 0.0,
        },
        EnemyDef {
            kind: EnemyKind::Flier,
            x: 700.0,
            y: 250.0,
            patrol_range: 60.0,
        },
    ];
    level.pendulums.push(PendulumDef {
        pivot_x: 600.0,
        pivot_y: 0.0,
        length: 200.0,
        amplitude: 0.8,
        speed: 0.05,
        phase: 0.0,
        ball_radius: 18.0,
    });
    level
}

fn trace(seed: u64) -> Vec<String> {
    let mut world = RunWorld::new(
        &busy_level(),
        &SimTuning::default(),
        &StartingUpgrades::default(),
        seed,
    );
    let mut frames = Vec::new();
    for frame in 0..900 {
        world.player.invincibility.start(10);
        world.step(&scripted_input(frame));
        frames.push(serde_json::to_string(&world.snapshot()).expect("snapshot serializes"));
    }
    frames
}

#[test]
fn test_same_seed_same_trajectory() {
    let a = trace(7);
    let b = trace(7);
    assert_eq!(a.len(), b.len());
    for (frame, (x, y)) in a.iter().zip(&b).enumerate() {
        assert_eq!(x, y, "diverged on frame {}", frame);
    }
}
