//! Run domain: the fixed per-frame pipeline.
//!
//! The order of the stages below is part of the game's feel. In particular the boss hazards are
//! tested against the player before the boss advances, so a hazard spawned this frame can only
//! hurt on the next one.

use bevy::prelude::*;

use crate::bosses::{Boss, BossContext, BossHit};
use crate::content::{Axis, PowerupKind};
use crate::hazards::{CORRIDOR_COIN_RADIUS, Corridor, WallContact};
use crate::physics::{
    Aabb, Projectile, apply_gravity, clamp_to_ground, distance_to_box, landing_collision, overlap,
    stomp_check,
};
use crate::player::DamageResult;
use crate::run::events::{FrameEvent, RunOutcome};
use crate::run::input::FrameInput;
use crate::run::particles::ParticleTint;
use crate::run::world::{
    ARENA_ENTRY_OFFSET, BossPhase, COIN_RADIUS, INVENTORY_DISPLAY_INTERVAL, PlayerBullet, RunWorld,
};

const BULLET_SIZE: Vec2 = Vec2::new(12.0, 6.0);
const ENEMY_BULLET_SIZE: Vec2 = Vec2::new(10.0, 10.0);
const BOMB_SIZE: Vec2 = Vec2::new(16.0, 16.0);
const BOMB_LAUNCH: Vec2 = Vec2::new(6.0, -7.0);
/// Past the viewport edge before a projectile is dropped.
const OFFSCREEN_MARGIN: f32 = 50.0;
const DISPLAYED_SCORE_EASING: f32 = 0.1;

impl RunWorld {
    /// Advances one frame. Returns the run's outcome on the frame it ends, exactly once;
    /// afterwards every call is a no-op returning `None`.
    pub fn step(&mut self, input: &FrameInput) -> Option<RunOutcome> {
        if self.is_over() {
            return None;
        }
        self.events.clear();
        self.frame += 1;

        let outcome = self.advance(input);
        if let Some(outcome) = outcome {
            info!("Run ended on frame {}: {:?}", self.frame, outcome);
            self.outcome = Some(outcome);
        }
        outcome
    }

    fn advance(&mut self, input: &FrameInput) -> Option<RunOutcome> {
        // Post-victory delay, then level complete.
        if self.boss_phase == BossPhase::Defeated {
            self.camera.update(self.player.x);
            self.particles.update();
            self.victory_timer.tick();
            if !self.victory_timer.is_active() {
                return Some(self.complete_level());
            }
            return None;
        }

        // Boss intro: everything but camera and particles is frozen.
        if self.boss_phase == BossPhase::Intro {
            self.camera.update(self.player.x);
            self.particles.update();
            self.intro_timer.tick();
            if !self.intro_timer.is_active() {
                self.boss_phase = BossPhase::Fight;
                if let Some(boss) = self.boss.as_mut() {
                    boss.end_intro();
                }
                self.events.push(FrameEvent::BossFightStarted);
                debug!("Boss fight started on frame {}", self.frame);
            }
            return None;
        }

        if self.boss_phase == BossPhase::None && self.player.x >= self.arena_left() {
            self.enter_arena();
        }
        self.update_corridor_mode();

        self.player.tick_timers();
        for platform in &mut self.hazards.moving_platforms {
            platform.update();
        }
        self.move_player(input);
        self.resolve_jump(input);
        self.resolve_vertical();
        if self.boss_phase != BossPhase::None {
            let max_x = self.arena_right() - self.player.size;
            self.player.x = self.player.x.clamp(self.arena_left(), max_x);
        }

        self.update_bullets(input);
        self.update_bombs();
        self.activate_powerup(input);
        self.apply_magnet();
        self.collect_powerups();
        self.collect_coins();
        self.break_cages();

        if let Some(outcome) = self.update_dynamic_hazards() {
            return Some(outcome);
        }
        self.update_enemies();
        if let Some(outcome) = self.update_enemy_bullets() {
            return Some(outcome);
        }
        self.bullets_vs_enemies();
        self.bullets_vs_boss();
        if let Some(outcome) = self.player_vs_boss() {
            return Some(outcome);
        }
        if let Some(outcome) = self.boss_hazards_vs_player() {
            return Some(outcome);
        }
        self.update_boss();
        if let Some(outcome) = self.player_vs_enemies() {
            return Some(outcome);
        }
        if let Some(outcome) = self.spike_collisions() {
            return Some(outcome);
        }
        if let Some(outcome) = self.corridor_collisions() {
            return Some(outcome);
        }

        self.advance_cosmetics();
        None
    }

    // ------------------------------------------------------------------
    // Terminal outcomes
    // ------------------------------------------------------------------

    /// Applies damage to the player and turns a fatal hit into the run's death.
    fn hurt_player(&mut self, amount: i32) -> Option<RunOutcome> {
        match self.player.take_damage(amount) {
            DamageResult::Ignored => None,
            DamageResult::Absorbed => {
                self.events.push(FrameEvent::ShieldAbsorbed);
                None
            }
            DamageResult::Hurt => {
                self.events.push(FrameEvent::PlayerDamaged {
                    health: self.player.health,
                });
                self.particles
                    .burst(self.player.center(), 8, 3.0, ParticleTint::Damage);
                None
            }
            DamageResult::Died => {
                self.events.push(FrameEvent::PlayerDamaged { health: 0 });
                let score = self.score();
                self.events.push(FrameEvent::PlayerDied {
                    score,
                    kills: self.kills,
                });
                Some(RunOutcome::Died {
                    score,
                    kills: self.kills,
                })
            }
        }
    }

    fn complete_level(&mut self) -> RunOutcome {
        let score = self.score();
        self.events.push(FrameEvent::LevelCompleted {
            score,
            kills: self.kills,
            coins: self.coins_collected,
        });
        RunOutcome::LevelComplete {
            score,
            kills: self.kills,
            coins: self.coins_collected,
        }
    }

    fn credit_kill(&mut self, at: Vec2) {
        self.kills += 1;
        self.events.push(FrameEvent::EnemyKilled { kills: self.kills });
        self.particles.burst(at, 10, 3.5, ParticleTint::Spark);
    }

    // ------------------------------------------------------------------
    // Phase transitions
    // ------------------------------------------------------------------

    fn enter_arena(&mut self) {
        let arena_left = self.arena_left();
        let boss = Boss::spawn(&self.level.boss, arena_left, &self.tuning);
        info!(
            "Entering arena at x={} ({} with {} hp, {} phases)",
            arena_left, boss.core.name, boss.core.max_hp, boss.core.total_phases
        );
        self.events.push(FrameEvent::BossSpawned {
            kind: boss.boss_type(),
        });
        self.boss = Some(boss);
        self.boss_phase = BossPhase::Intro;
        self.intro_timer.start(self.tuning.boss_intro_frames);
        self.camera.lock_to_arena(arena_left);

        let player = &mut self.player;
        player.x = arena_left + ARENA_ENTRY_OFFSET;
        player.y = self.tuning.ground_y - player.size;
        player.rocket.clear();
        player.corridor_mode = false;
        player.land();
        self.active_corridor = None;
        self.enemy_bullets.clear();
        self.particles.clear();
    }

    /// Enters or leaves corridor mode when the player crosses a corridor edge.
    fn update_corridor_mode(&mut self) {
        if self.boss_phase != BossPhase::None {
            return;
        }
        let x = self.player.center().x;
        let current = self.hazards.corridor_at(x);
        match (self.active_corridor, current) {
            (None, Some(index)) => {
                let corridor = &self.hazards.corridors[index];
                let center = corridor.gap_center(x, self.frame, self.tuning.ground_y);
                self.player.corridor_mode = true;
                self.player.on_ground = false;
                self.player.vy = 0.0;
                self.player.y = center - self.player.size / 2.0;
                self.events.push(FrameEvent::CorridorEntered);
                debug!("Entered corridor {} at x={}", index, x);
            }
            (Some(_), None) => {
                self.player.corridor_mode = false;
                self.player.vy = 0.0;
                self.events.push(FrameEvent::CorridorExited);
                debug!("Left corridor at x={}", x);
            }
            _ => {}
        }
        self.active_corridor = current;
    }

    // ------------------------------------------------------------------
    // Player movement
    // ------------------------------------------------------------------

    /// Forced scroll outside the arena (faster while flying), manual left/right inside it.
    /// Flying steers vertically in both cases.
    fn move_player(&mut self, input: &FrameInput) {
        let tuning = &self.tuning;
        let player = &mut self.player;
        let flying = player.is_flying();

        if self.boss_phase == BossPhase::None {
            let distance = player.x - tuning.player_start_x;
            let mut speed = tuning.run_speed(distance);
            if player.corridor_mode {
                speed *= tuning.corridor_speed_mult;
            } else if flying {
                speed *= tuning.rocket_speed_mult;
            }
            player.x += speed;
        } else {
            if input.left {
                player.x -= tuning.arena_move_speed;
            }
            if input.right {
                player.x += tuning.arena_move_speed;
            }
        }

        if flying {
            player.steer_flight(
                input.jump_held,
                tuning.flight_accel,
                tuning.flight_max_vertical,
                0.0,
                tuning.ground_y - player.size,
            );
        }
    }

    /// Ground jump, double jump or float; at most one per frame.
    fn resolve_jump(&mut self, input: &FrameInput) {
        let tuning = &self.tuning;
        let player = &mut self.player;
        if player.is_flying() {
            return;
        }
        if player.on_ground {
            if input.jump_held {
                player.jump(tuning.jump_velocity);
            }
        } else if input.jump_pressed && player.has_double_jump && player.double_jump_available {
            player.double_jump(tuning.jump_velocity);
        } else if input.jump_held && !(player.has_double_jump && player.double_jump_available) {
            player.fly(tuning.fly_force, tuning.fly_max_ascent);
        }
    }

    /// Gravity, then static platforms, moving platforms and the ground, in that order.
    fn resolve_vertical(&mut self) {
        if self.player.is_flying() {
            return;
        }
        let was_grounded = self.player.on_ground;
        let player = &mut self.player;
        apply_gravity(&mut player.y, &mut player.vy, self.tuning.gravity);

        let bounds = player.bounds();
        let mut support = self
            .hazards
            .platforms()
            .map(|p| p.bounds)
            .chain(
                self.hazards
                    .falling_blocks
                    .iter()
                    .filter(|b| b.is_landed())
                    .map(|b| b.bounds),
            )
            .find(|platform| landing_collision(&bounds, player.vy, platform))
            .map(|platform| (platform.y, 0.0));

        if support.is_none() {
            support = self.hazards.moving_platforms.iter().find_map(|mp| {
                let platform = mp.bounds();
                let landed = landing_collision(&bounds, player.vy, &platform)
                    || (was_grounded && landing_collision(&bounds, player.vy, &mp.previous_bounds()));
                landed.then(|| {
                    // Vertical motion is carried by snapping to the new top.
                    let carry = match mp.axis {
                        Axis::Horizontal => mp.last_delta,
                        Axis::Vertical => 0.0,
                    };
                    (platform.y, carry)
                })
            });
        }

        let grounded = match support {
            Some((top, carry)) => {
                player.y = top - player.size;
                player.x += carry;
                true
            }
            None => clamp_to_ground(
                &mut player.y,
                &mut player.vy,
                player.size,
                self.tuning.ground_y,
            ),
        };

        if grounded {
            player.land();
            if !was_grounded {
                player.trigger_squash();
                self.events.push(FrameEvent::PlayerLanded);
            }
        } else {
            player.on_ground = false;
        }
    }

    // ------------------------------------------------------------------
    // Player projectiles
    // ------------------------------------------------------------------

    fn view_left(&self) -> f32 {
        self.camera.x - OFFSCREEN_MARGIN
    }

    fn view_right(&self) -> f32 {
        self.camera.x + self.tuning.viewport_width + OFFSCREEN_MARGIN
    }

    /// Shooting is disabled inside a corridor.
    fn update_bullets(&mut self, input: &FrameInput) {
        if input.shoot && !self.player.corridor_mode && self.player.try_shoot() {
            self.bullets.push(PlayerBullet {
                shot: Projectile::new(
                    self.player.center(),
                    Vec2::new(self.tuning.bullet_speed, 0.0),
                    BULLET_SIZE,
                    1,
                ),
                piercing: self.player.super_bullet.is_active(),
                hit: Vec::new(),
            });
        }

        let (left, right) = (self.view_left(), self.view_right());
        let ground = self.tuning.ground_y;
        for bullet in &mut self.bullets {
            bullet.shot.advance();
        }
        self.bullets
            .retain(|b| !b.shot.is_outside(left, right, -OFFSCREEN_MARGIN, ground));
    }

    /// Bombs arc under gravity and explode on reaching the ground.
    fn update_bombs(&mut self) {
        let ground = self.tuning.ground_y;
        let mut exploded = Vec::new();
        self.bombs.retain_mut(|bomb| {
            bomb.advance();
            if bomb.bottom() >= ground {
                exploded.push(bomb.pos);
                false
            } else {
                true
            }
        });
        for at in exploded {
            self.explode_bomb(at);
        }
    }

    fn explode_bomb(&mut self, at: Vec2) {
        let radius = self.tuning.bomb_radius;
        let damage = self.tuning.bomb_damage;
        self.events.push(FrameEvent::BombExploded { x: at.x, y: at.y });
        self.particles.burst(at, 16, 5.0, ParticleTint::Explosion);

        for i in 0..self.enemies.len() {
            let enemy = &mut self.enemies[i];
            if enemy.alive && enemy.center().distance(at) <= radius && enemy.take_damage(damage) {
                let center = enemy.center();
                self.credit_kill(center);
            }
        }

        if self.boss_phase == BossPhase::Fight {
            let area = Aabb::centered(at, Vec2::splat(radius * 2.0));
            let hit = self.boss.as_mut().map(|boss| {
                boss.damage_minions(&area, damage);
                if distance_to_box(at, &boss.bounds()) <= radius {
                    boss.take_damage(damage)
                } else {
                    BossHit::Ignored
                }
            });
            if let Some(hit) = hit {
                self.handle_boss_hit(hit);
            }
        }
    }

    // ------------------------------------------------------------------
    // Pickups
    // ------------------------------------------------------------------

    fn activate_powerup(&mut self, input: &FrameInput) {
        let Some(slot) = input.use_slot else {
            return;
        };
        let Some(kind) = self.player.use_powerup(slot) else {
            return;
        };
        debug!("Used {:?} from slot {}", kind, slot);
        self.events.push(FrameEvent::PowerupUsed { kind });
        if kind == PowerupKind::Bomb {
            self.bombs.push(
                Projectile::new(self.player.center(), BOMB_LAUNCH, BOMB_SIZE, self.tuning.bomb_damage)
                    .with_gravity(self.tuning.bomb_gravity),
            );
        }
    }

    /// First-empty-slot insertion; a full inventory leaves the pickup in place.
    fn collect_powerups(&mut self) {
        let bounds = self.player.bounds();
        for pickup in self.powerups.iter_mut().filter(|p| !p.collected) {
            if overlap(&bounds, &pickup.bounds()) && self.player.collect_powerup(pickup.kind) {
                pickup.collected = true;
                self.events
                    .push(FrameEvent::PowerupCollected { kind: pickup.kind });
            }
        }
    }

    /// Pulls loose coins and power-ups toward the player.
    fn apply_magnet(&mut self) {
        if !self.player.magnet.is_active() {
            return;
        }
        let center = self.player.center();
        let radius = self.tuning.magnet_radius;
        let pull = self.tuning.magnet_pull;
        let attract = |pos: &mut Vec2| {
            let offset = center - *pos;
            let distance = offset.length();
            if distance > 0.0 && distance <= radius {
                *pos += offset / distance * pull.min(distance);
            }
        };
        for coin in self.coins.iter_mut().filter(|c| !c.collected) {
            attract(&mut coin.pos);
        }
        for pickup in self.powerups.iter_mut().filter(|p| !p.collected) {
            attract(&mut pickup.pos);
        }
    }

    fn collect_coins(&mut self) {
        let center = self.player.center();
        let reach = self.player.size / 2.0 + COIN_RADIUS;
        for coin in self.coins.iter_mut().filter(|c| !c.collected) {
            if coin.pos.distance(center) < reach {
                coin.collected = true;
                self.coins_collected += coin.value;
                self.events
                    .push(FrameEvent::CoinCollected { value: coin.value });
                self.particles.burst(coin.pos, 6, 2.0, ParticleTint::Coin);
            }
        }
    }

    /// Falling onto the upper half of a cage breaks it and bounces the player.
    fn break_cages(&mut self) {
        if self.player.vy <= 0.0 {
            return;
        }
        let bounds = self.player.bounds();
        let cage = self.cages.iter_mut().find(|c| {
            !c.broken
                && overlap(&bounds, &c.bounds)
                && bounds.bottom() <= c.bounds.y + c.bounds.h / 2.0
        });
        if let Some(cage) = cage {
            cage.broken = true;
            let skin = cage.skin.clone();
            let at = cage.bounds.center();
            self.player.bounce(self.tuning.cage_bounce);
            info!("Freed skin '{}'", skin);
            self.freed_skins.push(skin.clone());
            self.events.push(FrameEvent::CageBroken { skin });
            self.particles.burst(at, 12, 3.0, ParticleTint::Spark);
        }
    }

    // ------------------------------------------------------------------
    // Level hazards and enemies
    // ------------------------------------------------------------------

    fn update_dynamic_hazards(&mut self) -> Option<RunOutcome> {
        let tuning = &self.tuning;
        let player_x = self.player.x;
        for block in &mut self.hazards.falling_blocks {
            block.update(
                player_x,
                tuning.falling_block_trigger,
                tuning.falling_block_warning,
                tuning.falling_block_gravity,
                tuning.ground_y,
            );
        }
        for pendulum in &mut self.hazards.pendulums {
            pendulum.update(self.frame);
        }

        if self.player.is_flying() {
            return None;
        }
        let bounds = self.player.bounds();
        let crushed = self
            .hazards
            .falling_blocks
            .iter()
            .any(|b| b.is_falling() && overlap(&bounds, &b.bounds));
        if crushed && let Some(outcome) = self.hurt_player(1) {
            return Some(outcome);
        }
        let swung = self.hazards.pendulums.iter().any(|p| p.hits(&bounds));
        if swung && let Some(outcome) = self.hurt_player(1) {
            return Some(outcome);
        }
        None
    }

    fn update_enemies(&mut self) {
        let target = self.player.center();
        let speed = self.tuning.enemy_bullet_speed;
        for enemy in &mut self.enemies {
            enemy.update(target.x);
            if enemy.should_shoot() {
                let origin = enemy.center();
                let dir = (target - origin).normalize_or(Vec2::NEG_X);
                self.enemy_bullets
                    .push(Projectile::new(origin, dir * speed, ENEMY_BULLET_SIZE, 1));
            }
        }
    }

    /// Enemy shots pass harmlessly through a flying player.
    fn update_enemy_bullets(&mut self) -> Option<RunOutcome> {
        let (left, right) = (self.view_left(), self.view_right());
        let ground = self.tuning.ground_y;
        for shot in &mut self.enemy_bullets {
            shot.advance();
        }
        self.enemy_bullets
            .retain(|s| !s.is_outside(left, right, -OFFSCREEN_MARGIN, ground));

        if self.player.is_flying() {
            return None;
        }
        let bounds = self.player.bounds();
        let hit = self
            .enemy_bullets
            .iter()
            .position(|s| overlap(&bounds, &s.bounds()))?;
        let shot = self.enemy_bullets.remove(hit);
        self.hurt_player(shot.damage)
    }

    /// Ordinary shots stop at the first enemy; piercing shots carry on.
    fn bullets_vs_enemies(&mut self) {
        let mut killed = Vec::new();
        let mut spent = vec![false; self.bullets.len()];

        for (b, bullet) in self.bullets.iter_mut().enumerate() {
            let shot = bullet.shot.bounds();
            for (i, enemy) in self.enemies.iter_mut().enumerate() {
                if !enemy.alive || bullet.hit.contains(&i) || !overlap(&shot, &enemy.bounds()) {
                    continue;
                }
                if enemy.take_damage(bullet.shot.damage) {
                    killed.push(enemy.center());
                }
                if bullet.piercing {
                    bullet.hit.push(i);
                } else {
                    spent[b] = true;
                    break;
                }
            }
            if !spent[b]
                && self.boss_phase == BossPhase::Fight
                && let Some(boss) = self.boss.as_mut()
                && boss.damage_minions(&shot, bullet.shot.damage)
                && !bullet.piercing
            {
                spent[b] = true;
            }
        }

        let mut flags = spent.into_iter();
        self.bullets.retain(|_| !flags.next().unwrap_or(false));
        for at in killed {
            self.credit_kill(at);
        }
    }

    // ------------------------------------------------------------------
    // Boss
    // ------------------------------------------------------------------

    fn handle_boss_hit(&mut self, hit: BossHit) {
        let Some(boss) = self.boss.as_ref() else {
            return;
        };
        let hp = boss.core.hp;
        let center = boss.core.center();
        match hit {
            BossHit::Ignored => {}
            BossHit::Damaged { new_phase } => {
                self.events.push(FrameEvent::BossDamaged { hp });
                if let Some(phase) = new_phase {
                    info!("{} entered phase {}", boss.core.name, phase);
                    self.events.push(FrameEvent::BossPhaseChanged { phase });
                }
            }
            BossHit::Defeated => {
                info!("{} defeated on frame {}", boss.core.name, self.frame);
                self.events.push(FrameEvent::BossDamaged { hp });
                self.events.push(FrameEvent::BossDefeated);
                self.boss_phase = BossPhase::Defeated;
                self.victory_timer.start(self.tuning.victory_delay_frames);
                self.enemy_bullets.clear();
                self.camera.set_shake(0.0);
                self.particles.burst(center, 24, 6.0, ParticleTint::Explosion);
            }
        }
    }

    fn fighting_boss(&mut self) -> Option<&mut Boss> {
        if self.boss_phase != BossPhase::Fight {
            return None;
        }
        self.boss.as_mut().filter(|b| b.is_alive())
    }

    fn bullets_vs_boss(&mut self) {
        let Some(boss) = self.fighting_boss() else {
            return;
        };
        let body = boss.bounds();
        let mut hits = Vec::new();
        let mut remaining = Vec::with_capacity(self.bullets.len());
        for bullet in self.bullets.drain(..) {
            if overlap(&bullet.shot.bounds(), &body) {
                hits.push(bullet.shot.damage);
            } else {
                remaining.push(bullet);
            }
        }
        self.bullets = remaining;

        for damage in hits {
            let hit = match self.boss.as_mut() {
                Some(boss) => boss.take_damage(damage),
                None => BossHit::Ignored,
            };
            self.handle_boss_hit(hit);
        }
    }

    /// A stomp damages the boss and bounces the player; any other contact hurts the player.
    fn player_vs_boss(&mut self) -> Option<RunOutcome> {
        let bounds = self.player.bounds();
        let vy = self.player.vy;
        let stomp_bounce = self.tuning.stomp_bounce;
        let boss = self.fighting_boss()?;
        let body = boss.bounds();
        if !overlap(&bounds, &body) {
            return None;
        }
        if stomp_check(&bounds, vy, &body) {
            let hit = boss.take_damage(1);
            self.player.bounce(stomp_bounce);
            self.handle_boss_hit(hit);
            None
        } else {
            self.hurt_player(1)
        }
    }

    /// Tested against the hazards left by the boss's previous update.
    fn boss_hazards_vs_player(&mut self) -> Option<RunOutcome> {
        let bounds = self.player.bounds();
        let center_x = self.player.center().x;
        let on_ground = self.player.on_ground;
        let ground = self.tuning.ground_y;
        let boss = self.fighting_boss()?;

        let generic = boss
            .hazards()
            .into_iter()
            .find(|h| overlap(&bounds, &h.aabb))
            .map(|h| h.damage);
        let shockwave = boss
            .shockwaves()
            .iter()
            .any(|w| w.hits(center_x, on_ground));
        let pulsed = boss
            .pulse_field()
            .is_some_and(|(center, radius)| distance_to_box(center, &bounds) < radius);
        let pillar = boss.ice_pillars().is_some_and(|pillars| {
            pillars
                .iter()
                .filter_map(|p| p.hitbox(ground))
                .any(|h| overlap(&bounds, &h))
        });

        if let Some(damage) = generic
            && let Some(outcome) = self.hurt_player(damage)
        {
            return Some(outcome);
        }
        if shockwave && let Some(outcome) = self.hurt_player(1) {
            return Some(outcome);
        }
        if pulsed && let Some(outcome) = self.hurt_player(1) {
            return Some(outcome);
        }
        if pillar {
            self.particles
                .burst(self.player.center(), 6, 2.0, ParticleTint::Ice);
            if let Some(outcome) = self.hurt_player(1) {
                return Some(outcome);
            }
        }
        None
    }

    fn update_boss(&mut self) {
        if self.boss_phase != BossPhase::Fight {
            return;
        }
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let mut ctx = BossContext {
            player: self.player.center(),
            ground_y: self.tuning.ground_y,
            rng: &mut self.rng,
        };
        boss.update(&mut ctx);
        if let Some(shake) = boss.screen_shake() {
            self.camera.set_shake(shake);
        }
    }

    // ------------------------------------------------------------------
    // Contact damage
    // ------------------------------------------------------------------

    /// Flying kills anything it touches; otherwise stomp or get hurt.
    fn player_vs_enemies(&mut self) -> Option<RunOutcome> {
        let flying = self.player.is_flying();
        for i in 0..self.enemies.len() {
            let bounds = self.player.bounds();
            let enemy = &mut self.enemies[i];
            if !enemy.alive || !overlap(&bounds, &enemy.bounds()) {
                continue;
            }
            if flying || stomp_check(&bounds, self.player.vy, &enemy.bounds()) {
                let hp = enemy.hp;
                if enemy.take_damage(hp) {
                    let at = enemy.center();
                    self.credit_kill(at);
                }
                if !flying {
                    self.player.bounce(self.tuning.stomp_bounce);
                }
            } else if let Some(outcome) = self.hurt_player(1) {
                return Some(outcome);
            }
        }
        None
    }

    fn spike_collisions(&mut self) -> Option<RunOutcome> {
        if self.player.is_flying() {
            return None;
        }
        let bounds = self.player.bounds();
        if self.hazards.spikes().any(|s| overlap(&bounds, &s.bounds)) {
            return self.hurt_player(1);
        }
        None
    }

    /// Walls hurt only on the spiked side; the player is pushed back into the gap either way.
    fn corridor_collisions(&mut self) -> Option<RunOutcome> {
        let index = self.active_corridor?;
        if !self.player.corridor_mode {
            return None;
        }
        let ground = self.tuning.ground_y;
        let frame = self.frame;
        let bounds = self.player.bounds();
        let corridor = &self.hazards.corridors[index];

        let contact = corridor.wall_contact(&bounds, frame, ground);
        let (top, bottom) = corridor.gap_bounds(bounds.center().x, frame, ground);
        let segments: Vec<i64> = Corridor::segments_under(&bounds).collect();
        let obstacle_hit = segments.iter().any(|&seg| {
            corridor
                .moving_spike(seg, frame, ground)
                .into_iter()
                .chain(corridor.rotating_block(seg, frame, ground))
                .any(|h| overlap(&bounds, &h))
        });
        let coins: Vec<i64> = segments
            .iter()
            .copied()
            .filter(|&seg| {
                corridor.coin(seg, frame, ground).is_some_and(|pos| {
                    distance_to_box(pos, &bounds) < CORRIDOR_COIN_RADIUS
                })
            })
            .collect();

        for seg in coins {
            self.hazards.corridors[index].collected_coins.insert(seg);
            self.coins_collected += 1;
            self.events.push(FrameEvent::CoinCollected { value: 1 });
        }

        let spiked = match contact {
            WallContact::Clear => false,
            WallContact::Ceiling { spiked } => {
                self.player.y = top;
                self.player.vy = 0.0;
                spiked
            }
            WallContact::Floor { spiked } => {
                self.player.y = bottom - self.player.size;
                self.player.vy = 0.0;
                spiked
            }
        };
        if spiked && let Some(outcome) = self.hurt_player(1) {
            return Some(outcome);
        }
        if obstacle_hit {
            return self.hurt_player(1);
        }
        None
    }

    // ------------------------------------------------------------------
    // Cosmetics
    // ------------------------------------------------------------------

    fn advance_cosmetics(&mut self) {
        self.player.advance_cosmetics(self.tuning.spin_per_frame);
        if self.boss.is_none() || self.boss_phase != BossPhase::Fight {
            self.camera.set_shake(0.0);
        }
        self.camera.update(self.player.x);
        self.particles.update();
        let score = self.score() as f32;
        self.displayed_score += (score - self.displayed_score) * DISPLAYED_SCORE_EASING;
        if self.frame % INVENTORY_DISPLAY_INTERVAL == 0 {
            self.inventory_display = self.player.inventory.slots();
        }
    }
}
