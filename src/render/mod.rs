//! Render domain: draws the current `RunWorld` with gizmos. Read-only.
//!
//! The simulation is y-down with the viewport's top-left at the camera's x. Bevy's 2D camera is
//! y-up and centered, so every point goes through [`Viewport::project`].

use bevy::prelude::*;

use crate::bosses::{Boss, BossKind, Inferno};
use crate::content::{EnemyKind, ObstacleKind, PowerupKind};
use crate::hazards::{Corridor, FallingBlockState, SEGMENT_WIDTH, SpikeSide, segment_index, spike_side};
use crate::physics::Aabb;
use crate::run::{BossPhase, GameCamera, ParticleTint, RunWorld};

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.06, 0.07, 0.11)))
            .add_systems(
                Update,
                (draw_level, draw_actors, draw_boss, draw_effects)
                    .chain()
                    .run_if(resource_exists::<RunWorld>),
            );
    }
}

/// Simulation-to-Bevy coordinate mapping for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    camera: GameCamera,
    half: Vec2,
}

impl Viewport {
    pub fn new(world: &RunWorld) -> Self {
        Self {
            camera: world.camera,
            half: Vec2::new(world.tuning.viewport_width, world.tuning.viewport_height) / 2.0,
        }
    }

    pub fn project(&self, world: Vec2) -> Vec2 {
        let screen = self.camera.world_to_screen(world);
        Vec2::new(screen.x - self.half.x, self.half.y - screen.y)
    }

    pub fn rect(&self, gizmos: &mut Gizmos, aabb: &Aabb, color: Color) {
        gizmos.rect_2d(
            Isometry2d::from_translation(self.project(aabb.center())),
            aabb.size(),
            color,
        );
    }

    pub fn circle(&self, gizmos: &mut Gizmos, center: Vec2, radius: f32, color: Color) {
        gizmos.circle_2d(
            Isometry2d::from_translation(self.project(center)),
            radius,
            color,
        );
    }

    pub fn line(&self, gizmos: &mut Gizmos, a: Vec2, b: Vec2, color: Color) {
        gizmos.line_2d(self.project(a), self.project(b), color);
    }

    /// World-x range currently on screen, with a small margin.
    fn visible_x(&self) -> (f32, f32) {
        (self.camera.x - 40.0, self.camera.x + self.half.x * 2.0 + 40.0)
    }
}

const SPIKE: Color = Color::srgb(0.9, 0.2, 0.25);
const PLATFORM: Color = Color::srgb(0.55, 0.55, 0.6);
const WARNING: Color = Color::srgb(1.0, 0.8, 0.2);
const COIN: Color = Color::srgb(0.95, 0.8, 0.2);
const WALL: Color = Color::srgb(0.3, 0.35, 0.5);
const HAZARD: Color = Color::srgb(1.0, 0.35, 0.1);

fn powerup_color(kind: PowerupKind) -> Color {
    match kind {
        PowerupKind::Shield => Color::srgb(0.3, 0.7, 1.0),
        PowerupKind::Bomb => Color::srgb(0.4, 0.4, 0.4),
        PowerupKind::Rocket => Color::srgb(1.0, 0.5, 0.1),
        PowerupKind::Magnet => Color::srgb(0.85, 0.2, 0.85),
        PowerupKind::SuperBullet => Color::srgb(0.2, 1.0, 0.6),
        PowerupKind::Heart => Color::srgb(1.0, 0.3, 0.4),
    }
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Stationary => Color::srgb(0.8, 0.3, 0.3),
        EnemyKind::Shooter => Color::srgb(0.9, 0.5, 0.2),
        EnemyKind::Flier => Color::srgb(0.6, 0.4, 0.9),
        EnemyKind::Armored => Color::srgb(0.5, 0.5, 0.55),
    }
}

fn draw_level(world: Res<RunWorld>, mut gizmos: Gizmos) {
    let view = Viewport::new(&world);
    let ground = world.tuning.ground_y;
    let (left, right) = view.visible_x();

    view.line(
        &mut gizmos,
        Vec2::new(left, ground),
        Vec2::new(right, ground),
        PLATFORM,
    );

    for obstacle in &world.hazards.obstacles {
        let color = match obstacle.kind {
            ObstacleKind::Spike => SPIKE,
            ObstacleKind::Platform => PLATFORM,
        };
        view.rect(&mut gizmos, &obstacle.bounds, color);
    }
    for platform in &world.hazards.moving_platforms {
        view.rect(&mut gizmos, &platform.bounds(), Color::srgb(0.4, 0.7, 0.7));
    }
    for block in &world.hazards.falling_blocks {
        let color = match block.state {
            FallingBlockState::Idle => PLATFORM,
            FallingBlockState::Warning(_) => WARNING,
            FallingBlockState::Falling { .. } => HAZARD,
            FallingBlockState::Landed => Color::srgb(0.45, 0.45, 0.5),
        };
        view.rect(&mut gizmos, &block.bounds, color);
    }
    for pendulum in &world.hazards.pendulums {
        let ball = pendulum.ball();
        view.line(&mut gizmos, pendulum.pivot, ball, PLATFORM);
        view.circle(&mut gizmos, ball, pendulum.ball_radius, SPIKE);
    }
    for corridor in &world.hazards.corridors {
        draw_corridor(&mut gizmos, &view, corridor, world.frame, ground);
    }
    if world.camera.is_locked() {
        for x in [world.arena_left(), world.arena_right()] {
            view.line(&mut gizmos, Vec2::new(x, 0.0), Vec2::new(x, ground), WALL);
        }
    }
}

/// Walls, spikes and extras per segment, using the same functions as the collision pass.
fn draw_corridor(gizmos: &mut Gizmos, view: &Viewport, corridor: &Corridor, frame: u64, ground: f32) {
    let (left, right) = view.visible_x();
    let first = segment_index(left.max(corridor.start_x));
    let last = segment_index(right.min(corridor.end_x - 1.0));
    for seg in first..=last {
        let x = seg as f32 * SEGMENT_WIDTH;
        let mid = x + SEGMENT_WIDTH / 2.0;
        let (top, bottom) = corridor.gap_bounds(mid, frame, ground);
        let (ceiling_color, floor_color) = match spike_side(seg) {
            SpikeSide::Ceiling => (SPIKE, WALL),
            SpikeSide::Floor => (WALL, SPIKE),
        };
        view.rect(gizmos, &Aabb::new(x, 0.0, SEGMENT_WIDTH, top), ceiling_color);
        view.rect(
            gizmos,
            &Aabb::new(x, bottom, SEGMENT_WIDTH, (ground - bottom).max(0.0)),
            floor_color,
        );
        if let Some(spike) = corridor.moving_spike(seg, frame, ground) {
            view.rect(gizmos, &spike, SPIKE);
        }
        if let Some(block) = corridor.rotating_block(seg, frame, ground) {
            view.rect(gizmos, &block, HAZARD);
        }
        if let Some(coin) = corridor.coin(seg, frame, ground) {
            view.circle(gizmos, coin, 8.0, COIN);
        }
    }
}

fn draw_actors(world: Res<RunWorld>, mut gizmos: Gizmos) {
    let view = Viewport::new(&world);

    for coin in world.coins.iter().filter(|c| !c.collected) {
        view.circle(&mut gizmos, coin.pos, 10.0, COIN);
    }
    for pickup in world.powerups.iter().filter(|p| !p.collected) {
        view.rect(&mut gizmos, &pickup.bounds(), powerup_color(pickup.kind));
    }
    for cage in world.cages.iter().filter(|c| !c.broken) {
        view.rect(&mut gizmos, &cage.bounds, Color::srgb(0.7, 0.6, 0.4));
    }
    for enemy in world.enemies.iter().filter(|e| e.alive) {
        view.rect(&mut gizmos, &enemy.bounds(), enemy_color(enemy.kind));
    }
    for bullet in &world.bullets {
        let color = if bullet.piercing {
            powerup_color(PowerupKind::SuperBullet)
        } else {
            Color::WHITE
        };
        view.rect(&mut gizmos, &bullet.shot.bounds(), color);
    }
    for shot in &world.enemy_bullets {
        view.rect(&mut gizmos, &shot.bounds(), HAZARD);
    }
    for bomb in &world.bombs {
        view.circle(&mut gizmos, bomb.pos, bomb.size.x / 2.0, powerup_color(PowerupKind::Bomb));
    }

    let player = &world.player;
    for (i, point) in player.trail.iter().enumerate() {
        view.circle(&mut gizmos, *point, 1.0 + i as f32 * 0.5, Color::srgba(0.4, 0.8, 1.0, 0.3));
    }
    // Blink while invincible.
    if !player.is_invincible() || world.frame % 8 < 4 {
        let squash = if player.squash.is_active() { 0.8 } else { 1.0 };
        let size = Vec2::new(player.size / squash, player.size * squash);
        gizmos.rect_2d(
            Isometry2d::new(view.project(player.center()), Rot2::radians(-player.rotation)),
            size,
            Color::srgb(0.3, 0.85, 1.0),
        );
    }
    if player.shield.is_active() {
        view.circle(
            &mut gizmos,
            player.center(),
            player.size * 0.9,
            powerup_color(PowerupKind::Shield),
        );
    }
    if player.magnet.is_active() {
        view.circle(
            &mut gizmos,
            player.center(),
            world.tuning.magnet_radius,
            Color::srgba(0.85, 0.2, 0.85, 0.15),
        );
    }
}

fn draw_boss(world: Res<RunWorld>, mut gizmos: Gizmos) {
    let Some(boss) = world.boss.as_ref() else {
        return;
    };
    if world.boss_phase == BossPhase::Defeated && !boss.is_alive() {
        return;
    }
    let view = Viewport::new(&world);
    let ground = world.tuning.ground_y;

    let body = if boss.core.invincibility.is_active() && world.frame % 6 < 3 {
        Color::WHITE
    } else {
        Color::srgb(0.75, 0.15, 0.3)
    };
    view.rect(&mut gizmos, &boss.bounds(), body);

    draw_telegraphs(&mut gizmos, &view, boss, ground);
    for hazard in boss.hazards() {
        view.rect(&mut gizmos, &hazard.aabb, HAZARD);
    }
    for wave in boss.shockwaves() {
        for x in [wave.x - wave.radius, wave.x + wave.radius] {
            view.line(&mut gizmos, Vec2::new(x, ground), Vec2::new(x, ground - 20.0), HAZARD);
        }
    }
    if let Some(pillars) = boss.ice_pillars() {
        for pillar in pillars {
            match pillar.hitbox(ground) {
                Some(hitbox) => view.rect(&mut gizmos, &hitbox, Color::srgb(0.6, 0.9, 1.0)),
                None => view.rect(&mut gizmos, &pillar.marker(ground), WARNING),
            }
        }
    }
}

/// Warnings that are not yet hazards, plus the Core's pulse ring.
fn draw_telegraphs(gizmos: &mut Gizmos, view: &Viewport, boss: &Boss, ground: f32) {
    if let Some((center, radius)) = boss.pulse_field() {
        view.circle(gizmos, center, radius, HAZARD);
    }
    match &boss.kind {
        BossKind::Inferno(inferno) => {
            if let Some((y, false)) = inferno.beam_row() {
                view.rect(gizmos, &Inferno::beam_bounds(&boss.core, y), WARNING);
            }
        }
        BossKind::Core(core) => {
            for beam in core.beams.iter().filter(|b| b.is_warning()) {
                view.rect(gizmos, &beam.bounds(ground), WARNING);
            }
        }
        _ => {}
    }
}

fn draw_effects(world: Res<RunWorld>, mut gizmos: Gizmos) {
    let view = Viewport::new(&world);
    for particle in &world.particles.live {
        let color = match particle.tint {
            ParticleTint::Spark => Color::srgb(1.0, 0.9, 0.6),
            ParticleTint::Coin => COIN,
            ParticleTint::Damage => SPIKE,
            ParticleTint::Explosion => HAZARD,
            ParticleTint::Ice => Color::srgb(0.7, 0.9, 1.0),
        };
        view.circle(&mut gizmos, particle.pos, 2.0, color);
    }
}
