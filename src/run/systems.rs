//! Run domain: Bevy systems that own the `RunWorld` lifecycle.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::content::{LevelRegistry, SimTuning, StartingUpgrades, builtin_level};
use crate::core::{GameState, LevelCompletedEvent, PlayerDiedEvent, RunConfig};
use crate::run::events::{RunOutcome, RunReport};
use crate::run::input::InputState;
use crate::run::world::RunWorld;

/// Build a fresh world on entering `Playing`. Returning from pause keeps the existing one.
pub(crate) fn start_run(
    mut commands: Commands,
    existing: Option<Res<RunWorld>>,
    mut run_config: ResMut<RunConfig>,
    registry: Res<LevelRegistry>,
    tuning: Res<SimTuning>,
    upgrades: Res<StartingUpgrades>,
    mut input: ResMut<InputState>,
) {
    if existing.is_some() {
        return;
    }

    let requested = run_config
        .level_id
        .clone()
        .or_else(|| registry.first_id().map(str::to_string));
    let level = match requested.as_deref().and_then(|id| registry.get(id)) {
        Some(level) => level.clone(),
        None => {
            warn!(
                "Level {:?} not found, using built-in level",
                requested.as_deref().unwrap_or("<none>")
            );
            builtin_level()
        }
    };
    run_config.level_id = Some(level.id.clone());

    info!(
        "Starting run on level '{}' ({}) with seed: {}",
        level.id, level.name, run_config.seed
    );
    *input = InputState::default();
    commands.insert_resource(RunWorld::new(&level, &tuning, &upgrades, run_config.seed));
}

/// One simulation frame per fixed tick.
pub(crate) fn step_run(
    mut world: ResMut<RunWorld>,
    mut input: ResMut<InputState>,
    mut died: MessageWriter<PlayerDiedEvent>,
    mut completed: MessageWriter<LevelCompletedEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let frame_input = input.take_frame_input();
    let Some(outcome) = world.step(&frame_input) else {
        for event in &world.events {
            debug!("frame {}: {:?}", world.frame, event);
        }
        return;
    };

    let report = RunReport {
        level_id: world.level.id.clone(),
        seed: world.seed,
        frames: world.frame,
        outcome,
        coins: world.coins_collected,
        freed_skins: world.freed_skins.clone(),
    };
    match serde_json::to_string(&report) {
        Ok(json) => info!("Run report: {}", json),
        Err(e) => warn!("Failed to serialize run report: {}", e),
    }

    match outcome {
        RunOutcome::Died { score, kills } => {
            died.write(PlayerDiedEvent {
                level_id: report.level_id,
                score,
                kills,
            });
            game_state.set(GameState::GameOver);
        }
        RunOutcome::LevelComplete {
            score,
            kills,
            coins,
        } => {
            completed.write(LevelCompletedEvent {
                level_id: report.level_id,
                score,
                kills,
                coins,
            });
            game_state.set(GameState::LevelComplete);
        }
    }
}

pub(crate) fn toggle_pause(
    mut input: ResMut<InputState>,
    state: Res<State<GameState>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if !input.take_pause() {
        return;
    }
    match state.get() {
        GameState::Playing => {
            info!("Paused");
            game_state.set(GameState::Paused);
        }
        GameState::Paused => {
            info!("Resumed");
            game_state.set(GameState::Playing);
        }
        _ => {}
    }
}

/// Restart the same level after death, or continue to the next one after a win.
pub(crate) fn handle_restart(
    mut input: ResMut<InputState>,
    state: Res<State<GameState>>,
    registry: Res<LevelRegistry>,
    mut run_config: ResMut<RunConfig>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if !input.take_restart() {
        return;
    }
    match state.get() {
        GameState::GameOver => {
            info!("Restarting level {:?}", run_config.level_id);
        }
        GameState::LevelComplete => {
            let next = run_config
                .level_id
                .as_deref()
                .and_then(|id| registry.next_id(id))
                .map(str::to_string);
            info!("Continuing to level {:?}", next);
            run_config.level_id = next;
        }
        _ => return,
    }
    run_config.reseed();
    game_state.set(GameState::Playing);
}

/// Drop the finished world so nothing keeps simulating it.
pub(crate) fn teardown_run(mut commands: Commands) {
    commands.remove_resource::<RunWorld>();
}
