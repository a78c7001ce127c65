//! UI domain: boss health bar UI.

use bevy::prelude::*;

use crate::run::{BossPhase, RunWorld};

const BOSS_HEALTHBAR_WIDTH: f32 = 400.0;
const BOSS_HEALTHBAR_HEIGHT: f32 = 24.0;
const BOSS_HEALTHBAR_BOTTOM: f32 = 40.0;

/// Marker for the boss health bar UI container
#[derive(Component)]
pub struct BossHealthBarUI;

/// Marker for the boss health bar fill element
#[derive(Component)]
pub struct BossHealthBarFill;

/// Marker for boss name label
#[derive(Component)]
pub struct BossNameLabel;

pub(crate) fn spawn_boss_healthbar(
    mut commands: Commands,
    world: Res<RunWorld>,
    existing_bars: Query<(), With<BossHealthBarUI>>,
) {
    let Some(boss) = world.boss.as_ref() else {
        return;
    };
    if world.boss_phase == BossPhase::Defeated || !existing_bars.is_empty() {
        return;
    }

    // Spawn boss health bar UI at bottom center of screen
    commands
        .spawn((
            BossHealthBarUI,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(BOSS_HEALTHBAR_BOTTOM),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-BOSS_HEALTHBAR_WIDTH / 2.0)),
                width: Val::Px(BOSS_HEALTHBAR_WIDTH),
                height: Val::Px(BOSS_HEALTHBAR_HEIGHT),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.05, 0.9)),
            BorderColor::all(Color::srgb(0.6, 0.1, 0.1)),
        ))
        .with_children(|parent| {
            parent.spawn((
                BossHealthBarFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.8, 0.1, 0.1)),
            ));
        });

    // Boss name label above the health bar
    commands.spawn((
        BossNameLabel,
        Text::new(boss.core.name.clone()),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(BOSS_HEALTHBAR_BOTTOM + BOSS_HEALTHBAR_HEIGHT + 8.0),
            left: Val::Percent(50.0),
            margin: UiRect::left(Val::Px(-BOSS_HEALTHBAR_WIDTH / 2.0)),
            ..default()
        },
    ));
}

pub(crate) fn update_boss_healthbar(
    world: Res<RunWorld>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<BossHealthBarFill>>,
) {
    let Some(boss) = world.boss.as_ref() else {
        return;
    };
    let percent = boss.core.hp.max(0) as f32 / boss.core.max_hp as f32;
    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(percent * 100.0);

        // Darker with every phase
        let color = match boss.core.phase {
            1 => Color::srgb(0.8, 0.1, 0.1),
            2 => Color::srgb(0.9, 0.4, 0.1),
            _ => Color::srgb(0.6, 0.0, 0.0),
        };
        bg_color.0 = color;
    }
}

/// Remove the bar once the boss is gone or the run is over.
pub(crate) fn cleanup_boss_healthbar(
    mut commands: Commands,
    world: Option<Res<RunWorld>>,
    bar_query: Query<Entity, Or<(With<BossHealthBarUI>, With<BossNameLabel>)>>,
) {
    let fighting = world.is_some_and(|w| {
        w.boss.is_some() && matches!(w.boss_phase, BossPhase::Intro | BossPhase::Fight)
    });
    if fighting {
        return;
    }
    for entity in &bar_query {
        commands.entity(entity).despawn();
    }
}
