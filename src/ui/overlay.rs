//! UI domain: pause, death and level-complete overlays.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::{LevelCompletedEvent, PlayerDiedEvent};

/// Marker for any full-screen overlay
#[derive(Component)]
pub struct OverlayUI;

fn spawn_overlay(commands: &mut Commands, title: &str, title_color: Color, lines: &[String]) {
    // Full screen dark overlay
    commands
        .spawn((
            OverlayUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            for line in lines {
                parent.spawn((
                    Text::new(line.clone()),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.8, 0.8, 0.8)),
                    Node {
                        margin: UiRect::bottom(Val::Px(8.0)),
                        ..default()
                    },
                ));
            }
        });
}

pub(crate) fn spawn_death_screen(mut commands: Commands, mut events: MessageReader<PlayerDiedEvent>) {
    for event in events.read() {
        spawn_overlay(
            &mut commands,
            "YOU DIED",
            Color::srgb(0.8, 0.15, 0.15),
            &[
                format!("Level: {}", event.level_id),
                format!("Score: {}", event.score),
                format!("Kills: {}", event.kills),
                "Press [R] to retry".to_string(),
            ],
        );
    }
}

pub(crate) fn spawn_level_complete_screen(
    mut commands: Commands,
    mut events: MessageReader<LevelCompletedEvent>,
) {
    for event in events.read() {
        spawn_overlay(
            &mut commands,
            "LEVEL COMPLETE",
            Color::srgb(0.95, 0.85, 0.3),
            &[
                format!("Level: {}", event.level_id),
                format!("Score: {}", event.score),
                format!("Kills: {}", event.kills),
                format!("Coins: {}", event.coins),
                "Press [R] to continue".to_string(),
            ],
        );
    }
}

pub(crate) fn spawn_pause_screen(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        "PAUSED",
        Color::srgb(0.9, 0.9, 0.9),
        &["Press [Esc] to resume".to_string()],
    );
}

pub(crate) fn despawn_overlays(mut commands: Commands, query: Query<Entity, With<OverlayUI>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
