//! UI domain: player health pips and active-buff readout.

use bevy::prelude::*;

use crate::player::Player;
use crate::run::RunWorld;

pub(crate) const HUD_PADDING: f32 = 16.0;
pub(crate) const HEALTH_ROW_HEIGHT: f32 = 18.0;
/// Pips spawned up front; those past the run's max health stay hidden.
const MAX_PIPS: usize = 8;

const PIP_FULL: Color = Color::srgb(0.9, 0.25, 0.3);
const PIP_EMPTY: Color = Color::srgba(0.2, 0.2, 0.2, 0.8);
const PIP_SHIELDED: Color = Color::srgb(0.3, 0.7, 1.0);

/// One health point slot, indexed from the left.
#[derive(Component)]
pub struct HealthPip(usize);

/// Text listing the buffs currently counting down.
#[derive(Component)]
pub struct BuffText;

pub(crate) fn spawn_player_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_PADDING),
            top: Val::Px(HUD_PADDING),
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|row| {
            for i in 0..MAX_PIPS {
                row.spawn((
                    HealthPip(i),
                    Node {
                        width: Val::Px(HEALTH_ROW_HEIGHT),
                        height: Val::Px(HEALTH_ROW_HEIGHT),
                        border: UiRect::all(Val::Px(2.0)),
                        display: Display::None,
                        ..default()
                    },
                    BackgroundColor(PIP_FULL),
                    BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
                ));
            }
            row.spawn((
                BuffText,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.9, 1.0)),
            ));
        });
}

fn buff_summary(player: &Player) -> String {
    let buffs = [
        ("SHIELD", player.shield.remaining()),
        ("ROCKET", player.rocket.remaining()),
        ("MAGNET", player.magnet.remaining()),
        ("SUPER", player.super_bullet.remaining()),
    ];
    buffs
        .iter()
        .filter(|(_, frames)| *frames > 0)
        .map(|(name, frames)| format!("{} {}s", name, frames.div_ceil(60)))
        .collect::<Vec<_>>()
        .join("  ")
}

pub(crate) fn update_player_hud(
    world: Res<RunWorld>,
    mut pips: Query<(&HealthPip, &mut Node, &mut BackgroundColor)>,
    mut buffs: Query<&mut Text, With<BuffText>>,
) {
    let player = &world.player;
    let filled = if player.shield.is_active() {
        PIP_SHIELDED
    } else {
        PIP_FULL
    };

    for (pip, mut node, mut color) in &mut pips {
        let index = pip.0 as i32;
        node.display = if index < player.max_health {
            Display::Flex
        } else {
            Display::None
        };
        color.0 = if index < player.health { filled } else { PIP_EMPTY };
    }

    let summary = buff_summary(player);
    for mut text in &mut buffs {
        if **text != summary {
            **text = summary.clone();
        }
    }
}
