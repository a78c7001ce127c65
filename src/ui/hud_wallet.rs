//! UI domain: score, coin counter and the three power-up slots.

use bevy::prelude::*;

use crate::content::PowerupKind;
use crate::player::INVENTORY_SLOTS;
use crate::run::RunWorld;
use crate::ui::hud_player::{HEALTH_ROW_HEIGHT, HUD_PADDING};

const SLOT_SIZE: f32 = 28.0;
const SLOT_EMPTY: Color = Color::srgba(0.1, 0.1, 0.1, 0.6);

#[derive(Component)]
pub struct CoinAmountText;

/// Top-right score, showing the eased display value.
#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct InventorySlot(usize);

fn slot_color(kind: PowerupKind) -> Color {
    match kind {
        PowerupKind::Shield => Color::srgb(0.3, 0.7, 1.0),
        PowerupKind::Bomb => Color::srgb(0.45, 0.45, 0.45),
        PowerupKind::Rocket => Color::srgb(1.0, 0.5, 0.1),
        PowerupKind::Magnet => Color::srgb(0.85, 0.2, 0.85),
        PowerupKind::SuperBullet => Color::srgb(0.2, 1.0, 0.6),
        PowerupKind::Heart => Color::srgb(1.0, 0.3, 0.4),
    }
}

pub(crate) fn spawn_wallet_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_PADDING),
            top: Val::Px(HUD_PADDING + HEALTH_ROW_HEIGHT + 8.0),
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Node {
                    width: Val::Px(14.0),
                    height: Val::Px(14.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.9, 0.75, 0.2)),
            ));
            row.spawn((
                CoinAmountText,
                Text::new("0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.5)),
                Node {
                    margin: UiRect::right(Val::Px(12.0)),
                    ..default()
                },
            ));

            // Slot digits match the 1/2/3 bindings.
            for i in 0..INVENTORY_SLOTS {
                row.spawn((
                    InventorySlot(i),
                    Node {
                        width: Val::Px(SLOT_SIZE),
                        height: Val::Px(SLOT_SIZE),
                        border: UiRect::all(Val::Px(2.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(SLOT_EMPTY),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new(format!("{}", i + 1)),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
        });

    commands.spawn((
        ScoreText,
        Text::new("0"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.95, 0.95)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(HUD_PADDING),
            top: Val::Px(HUD_PADDING),
            ..default()
        },
    ));
}

pub(crate) fn update_wallet_hud(
    world: Res<RunWorld>,
    mut coins: Query<&mut Text, (With<CoinAmountText>, Without<ScoreText>)>,
    mut score: Query<&mut Text, (With<ScoreText>, Without<CoinAmountText>)>,
    mut slots: Query<(&InventorySlot, &mut BackgroundColor)>,
) {
    if !world.is_changed() {
        return;
    }
    for mut text in &mut coins {
        **text = world.coins_collected.to_string();
    }
    for mut text in &mut score {
        **text = (world.displayed_score.round() as u32).to_string();
    }
    for (slot, mut color) in &mut slots {
        color.0 = world
            .inventory_display
            .get(slot.0)
            .copied()
            .flatten()
            .map_or(SLOT_EMPTY, slot_color);
    }
}
