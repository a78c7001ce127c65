//! Run domain: keyboard sampling and the per-tick input snapshot.

use bevy::prelude::*;
use serde::Serialize;

use crate::player::INVENTORY_SLOTS;

/// Opaque per-frame input the simulation consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameInput {
    pub jump_held: bool,
    /// True only on the frame the jump key went down.
    pub jump_pressed: bool,
    pub shoot: bool,
    pub left: bool,
    pub right: bool,
    /// Power-up slot to activate this frame, consumed once.
    pub use_slot: Option<usize>,
}

/// Keyboard state latched between render frames and fixed ticks.
///
/// Held keys are overwritten every render frame; presses stay latched until a tick takes them.
#[derive(Resource, Debug, Default)]
pub struct InputState {
    pub jump_held: bool,
    pub shoot: bool,
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub use_slot: Option<usize>,
    pub pause_pressed: bool,
    pub restart_pressed: bool,
}

impl InputState {
    /// Snapshot for one tick, clearing the latched presses.
    pub fn take_frame_input(&mut self) -> FrameInput {
        let input = FrameInput {
            jump_held: self.jump_held,
            jump_pressed: self.jump_pressed,
            shoot: self.shoot,
            left: self.left,
            right: self.right,
            use_slot: self.use_slot,
        };
        self.jump_pressed = false;
        self.use_slot = None;
        input
    }

    pub fn take_pause(&mut self) -> bool {
        std::mem::take(&mut self.pause_pressed)
    }

    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_pressed)
    }
}

const JUMP_KEYS: [KeyCode; 3] = [KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp];
const SHOOT_KEYS: [KeyCode; 2] = [KeyCode::KeyJ, KeyCode::KeyX];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const SLOT_KEYS: [KeyCode; INVENTORY_SLOTS] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];
const PAUSE_KEYS: [KeyCode; 2] = [KeyCode::Escape, KeyCode::KeyP];

pub(crate) fn sample_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputState>) {
    input.jump_held = keyboard.any_pressed(JUMP_KEYS);
    input.shoot = keyboard.any_pressed(SHOOT_KEYS);
    input.left = keyboard.any_pressed(LEFT_KEYS);
    input.right = keyboard.any_pressed(RIGHT_KEYS);

    if keyboard.any_just_pressed(JUMP_KEYS) {
        input.jump_pressed = true;
    }
    if let Some(slot) = SLOT_KEYS.iter().position(|k| keyboard.just_pressed(*k)) {
        input.use_slot = Some(slot);
    }
    if keyboard.any_just_pressed(PAUSE_KEYS) {
        input.pause_pressed = true;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        input.restart_pressed = true;
    }
}
