//! Shell input collection: device state in, `LevelEvent`s out.
//!
//! Escape and F2 are handled here and never reach the level rules.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use super::controller::{raw_button_code, UNBOUND};
use super::events::{LevelEvent, HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP};

/// F2 overlay visibility.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DebugOverlay {
    pub visible: bool,
}

pub fn collect_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<AppExit>,
    mut overlay: Option<ResMut<DebugOverlay>>,
    mut out: MessageWriter<LevelEvent>,
) {
    for key in keys.get_just_pressed() {
        match key {
            KeyCode::Escape => {
                info!("quit requested");
                exit.write(AppExit::Success);
            }
            KeyCode::F2 => {
                if let Some(overlay) = overlay.as_mut() {
                    overlay.visible = !overlay.visible;
                }
            }
            other => {
                out.write(LevelEvent::KeyDown(*other));
            }
        }
    }
}

pub fn collect_mouse_motion(
    motion: Res<AccumulatedMouseMotion>,
    mut out: MessageWriter<LevelEvent>,
) {
    if motion.delta != Vec2::ZERO {
        out.write(LevelEvent::MouseMove {
            delta: motion.delta,
        });
    }
}

pub fn collect_mouse_buttons(
    buttons: Res<ButtonInput<MouseButton>>,
    mut out: MessageWriter<LevelEvent>,
) {
    for button in buttons.get_just_pressed() {
        out.write(LevelEvent::MouseClick(*button));
    }
}

pub fn collect_update(time: Res<Time>, mut out: MessageWriter<LevelEvent>) {
    out.write(LevelEvent::Update {
        delta: time.delta_secs(),
    });
}

/// Hat bitmask last forwarded to the rules.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HatLatch(pub u8);

/// D-pad state folded into a hat bitmask.
pub fn hat_position(gamepad: &Gamepad) -> u8 {
    [
        (GamepadButton::DPadUp, HAT_UP),
        (GamepadButton::DPadRight, HAT_RIGHT),
        (GamepadButton::DPadDown, HAT_DOWN),
        (GamepadButton::DPadLeft, HAT_LEFT),
    ]
    .into_iter()
    .filter(|(button, _)| gamepad.pressed(*button))
    .fold(0, |acc, (_, bit)| acc | bit)
}

/// Only scheduled while at least one gamepad is connected.
pub fn collect_gamepads(
    q_pads: Query<&Gamepad>,
    mut last_hat: ResMut<HatLatch>,
    mut out: MessageWriter<LevelEvent>,
) {
    let mut hat = 0;

    for gamepad in &q_pads {
        for button in gamepad.get_just_pressed() {
            let code = raw_button_code(*button);
            if code != UNBOUND {
                out.write(LevelEvent::JoystickButtonDown { button: code });
            }
        }
        for button in gamepad.get_just_released() {
            let code = raw_button_code(*button);
            if code != UNBOUND {
                out.write(LevelEvent::JoystickButtonUp { button: code });
            }
        }
        hat |= hat_position(gamepad);
    }

    if hat != last_hat.0 {
        last_hat.0 = hat;
        out.write(LevelEvent::JoystickHatMove { position: hat });
    }
}

/// Runs unconditionally: once the last pad is gone `collect_gamepads` is no
/// longer scheduled and would never report the release.
pub fn collect_gamepad_disconnects(
    mut removed: RemovedComponents<Gamepad>,
    mut last_hat: ResMut<HatLatch>,
    mut out: MessageWriter<LevelEvent>,
) {
    if removed.read().count() == 0 {
        return;
    }
    info!("gamepad disconnected");
    last_hat.0 = 0;
    out.write(LevelEvent::JoystickDisconnected);
}
