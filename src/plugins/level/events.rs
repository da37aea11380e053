use bevy::prelude::*;

/// Everything the shell forwards to the active level rules.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum LevelEvent {
    /// One frame passed; `delta` in seconds of virtual time.
    Update { delta: f32 },
    KeyDown(KeyCode),
    MouseMove { delta: Vec2 },
    MouseClick(MouseButton),
    /// An audio cue attached to `emitter` finished.
    SoundFinished { emitter: Entity },
    JoystickButtonDown { button: i32 },
    JoystickButtonUp { button: i32 },
    /// Hat bitmask: up 1, right 2, down 4, left 8. Zero is centred.
    JoystickHatMove { position: u8 },
    /// A gamepad went away; anything it held counts as released.
    JoystickDisconnected,
}

pub const HAT_UP: u8 = 1;
pub const HAT_RIGHT: u8 = 2;
pub const HAT_DOWN: u8 = 4;
pub const HAT_LEFT: u8 = 8;
