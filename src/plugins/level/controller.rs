//! Virtual controller: logical buttons mapped onto raw device button codes.
//!
//! Raw codes follow the SDL game controller order (A = 0 .. D-pad right = 14),
//! with the triggers at 15/16. Hat directions are bitmask values
//! (up 1, right 2, down 4, left 8) and are unbound on the default layout.
//!
//! A settings file can replace the table:
//!
//! ```ron
//! (
//!     preset: Some(Ps3),
//!     buttons: { X: 3, Start: 9 },
//! )
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use bevy::input::gamepad::GamepadButton;
use bevy::prelude::*;
use serde::Deserialize;

/// Lookup result for a logical button that has no raw code.
pub const UNBOUND: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum ControllerButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftTrigger,
    RightTrigger,
    HatUp,
    HatDown,
    HatLeft,
    HatRight,
}

impl ControllerButton {
    pub const COUNT: usize = 21;

    pub const ALL: [ControllerButton; Self::COUNT] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::Back,
        Self::Guide,
        Self::Start,
        Self::LeftStick,
        Self::RightStick,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::DpadUp,
        Self::DpadDown,
        Self::DpadLeft,
        Self::DpadRight,
        Self::LeftTrigger,
        Self::RightTrigger,
        Self::HatUp,
        Self::HatDown,
        Self::HatLeft,
        Self::HatRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_hat(self) -> bool {
        matches!(
            self,
            Self::HatUp | Self::HatDown | Self::HatLeft | Self::HatRight
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum ControllerPreset {
    Xbox,
    Ps3,
    TwoInOne,
}

/// On-disk shape of the user settings file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ControllerSettings {
    preset: Option<ControllerPreset>,
    buttons: BTreeMap<ControllerButton, i32>,
}

#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct ControllerMap {
    lookup: [i32; ControllerButton::COUNT],
}

impl Default for ControllerMap {
    fn default() -> Self {
        Self::xbox()
    }
}

impl ControllerMap {
    /// Identity layout; hats unbound.
    pub fn xbox() -> Self {
        let mut lookup = [UNBOUND; ControllerButton::COUNT];
        for b in ControllerButton::ALL {
            if !b.is_hat() {
                lookup[b.index()] = b.index() as i32;
            }
        }
        Self { lookup }
    }

    /// Generic USB PS3 pad.
    pub fn ps3() -> Self {
        let mut map = Self::unbound();
        map.remap(ControllerButton::X, 2);
        map.remap(ControllerButton::DpadUp, 11);
        map.remap(ControllerButton::DpadDown, 12);
        map.remap(ControllerButton::DpadLeft, 13);
        map.remap(ControllerButton::DpadRight, 14);
        map.remap(ControllerButton::Back, 4);
        map.remap(ControllerButton::Start, 6);
        map
    }

    /// Cheap "2-in-1" USB pad that reports its D-pad as a hat.
    pub fn two_in_one() -> Self {
        let mut map = Self::unbound();
        map.remap(ControllerButton::X, 3);
        map.remap(ControllerButton::HatUp, 1);
        map.remap(ControllerButton::HatDown, 4);
        map.remap(ControllerButton::HatLeft, 8);
        map.remap(ControllerButton::HatRight, 2);
        map.remap(ControllerButton::Back, 8);
        map.remap(ControllerButton::Start, 9);
        map
    }

    pub fn unbound() -> Self {
        Self {
            lookup: [UNBOUND; ControllerButton::COUNT],
        }
    }

    pub fn from_preset(preset: ControllerPreset) -> Self {
        match preset {
            ControllerPreset::Xbox => Self::xbox(),
            ControllerPreset::Ps3 => Self::ps3(),
            ControllerPreset::TwoInOne => Self::two_in_one(),
        }
    }

    #[inline]
    pub fn button(&self, b: ControllerButton) -> i32 {
        self.lookup[b.index()]
    }

    /// Raw code by table index; `UNBOUND` when out of range.
    pub fn raw(&self, index: i32) -> i32 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.lookup.get(i).copied())
            .unwrap_or(UNBOUND)
    }

    pub fn remap(&mut self, b: ControllerButton, code: i32) {
        self.lookup[b.index()] = code;
    }

    /// Remap by table index. Out-of-range indices are ignored.
    pub fn remap_index(&mut self, index: i32, code: i32) {
        if let Some(slot) = usize::try_from(index)
            .ok()
            .and_then(|i| self.lookup.get_mut(i))
        {
            *slot = code;
        }
    }

    pub fn clear_all(&mut self) {
        self.lookup = [UNBOUND; ControllerButton::COUNT];
    }

    /// True when `code` is the raw code bound to `b`. Unbound never matches.
    #[inline]
    pub fn is(&self, b: ControllerButton, code: i32) -> bool {
        let bound = self.button(b);
        bound != UNBOUND && bound == code
    }

    /// True when the hat bitmask `position` includes the bit bound to `b`.
    pub fn hat_has(&self, b: ControllerButton, position: u8) -> bool {
        let bit = self.button(b);
        bit > 0 && (i32::from(position) & bit) != 0
    }

    /// Parse a settings document: start clean, apply the preset, then overrides.
    pub fn from_settings_str(text: &str) -> Result<Self> {
        let settings: ControllerSettings =
            ron::from_str(text).context("invalid controller settings")?;

        let mut map = Self::unbound();
        if let Some(preset) = settings.preset {
            map = Self::from_preset(preset);
        }
        for (button, code) in settings.buttons {
            map.remap(button, code);
        }
        Ok(map)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load_user_settings(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let map = Self::from_settings_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(map))
    }
}

/// Raw code a gamepad button reports, in SDL order.
pub fn raw_button_code(button: GamepadButton) -> i32 {
    match button {
        GamepadButton::South => 0,
        GamepadButton::East => 1,
        GamepadButton::West => 2,
        GamepadButton::North => 3,
        GamepadButton::Select => 4,
        GamepadButton::Mode => 5,
        GamepadButton::Start => 6,
        GamepadButton::LeftThumb => 7,
        GamepadButton::RightThumb => 8,
        GamepadButton::LeftTrigger => 9,
        GamepadButton::RightTrigger => 10,
        GamepadButton::DPadUp => 11,
        GamepadButton::DPadDown => 12,
        GamepadButton::DPadLeft => 13,
        GamepadButton::DPadRight => 14,
        GamepadButton::LeftTrigger2 => 15,
        GamepadButton::RightTrigger2 => 16,
        GamepadButton::Other(n) => i32::from(n),
        GamepadButton::C | GamepadButton::Z => UNBOUND,
    }
}

/// Turn-rate ramp while a direction is held.
///
/// Each update while held bumps a counter; the multiplier grows from
/// `START` to 1 over `RAMP_STEPS` updates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StickEasing {
    update_counter: u32,
}

impl StickEasing {
    pub const START: f32 = 0.2;
    pub const RAMP_STEPS: u32 = 30;

    pub fn step(&mut self) -> f32 {
        self.update_counter = (self.update_counter + 1).min(Self::RAMP_STEPS);
        self.multiplier()
    }

    pub fn multiplier(&self) -> f32 {
        let t = self.update_counter as f32 / Self::RAMP_STEPS as f32;
        Self::START + (1.0 - Self::START) * t
    }

    pub fn reset(&mut self) {
        self.update_counter = 0;
    }
}
