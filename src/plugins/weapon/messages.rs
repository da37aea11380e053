//! Weapon intents.
//!
//! Level rules write `FireWeapon` on an input edge; the weapon plugin is the
//! only consumer. One message is one shot from both guns.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct FireWeapon;
