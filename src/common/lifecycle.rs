//! Entity lifecycle markers shared by every gameplay plugin.
//!
//! Fixed-step systems never despawn directly. They mark `PendingDespawn` and the
//! core plugin removes marked entities in `PostUpdate`. Queries that apply
//! damage or emit notifications filter `Without<PendingDespawn>`, so an entity
//! that has already been resolved is never resolved twice.

use bevy::prelude::*;

/// Marker: entity should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Marker: entity belongs to the current round and is cleared when a new one starts.
#[derive(Component, Debug, Clone, Copy)]
pub struct RoundScoped;
