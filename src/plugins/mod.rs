//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod drones;
pub mod level;
pub mod physics;
pub mod player;
pub mod weapon;
pub mod world;

// Render-only
pub mod camera;
pub mod hud;
pub mod lighting;

/// Combat rules without a physics backend. Contacts come from whoever writes
/// `CollisionStart`; movement is not integrated.
pub fn register_simulation(app: &mut App) {
    core::plugin(app);
    level::plugin(app);
    player::plugin(app);
    drones::plugin(app);
    weapon::plugin(app);
}

/// Gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    level::plugin(app);
    player::plugin(app);
    drones::plugin(app);
    weapon::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    lighting::plugin(app);
    hud::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
