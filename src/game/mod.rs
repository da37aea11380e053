//! Game composition root.
//!
//! - `configure_full`: DefaultPlugins (window/render) + every game plugin.
//! - `configure_headless`: gameplay with physics, no rendering.
//! - `configure_simulation`: gameplay without physics, for scripted scenarios.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::rng::GameRng;
use crate::common::state::GameState;
use crate::plugins;

#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Seed override for reproducible waves.
pub const SEED_ENV: &str = "DRONE_ANARCHY_SEED";

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Drone Anarchy".into(),
            resolution: WindowResolution::new(1280, 720),
            resizable: true,
            ..default()
        }),
        ..default()
    });

    // DX12 on Windows; Vulkan has been unreliable on hybrid-GPU laptops.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    app.insert_resource(rng_from_env());
    app.init_state::<GameState>();
    plugins::register_all(app);
}

/// Headless configuration for integration tests.
///
/// Do NOT add DefaultPlugins or render-only plugins (Firefly/camera/HUD).
pub fn configure_headless(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}

/// Gameplay minus the physics backend and the arena.
pub fn configure_simulation(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_simulation(app);
}

fn rng_from_env() -> GameRng {
    match std::env::var(SEED_ENV).ok().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => {
            info!("using seed {seed}");
            GameRng::from_seed(seed)
        }
        Some(Err(e)) => {
            warn!("ignoring {SEED_ENV}: {e}");
            GameRng::from_entropy()
        }
        None => GameRng::from_entropy(),
    }
}
