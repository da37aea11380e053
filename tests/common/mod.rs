//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `app_headless`: `MinimalPlugins` + full gameplay, physics included.
//! - `app_simulation`: gameplay without physics, stepped by a fixed manual
//!   clock so every `app.update()` is exactly one 1/64 s fixed step.

#![allow(dead_code)]

use std::time::Duration;

use avian2d::prelude::CollisionStart;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use drone_anarchy::common::rng::GameRng;
use drone_anarchy::common::state::GameState;
use drone_anarchy::plugins::drones::spawner::WaveState;

/// One fixed step at the default 64 Hz.
pub const STEP: Duration = Duration::from_nanos(15_625_000);

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists for avian.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(GameRng::from_seed(7));

    drone_anarchy::game::configure_headless(&mut app);
    app
}

pub fn app_simulation() -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.insert_resource(GameRng::from_seed(7));
    app.add_message::<CollisionStart>();

    drone_anarchy::game::configure_simulation(&mut app);
    app
}

pub fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

pub fn elapsed(app: &App) -> f32 {
    app.world().resource::<WaveState>().tracker.elapsed()
}

/// Step until the round clock reaches `seconds`.
pub fn run_round_until(app: &mut App, seconds: f32) {
    let mut guard = 0;
    while elapsed(app) < seconds {
        app.update();
        guard += 1;
        assert!(guard < 200_000, "round clock stuck at {}", elapsed(app));
    }
}

pub fn collide(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}
