mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use drone_anarchy::common::state::GameState;
use drone_anarchy::plugins::level::LevelManager;
use drone_anarchy::plugins::player::Player;
use drone_anarchy::plugins::world::Wall;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(common::state(&app), GameState::OutGame);
    assert_eq!(
        app.world().resource::<LevelManager>().name(),
        Some("LevelOne")
    );
}

#[test]
fn arena_and_turret_exist_after_startup() {
    let mut app = common::app_headless();
    app.update();

    let walls = app
        .world_mut()
        .query_filtered::<(), With<Wall>>()
        .iter(app.world())
        .count();
    assert_eq!(walls, 4);

    let (rb, _) = app
        .world_mut()
        .query_filtered::<(&RigidBody, &Transform), With<Player>>()
        .single(app.world())
        .unwrap();
    assert!(matches!(rb, RigidBody::Static));
}

#[test]
fn round_runs_with_physics_without_panicking() {
    let mut app = common::app_headless();
    app.update();
    common::set_state(&mut app, GameState::InGame);

    for _ in 0..10 {
        app.update();
    }

    assert_eq!(common::state(&app), GameState::InGame);
}
