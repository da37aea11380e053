use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::drones::behavior::DroneKind;

#[test]
fn status_banner_follows_state() {
    let idle = RoundCountdown::default();
    let none = LastRound::default();

    assert_eq!(status_line(GameState::InGame, &idle, &none), "");
    assert_eq!(status_line(GameState::Paused, &idle, &none), "PAUSED");
    assert!(status_line(GameState::OutGame, &idle, &none).starts_with("DRONE ANARCHY"));

    let counting = RoundCountdown {
        remaining: Some(2.2),
    };
    assert_eq!(status_line(GameState::OutGame, &counting, &none), "3");

    let over = LastRound(Some(Score { points: 70, kills: 5 }));
    let line = status_line(GameState::OutGame, &idle, &over);
    assert!(line.contains("GAME OVER"));
    assert!(line.contains("70 points"));
}

#[test]
fn health_bar_shrinks_from_the_right() {
    let full = health_bar_transform(1.0);
    let half = health_bar_transform(0.5);
    let empty = health_bar_transform(-3.0);

    assert_eq!(full.scale.x, 1.0);
    assert_eq!(half.scale.x, 0.5);
    assert_eq!(empty.scale.x, 0.0);

    // Left edges line up.
    let left = |tf: &Transform| tf.translation.x - HEALTH_BAR_SIZE.x * tf.scale.x * 0.5;
    assert!((left(&full) - left(&half)).abs() < 1e-4);
    assert!((left(&full) - left(&empty)).abs() < 1e-4);
}

#[test]
fn health_colour_goes_from_green_to_red() {
    let full = health_color(1.0).to_srgba();
    let dead = health_color(0.0).to_srgba();
    assert!(full.green > full.red);
    assert!(dead.red > dead.green);
}

#[test]
fn radar_position_is_clamped_to_the_dish() {
    assert_eq!(radar_position(Vec2::ZERO, Vec2::ZERO), RADAR_CENTER);

    let far = radar_position(Vec2::ZERO, Vec2::new(10_000.0, 0.0));
    assert!(((far - RADAR_CENTER).length() - RADAR_RADIUS).abs() < 1e-3);

    let near = radar_position(Vec2::new(0.0, 100.0), Vec2::new(0.0, 200.0));
    assert!(near.y > RADAR_CENTER.y);
}

#[test]
fn player_hit_resizes_health_bar() {
    let mut world = World::new();
    world.init_resource::<Messages<PlayerHit>>();
    let bar = world
        .spawn((HealthBar, Sprite::default(), health_bar_transform(1.0)))
        .id();

    world.write_message(PlayerHit {
        health_fraction: 0.9,
    });
    world.write_message(PlayerHit {
        health_fraction: 0.25,
    });
    run_system_once(&mut world, update_health_bar);

    let tf = world.get::<Transform>(bar).unwrap();
    assert_eq!(tf.scale.x, 0.25);
}

#[test]
fn radar_tracks_new_drones_and_drops_dead_ones() {
    let mut world = World::new();
    world.spawn((Player, Transform::default()));
    let alive = world
        .spawn((Drone::new(DroneKind::Scout, 37.0), Transform::from_xyz(0.0, 200.0, 1.0)))
        .id();
    let dying = world
        .spawn((Drone::new(DroneKind::Heavy, 37.0), Transform::from_xyz(50.0, 0.0, 1.0)))
        .id();

    run_system_once(&mut world, spawn_radar_markers);
    assert_eq!(world.query::<&RadarMarker>().iter(&world).count(), 2);

    world.entity_mut(dying).insert(PendingDespawn);
    run_system_once(&mut world, update_radar_markers);

    let mut q = world.query::<(&RadarMarker, &Transform, Option<&PendingDespawn>)>();
    for (marker, tf, pending) in q.iter(&world) {
        if marker.drone == alive {
            assert!(pending.is_none());
            assert!(tf.translation.y > RADAR_CENTER.y);
        } else {
            assert_eq!(marker.drone, dying);
            assert!(pending.is_some());
        }
    }
}

#[test]
fn crosshair_flashes_on_hit_and_sits_ahead_of_turret() {
    let mut world = World::new();
    world.init_resource::<Time>();
    world.init_resource::<Aim>();
    world.init_resource::<Messages<DroneHit>>();
    world.spawn((Player, Transform::default()));
    let cross = world
        .spawn((Crosshair::default(), Sprite::default(), Transform::default()))
        .id();

    let drone = world.spawn_empty().id();
    world.write_message(DroneHit { drone });
    run_system_once(&mut world, update_crosshair);

    assert!(world.get::<Crosshair>(cross).unwrap().flash > 0.0);
    let tf = world.get::<Transform>(cross).unwrap();
    assert!((tf.translation.y - CROSSHAIR_DISTANCE).abs() < 1e-3);
}
