//! Weapon tests.
//!
//! Contacts are injected as `CollisionStart` messages so the resolution logic
//! runs without the physics pipeline.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::plugins::drones::behavior::DroneKind;
use crate::plugins::drones::{Drone, DroneHit};
use crate::plugins::player::{PlayerDestroyed, PlayerHit, PlayerVitals};

const DT: f32 = 1.0 / 64.0;

fn write_collision_start(world: &mut World, a: Entity, b: Entity) {
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

fn combat_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(fixed_time_with_delta(DT));
    world.init_resource::<Aim>();
    world.insert_resource(PlayerVitals::new(100.0));
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<FireWeapon>>();
    world.init_resource::<Messages<DroneHit>>();
    world.init_resource::<Messages<PlayerHit>>();
    world.init_resource::<Messages<PlayerDestroyed>>();
    world.spawn((Player, Transform::from_xyz(0.0, 0.0, 2.0)));
    world
}

fn spawn_bullet(world: &mut World) -> Entity {
    world
        .spawn((Bullet::new(1, 1.0), Transform::default()))
        .id()
}

fn spawn_drone(world: &mut World, kind: DroneKind) -> Entity {
    world
        .spawn((Drone::new(kind, 37.0), Transform::from_xyz(0.0, 40.0, 1.0)))
        .id()
}

fn drain<T: Message>(world: &mut World) -> Vec<T> {
    world.resource_mut::<Messages<T>>().drain().collect()
}

// -----------------------------------------------------------------------------
// Firing
// -----------------------------------------------------------------------------

#[test]
fn one_fire_request_spawns_exactly_two_bullets() {
    let mut world = combat_world();
    world.write_message(FireWeapon);

    run_system_once(&mut world, fire_twin_guns);

    let tunables = Tunables::default();
    let mut q = world.query::<(&Bullet, &LinearVelocity, &Transform)>();
    let bullets: Vec<_> = q.iter(&world).collect();
    assert_eq!(bullets.len(), 2);

    for (bullet, vel, _) in &bullets {
        assert_eq!(bullet.damage, tunables.bullet_damage);
        assert!(vel.0.abs_diff_eq(Vec2::Y * tunables.bullet_speed, 1e-3));
    }

    // Side by side, mirrored across the aim line.
    let xs: Vec<f32> = bullets.iter().map(|(_, _, tf)| tf.translation.x).collect();
    assert!((xs[0] + xs[1]).abs() < 1e-4);
    assert!((xs[0] - xs[1]).abs() > 1.0);
}

#[test]
fn no_fire_request_spawns_nothing() {
    let mut world = combat_world();
    run_system_once(&mut world, fire_twin_guns);
    assert_eq!(world.query::<&Bullet>().iter(&world).count(), 0);
}

#[test]
fn twin_muzzles_follow_heading() {
    let tunables = Tunables::default();
    let [left, right] = twin_muzzles(Vec2::ZERO, Vec2::X, &tunables);

    assert!((left.x - tunables.muzzle_distance).abs() < 1e-4);
    assert!((right.x - tunables.muzzle_distance).abs() < 1e-4);
    assert!((left.y - tunables.twin_gun_offset).abs() < 1e-4);
    assert!((right.y + tunables.twin_gun_offset).abs() < 1e-4);
}

// -----------------------------------------------------------------------------
// Lifetime
// -----------------------------------------------------------------------------

#[test]
fn bullet_expires_after_time_to_live() {
    let mut world = combat_world();
    let e = spawn_bullet(&mut world);

    for _ in 0..63 {
        run_system_once(&mut world, expire_bullets);
    }
    assert!(world.get::<PendingDespawn>(e).is_none());

    run_system_once(&mut world, expire_bullets);
    assert!(world.get::<PendingDespawn>(e).is_some());
}

#[test]
fn bullet_behavior_tracks_elapsed() {
    let mut behavior = BulletBehavior::new(1.0);
    assert!(!behavior.tick(0.25));
    assert!(!behavior.tick(0.5));
    assert_eq!(behavior.elapsed(), 0.75);
    assert!(behavior.tick(0.25));
}

// -----------------------------------------------------------------------------
// Contact resolution
// -----------------------------------------------------------------------------

#[test]
fn bullet_hit_damages_drone_and_consumes_bullet() {
    let mut world = combat_world();
    let bullet = spawn_bullet(&mut world);
    let drone = spawn_drone(&mut world, DroneKind::Scout);

    write_collision_start(&mut world, bullet, drone);
    run_system_once(&mut world, collision::resolve_combat_collisions);

    assert!(world.get::<PendingDespawn>(bullet).is_some());
    assert!(world.get::<PendingDespawn>(drone).is_none());
    assert_eq!(world.get::<Drone>(drone).unwrap().behavior.health(), 3);

    let hits = drain::<DroneHit>(&mut world);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].drone, drone);
}

#[test]
fn bullet_is_resolved_once_even_with_duplicate_contacts() {
    let mut world = combat_world();
    let bullet = spawn_bullet(&mut world);
    let drone = spawn_drone(&mut world, DroneKind::Heavy);

    write_collision_start(&mut world, bullet, drone);
    write_collision_start(&mut world, drone, bullet);
    run_system_once(&mut world, collision::resolve_combat_collisions);

    assert_eq!(world.get::<Drone>(drone).unwrap().behavior.health(), 5);
    assert_eq!(drain::<DroneHit>(&mut world).len(), 1);
}

#[test]
fn extra_bullets_on_a_depleted_drone_do_not_flash_hits() {
    let mut world = combat_world();
    let drone = spawn_drone(&mut world, DroneKind::Scout);
    let bullets: Vec<_> = (0..5).map(|_| spawn_bullet(&mut world)).collect();

    for bullet in &bullets {
        write_collision_start(&mut world, *bullet, drone);
    }
    run_system_once(&mut world, collision::resolve_combat_collisions);

    assert_eq!(world.get::<Drone>(drone).unwrap().behavior.health(), 0);
    assert_eq!(drain::<DroneHit>(&mut world).len(), 4);
    for bullet in bullets {
        assert!(world.get::<PendingDespawn>(bullet).is_some());
    }
}

#[test]
fn bullet_hitting_a_wall_is_consumed_without_damage() {
    let mut world = combat_world();
    let bullet = spawn_bullet(&mut world);
    let wall = world.spawn(Transform::default()).id();

    write_collision_start(&mut world, wall, bullet);
    run_system_once(&mut world, collision::resolve_combat_collisions);

    assert!(world.get::<PendingDespawn>(bullet).is_some());
    assert!(drain::<DroneHit>(&mut world).is_empty());
}

#[test]
fn pending_bullets_are_ignored() {
    let mut world = combat_world();
    let bullet = spawn_bullet(&mut world);
    world.entity_mut(bullet).insert(PendingDespawn);
    let drone = spawn_drone(&mut world, DroneKind::Scout);

    write_collision_start(&mut world, bullet, drone);
    run_system_once(&mut world, collision::resolve_combat_collisions);

    assert_eq!(world.get::<Drone>(drone).unwrap().behavior.health(), 4);
}

#[test]
fn drone_ramming_player_costs_contact_damage() {
    let mut world = combat_world();
    let player = world
        .query_filtered::<Entity, With<Player>>()
        .single(&world)
        .unwrap();
    let drone = spawn_drone(&mut world, DroneKind::Gunship);

    write_collision_start(&mut world, drone, player);
    write_collision_start(&mut world, player, drone);
    run_system_once(&mut world, collision::resolve_combat_collisions);

    assert!(world.get::<PendingDespawn>(drone).is_some());
    assert!(world.get::<Drone>(drone).unwrap().behavior.is_destroyed());

    let expected = 100.0 - DroneKind::Gunship.contact_damage();
    assert_eq!(world.resource::<PlayerVitals>().current(), expected);

    let hits = drain::<PlayerHit>(&mut world);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].health_fraction - expected / 100.0).abs() < 1e-6);
    assert!(drain::<PlayerDestroyed>(&mut world).is_empty());
}

#[test]
fn fatal_ram_reports_player_destroyed_once() {
    let mut world = combat_world();
    world.insert_resource(PlayerVitals::new(3.0));
    let player = world
        .query_filtered::<Entity, With<Player>>()
        .single(&world)
        .unwrap();

    let first = spawn_drone(&mut world, DroneKind::Heavy);
    let second = spawn_drone(&mut world, DroneKind::Heavy);
    write_collision_start(&mut world, first, player);
    write_collision_start(&mut world, second, player);
    run_system_once(&mut world, collision::resolve_combat_collisions);

    assert_eq!(world.resource::<PlayerVitals>().current(), 0.0);
    assert_eq!(drain::<PlayerDestroyed>(&mut world).len(), 1);

    let hits = drain::<PlayerHit>(&mut world);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].health_fraction, 0.0);
}
