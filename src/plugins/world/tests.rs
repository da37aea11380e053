use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;

#[test]
fn spawns_four_static_walls_on_the_world_layer() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let mut q = world.query_filtered::<(&RigidBody, &CollisionLayers), With<Wall>>();
    let walls: Vec<_> = q.iter(&world).collect();
    assert_eq!(walls.len(), 4);

    for (rb, layers) in walls {
        assert!(matches!(rb, RigidBody::Static));
        assert!(layers.memberships.has_all(Layer::World));
        assert!(layers.filters.has_all(Layer::Bullet));
        assert!(layers.filters.has_all(Layer::Drone));
    }
}

#[test]
fn walls_enclose_the_drone_launch_point() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let launch = crate::common::tunables::Tunables::default().drone_launch_point;
    assert!(launch.x.abs() < ARENA_HALF_W);
    assert!(launch.y.abs() < ARENA_HALF_H);
}

#[test]
fn floor_covers_the_arena() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_floor);

    let tiles = world
        .query::<&Name>()
        .iter(&world)
        .filter(|n| n.as_str() == "FloorTile")
        .count();
    let nx = (ARENA_HALF_W as usize) / 80 * 2 + 1;
    let ny = (ARENA_HALF_H as usize) / 80 * 2 + 1;
    assert_eq!(tiles, nx * ny);
}
