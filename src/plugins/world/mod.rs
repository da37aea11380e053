//! World plugin: the arena walls and floor.
//!
//! Walls sit just outside the visible area. Drones slide along them, bullets
//! die on them.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

const TILE: i32 = 80;
pub const ARENA_HALF_W: f32 = 620.0;
pub const ARENA_HALF_H: f32 = 340.0;
const WALL_THICKNESS: f32 = 30.0;

#[derive(Component)]
pub struct Wall;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, (spawn_arena, spawn_floor));
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.16, 0.18, 0.24);
    let t = WALL_THICKNESS;

    let wall_layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Drone, Layer::Bullet]);

    let walls = [
        ("WallTop", Vec2::new(0.0, ARENA_HALF_H + t * 0.5), Vec2::new(ARENA_HALF_W * 2.0 + t * 2.0, t)),
        ("WallBottom", Vec2::new(0.0, -ARENA_HALF_H - t * 0.5), Vec2::new(ARENA_HALF_W * 2.0 + t * 2.0, t)),
        ("WallLeft", Vec2::new(-ARENA_HALF_W - t * 0.5, 0.0), Vec2::new(t, ARENA_HALF_H * 2.0)),
        ("WallRight", Vec2::new(ARENA_HALF_W + t * 0.5, 0.0), Vec2::new(t, ARENA_HALF_H * 2.0)),
    ];

    for (name, pos, size) in walls {
        commands.spawn((
            Name::new(name),
            Wall,
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.5)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    }
}

/// Checkered floor made of flat sprites; no assets needed.
fn spawn_floor(mut commands: Commands) {
    let nx = (ARENA_HALF_W as i32) / TILE;
    let ny = (ARENA_HALF_H as i32) / TILE;

    (-ny..=ny)
        .flat_map(|y| (-nx..=nx).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let pos = Vec3::new((x * TILE) as f32, (y * TILE) as f32, 0.0);
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.07, 0.08, 0.11)
            } else {
                Color::srgb(0.06, 0.065, 0.09)
            };

            commands.spawn((
                Name::new("FloorTile"),
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(pos),
            ));
        });
}

#[cfg(test)]
mod tests;
