//! Weapon plugin: twin guns, bullet lifetime and combat contact resolution.
//!
//! ```text
//!   Update (InGame)
//!     level rules ── FireWeapon ──> fire_twin_guns ── spawns 2 bullets
//!
//!   FixedUpdate (InGame)
//!     expire_bullets: time-to-live elapsed -> PendingDespawn
//!
//!   FixedPostUpdate (InGame, after avian collision events)
//!     resolve_combat_collisions: bullet->drone damage, drone->player ram
//! ```
//!
//! Bullets are sensors: they report contacts but never push drones around.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::lifecycle::{PendingDespawn, RoundScoped};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::level::LevelSystems;
use crate::plugins::player::{Aim, Player};

pub mod collision;
pub mod components;
pub mod messages;

pub use components::{Bullet, BulletBehavior};
pub use messages::FireWeapon;

pub fn plugin(app: &mut App) {
    app.add_message::<FireWeapon>();

    app.add_systems(
        Update,
        fire_twin_guns
            .after(LevelSystems::Dispatch)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        expire_bullets.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        collision::resolve_combat_collisions
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Components for one bullet leaving `pos` with velocity `vel`.
pub fn bullet_bundle(pos: Vec2, vel: Vec2, tunables: &Tunables) -> impl Bundle {
    (
        Name::new("Bullet"),
        RoundScoped,
        Bullet::new(tunables.bullet_damage, tunables.bullet_time_to_live),
        Sprite {
            color: Color::srgb(1.0, 0.85, 0.3),
            custom_size: Some(Vec2::splat(6.0)),
            ..default()
        },
        Transform::from_translation(pos.extend(2.0)),
        RigidBody::Dynamic,
        Collider::circle(3.0),
        Sensor,
        CollisionLayers::new(Layer::Bullet, [Layer::World, Layer::Drone]),
        LinearVelocity(vel),
        CollisionEventsEnabled,
    )
}

/// Muzzle positions of the left and right gun.
pub fn twin_muzzles(origin: Vec2, forward: Vec2, tunables: &Tunables) -> [Vec2; 2] {
    let muzzle = origin + forward * tunables.muzzle_distance;
    let left = forward.perp() * tunables.twin_gun_offset;
    [muzzle + left, muzzle - left]
}

/// One `FireWeapon` is one volley: exactly two bullets.
pub fn fire_twin_guns(
    mut commands: Commands,
    mut fire: MessageReader<FireWeapon>,
    aim: Res<Aim>,
    tunables: Res<Tunables>,
    q_player: Query<&Transform, With<Player>>,
) {
    let shots = fire.read().count();
    if shots == 0 {
        return;
    }

    let player_tf = match q_player.single() {
        Ok(v) => v,
        Err(e) => {
            debug!("No single Player Transform: {e:?}");
            return;
        }
    };

    let forward = aim.forward();
    let vel = forward * tunables.bullet_speed;
    let muzzles = twin_muzzles(player_tf.translation.truncate(), forward, &tunables);

    for _ in 0..shots {
        for pos in muzzles {
            commands.spawn(bullet_bundle(pos, vel, &tunables));
        }
    }
}

pub fn expire_bullets(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut q: Query<(Entity, &mut Bullet), Without<PendingDespawn>>,
) {
    let dt = time.delta_secs();
    for (e, mut bullet) in &mut q {
        if bullet.behavior.tick(dt) {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

#[cfg(test)]
mod tests;
