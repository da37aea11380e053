//! Contact resolution for bullets, drones and the player.
//!
//! Avian reports each new contact as a `CollisionStart` message. A pair may
//! show up more than once before the despawn markers land, so every bullet
//! and every drone is resolved at most once per pass, and entities already
//! marked `PendingDespawn` are skipped by the queries.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::Bullet;
use crate::common::lifecycle::PendingDespawn;
use crate::plugins::drones::{Drone, DroneHit};
use crate::plugins::player::{Aim, HitOutcome, Player, PlayerDestroyed, PlayerHit, PlayerVitals};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

pub fn resolve_combat_collisions(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    q_bullets: Query<&Bullet, Without<PendingDespawn>>,
    mut q_drones: Query<&mut Drone, Without<PendingDespawn>>,
    q_player: Query<&Transform, With<Player>>,
    aim: Res<Aim>,
    mut vitals: ResMut<PlayerVitals>,
    mut drone_hits: MessageWriter<DroneHit>,
    mut player_hits: MessageWriter<PlayerHit>,
    mut player_destroyed: MessageWriter<PlayerDestroyed>,
    mut resolved: Local<HashSet<Entity>>,
) {
    resolved.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);
        let (a, b) = (t1.gameplay_owner(), t2.gameplay_owner());

        // BULLET: damage a live drone, then disappear whatever was hit.
        let bullet_side = if q_bullets.contains(a) {
            Some((a, b))
        } else if q_bullets.contains(b) {
            Some((b, a))
        } else {
            None
        };

        if let Some((bullet_e, other)) = bullet_side {
            if !resolved.insert(bullet_e) {
                continue;
            }
            let Ok(bullet) = q_bullets.get(bullet_e) else {
                continue;
            };

            if let Ok(mut drone) = q_drones.get_mut(other) {
                if drone.behavior.on_bullet_hit(bullet.damage) {
                    drone_hits.write(DroneHit { drone: other });
                }
            }

            commands.entity(bullet_e).insert(PendingDespawn);
            continue;
        }

        // DRONE <-> PLAYER: ram damage, drone removed without score.
        let (drone_e, player_e) = if q_drones.contains(a) && q_player.contains(b) {
            (a, b)
        } else if q_drones.contains(b) && q_player.contains(a) {
            (b, a)
        } else {
            continue;
        };

        if !resolved.insert(drone_e) {
            continue;
        }
        let Ok(mut drone) = q_drones.get_mut(drone_e) else {
            continue;
        };
        if !drone.behavior.on_player_contact() {
            continue;
        }
        commands.entity(drone_e).insert(PendingDespawn);

        match vitals.on_hit(drone.kind.contact_damage()) {
            HitOutcome::Damaged { fraction } => {
                player_hits.write(PlayerHit { health_fraction: fraction });
            }
            HitOutcome::Destroyed => {
                player_hits.write(PlayerHit { health_fraction: 0.0 });
                let position = q_player
                    .get(player_e)
                    .map(|tf| tf.translation.truncate())
                    .unwrap_or_default();
                player_destroyed.write(PlayerDestroyed {
                    position,
                    heading: aim.heading,
                });
            }
            HitOutcome::Ignored => {}
        }
    }
}
