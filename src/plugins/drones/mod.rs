//! Drones plugin: wave spawning, per-drone attack/health lifecycle and explosions.
//!
//! ```text
//! FixedUpdate (InGame)
//!   spawn_drones     WaveState tick -> maybe spawn one drone at the launch point
//!   advance_drones   DroneBehavior tick -> dive at the player | DroneDestroyed + PendingDespawn
//!   spawn_explosions DroneDestroyed -> Explosion at the drone's last position
//!   tick_explosions  Explosion expiry -> PendingDespawn + LevelEvent::SoundFinished
//! ```
//!
//! Bullet and player contacts are resolved by the weapon plugin, which only
//! mutates `Drone` health or status. Everything that follows from a kill
//! (notification, explosion, score) happens here or downstream of
//! `DroneDestroyed`, on the next tick.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::lifecycle::{PendingDespawn, RoundScoped};
use crate::common::rng::GameRng;
use crate::common::state::{round_start, GameState};
use crate::common::tunables::Tunables;
use crate::plugins::level::events::LevelEvent;
use crate::plugins::player::Player;

pub mod behavior;
pub mod spawner;

use behavior::{DroneBehavior, DroneKind, DroneStep};
use spawner::WaveState;

// -----------------------------------------------------------------------------
// Components + messages
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone)]
pub struct Drone {
    pub kind: DroneKind,
    pub behavior: DroneBehavior,
}

impl Drone {
    pub fn new(kind: DroneKind, attack_timeout: f32) -> Self {
        Self {
            kind,
            behavior: DroneBehavior::new(kind.health(), attack_timeout),
        }
    }
}

/// Short-lived blast left behind by a destroyed drone.
#[derive(Component, Debug, Clone)]
pub struct Explosion {
    pub remaining: f32,
    pub duration: f32,
}

/// A drone ran out of health.
#[derive(Message, Clone, Copy, Debug)]
pub struct DroneDestroyed {
    pub position: Vec2,
    pub points: u32,
    pub kind: DroneKind,
}

/// A bullet landed on a live drone.
#[derive(Message, Clone, Copy, Debug)]
pub struct DroneHit {
    pub drone: Entity,
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.init_resource::<WaveState>()
        .add_message::<DroneDestroyed>()
        .add_message::<DroneHit>()
        .add_systems(round_start(), reset_wave);

    app.add_systems(
        FixedUpdate,
        (spawn_drones, advance_drones, spawn_explosions)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    // Explosions finish even after the round is over.
    app.add_systems(FixedUpdate, tick_explosions.after(spawn_explosions));
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

/// Components for a drone leaving `position` along `heading` (radians).
pub fn drone_bundle(kind: DroneKind, position: Vec2, heading: f32, tunables: &Tunables) -> impl Bundle {
    let layers = CollisionLayers::new(Layer::Drone, [Layer::World, Layer::Player, Layer::Bullet]);
    let color = match kind {
        DroneKind::Scout => Color::srgb(0.9, 0.25, 0.25),
        DroneKind::Gunship => Color::srgb(0.95, 0.55, 0.2),
        DroneKind::Heavy => Color::srgb(0.7, 0.2, 0.75),
    };

    (
        Name::new(format!("Drone({kind:?})")),
        RoundScoped,
        Drone::new(kind, tunables.drone_attack_timeout),
        Sprite {
            color,
            custom_size: Some(Vec2::splat(tunables.drone_radius * 2.0)),
            ..default()
        },
        Transform::from_translation(position.extend(1.0))
            .with_rotation(Quat::from_rotation_z(heading)),
        RigidBody::Dynamic,
        Collider::circle(tunables.drone_radius),
        layers,
        LinearVelocity(Vec2::from_angle(heading) * tunables.drone_drift_speed),
        CollisionEventsEnabled,
    )
}

fn reset_wave(mut waves: ResMut<WaveState>) {
    waves.reset();
}

/// Advance the difficulty ramp and spawn at most one drone per tick.
pub fn spawn_drones(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut waves: ResMut<WaveState>,
    mut rng: ResMut<GameRng>,
    q_live: Query<(), (With<Drone>, Without<PendingDespawn>)>,
) {
    let live = q_live.iter().count();
    if !waves.tick(time.delta_secs(), live, &tunables.spawn) {
        return;
    }

    let roster = waves.tracker.phase(&tunables.spawn).roster();
    let kind = roster[rng.index(roster.len())];
    let heading = rng.heading();

    commands.spawn(drone_bundle(kind, tunables.drone_launch_point, heading, &tunables));
    debug!("spawned {kind:?} drone ({} live)", live + 1);
}

// -----------------------------------------------------------------------------
// Rules: attack + death
// -----------------------------------------------------------------------------

/// Tick every live drone; launch attacks and report kills.
pub fn advance_drones(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    q_player: Query<&Transform, (With<Player>, Without<Drone>)>,
    mut q: Query<(Entity, &mut Drone, &Transform, &mut LinearVelocity), Without<PendingDespawn>>,
    mut destroyed: MessageWriter<DroneDestroyed>,
) {
    let dt = time.delta_secs();
    let target = q_player.single().ok().map(|tf| tf.translation.truncate());

    for (e, mut drone, tf, mut vel) in &mut q {
        match drone.behavior.tick(dt) {
            DroneStep::Hold => {}
            DroneStep::BeginAttack => {
                let here = tf.translation.truncate();
                // Without a player to aim at, dive along the current course.
                let dir = target
                    .map(|t| t - here)
                    .filter(|d| d.length_squared() > 1e-4)
                    .map(Vec2::normalize)
                    .unwrap_or_else(|| vel.0.normalize_or(Vec2::NEG_Y));
                vel.0 = dir * tunables.drone_attack_speed;
            }
            DroneStep::Destroyed => {
                destroyed.write(DroneDestroyed {
                    position: tf.translation.truncate(),
                    points: drone.kind.points(),
                    kind: drone.kind,
                });
                commands.entity(e).insert(PendingDespawn);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Explosions
// -----------------------------------------------------------------------------

pub fn spawn_explosions(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut destroyed: MessageReader<DroneDestroyed>,
) {
    for ev in destroyed.read() {
        commands.spawn((
            Name::new("Explosion"),
            RoundScoped,
            Explosion {
                remaining: tunables.explosion_duration,
                duration: tunables.explosion_duration,
            },
            Sprite {
                color: Color::srgb(1.0, 0.75, 0.3),
                custom_size: Some(Vec2::splat(tunables.drone_radius * 3.0)),
                ..default()
            },
            Transform::from_translation(ev.position.extend(3.0)),
        ));
    }
}

/// Shrink and fade each explosion; its expiry is the end of the blast cue.
pub fn tick_explosions(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut q: Query<(Entity, &mut Explosion, &mut Sprite, &mut Transform), Without<PendingDespawn>>,
    mut level_events: MessageWriter<LevelEvent>,
) {
    let dt = time.delta_secs();

    for (e, mut blast, mut sprite, mut tf) in &mut q {
        blast.remaining -= dt;

        if blast.remaining <= 0.0 {
            commands.entity(e).insert(PendingDespawn);
            level_events.write(LevelEvent::SoundFinished { emitter: e });
            continue;
        }

        let t = 1.0 - (blast.remaining / blast.duration.max(0.0001)).clamp(0.0, 1.0);
        tf.scale = Vec3::splat(1.0 + t);
        sprite.color.set_alpha(1.0 - t);
    }
}
