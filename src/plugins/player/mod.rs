//! Player plugin: the fixed turret, its health and the round score.
//!
//! Pipeline:
//! - Startup: spawn the turret at the arena centre (it never moves, only turns)
//! - Update: follow `Aim` with the turret sprite
//! - FixedUpdate: tally kills into `Score`, end the round on `PlayerDestroyed`
//! - OutGame -> InGame: reset vitals, score and aim

use std::f32::consts::FRAC_PI_2;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::state::{round_start, GameState};
use crate::common::tunables::Tunables;
use crate::plugins::drones::DroneDestroyed;

pub mod vitals;

pub use vitals::{HitOutcome, PlayerVitals};

#[derive(Component)]
pub struct Player;

/// Turret heading in radians, counter-clockwise from +X.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Aim {
    pub heading: f32,
}

impl Default for Aim {
    fn default() -> Self {
        Self { heading: FRAC_PI_2 }
    }
}

impl Aim {
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    pub fn turn(&mut self, radians: f32) {
        self.heading = (self.heading + radians).rem_euclid(std::f32::consts::TAU);
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
    pub kills: u32,
}

/// Summary of the most recently finished round, shown on the title screen.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LastRound(pub Option<Score>);

/// Health changed; carries the remaining fraction for the HUD.
#[derive(Message, Clone, Copy, Debug)]
pub struct PlayerHit {
    pub health_fraction: f32,
}

/// Health reached zero. Terminal for the round.
#[derive(Message, Clone, Copy, Debug)]
pub struct PlayerDestroyed {
    pub position: Vec2,
    pub heading: f32,
}

pub fn plugin(app: &mut App) {
    let max_health = app
        .world()
        .get_resource::<Tunables>()
        .map_or(100.0, |t| t.player_max_health);

    app.insert_resource(PlayerVitals::new(max_health))
        .init_resource::<Aim>()
        .init_resource::<Score>()
        .init_resource::<LastRound>()
        .add_message::<PlayerHit>()
        .add_message::<PlayerDestroyed>()
        .add_systems(Startup, spawn)
        .add_systems(round_start(), reset_round)
        .add_systems(Update, follow_aim)
        .add_systems(
            FixedUpdate,
            (
                tally_score.after(crate::plugins::drones::advance_drones),
                end_round_on_destroyed,
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::Drone]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::new(tunables.player_radius * 1.4, tunables.player_radius * 2.2)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 2.0),
        RigidBody::Static,
        Collider::circle(tunables.player_radius),
        layers,
    ));
}

fn reset_round(mut vitals: ResMut<PlayerVitals>, mut score: ResMut<Score>, mut aim: ResMut<Aim>) {
    vitals.reset();
    *score = Score::default();
    *aim = Aim::default();
    info!("round started");
}

/// The sprite points up at heading π/2.
fn follow_aim(aim: Res<Aim>, mut q_player: Query<&mut Transform, With<Player>>) {
    let Ok(mut tf) = q_player.single_mut() else {
        return;
    };
    tf.rotation = Quat::from_rotation_z(aim.heading - FRAC_PI_2);
}

/// Kills are the only source of score.
pub fn tally_score(mut score: ResMut<Score>, mut destroyed: MessageReader<DroneDestroyed>) {
    for ev in destroyed.read() {
        score.points += ev.points;
        score.kills += 1;
    }
}

fn end_round_on_destroyed(
    mut destroyed: MessageReader<PlayerDestroyed>,
    score: Res<Score>,
    mut last: ResMut<LastRound>,
    mut next: ResMut<NextState<GameState>>,
) {
    if destroyed.read().last().is_none() {
        return;
    }

    last.0 = Some(*score);
    next.set(GameState::OutGame);
    info!("round over: {} points, {} kills", score.points, score.kills);
}
