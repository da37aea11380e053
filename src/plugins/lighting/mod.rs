//! Lighting plugin (Firefly) (render-only).
//!
//! Gameplay entities are spawned without light components; they are attached
//! here so headless apps never see render types.

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::drones::{Drone, Explosion};
use crate::plugins::player::Player;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(
        Update,
        (
            light_player,
            occlude_drones,
            light_explosions,
            fade_explosion_lights,
        ),
    );
}

fn light_player(mut commands: Commands, q_new: Query<Entity, Added<Player>>) {
    for e in &q_new {
        commands.entity(e).insert((
            PlayerLight,
            PointLight2d {
                color: Color::srgb(1.0, 0.9, 0.75),
                radius: 450.0,
                ..default()
            },
        ));
    }
}

fn occlude_drones(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q_new: Query<Entity, Added<Drone>>,
) {
    for e in &q_new {
        commands
            .entity(e)
            .insert(Occluder2d::circle(tunables.drone_radius));
    }
}

fn light_explosions(mut commands: Commands, q_new: Query<Entity, Added<Explosion>>) {
    for e in &q_new {
        commands.entity(e).insert(PointLight2d {
            color: Color::srgb(1.0, 0.6, 0.25),
            radius: 220.0,
            ..default()
        });
    }
}

/// Light range follows the remaining blast time.
fn fade_explosion_lights(mut q: Query<(&Explosion, &mut PointLight2d)>) {
    for (blast, mut light) in &mut q {
        let t = (blast.remaining / blast.duration.max(0.0001)).clamp(0.0, 1.0);
        light.radius = 220.0 * t;
    }
}
