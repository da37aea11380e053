//! Core plugin: shared resources, the despawn sweep and round cleanup.

use bevy::prelude::*;

use crate::common::lifecycle::{PendingDespawn, RoundScoped};
use crate::common::rng::GameRng;
use crate::common::state::round_start;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    // Tests may pre-insert their own constants or a seeded rng.
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    app.init_resource::<GameRng>();
    app.insert_resource(ClearColor(Color::srgb(0.03, 0.03, 0.06)));

    app.add_systems(round_start(), clear_round_entities);
    app.add_systems(PostUpdate, despawn_marked);
}

/// Leftovers of the previous round: drones, bullets, explosions, radar blips.
fn clear_round_entities(mut commands: Commands, q: Query<Entity, With<RoundScoped>>) {
    let mut cleared = 0;
    for e in &q {
        commands.entity(e).despawn();
        cleared += 1;
    }
    if cleared > 0 {
        debug!("cleared {cleared} entities from the previous round");
    }
}

fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
