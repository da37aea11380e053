//! HUD plugin (render-only).
//!
//! The camera never moves, so the HUD is plain world-space sprites and
//! `Text2d` pinned to the edges of the 1280x720 view.
//!
//! - score, live drone count and status banner text
//! - health bar: width and colour follow `PlayerHit`, full again at round start
//! - crosshair ahead of the turret, flashing on `DroneHit`
//! - radar: one marker per live drone, relative to the player
//! - F2 debug overlay: phase, elapsed, spawn interval, live count

use bevy::prelude::*;

use crate::common::lifecycle::{PendingDespawn, RoundScoped};
use crate::common::state::{round_start, GameState};
use crate::common::tunables::Tunables;
use crate::plugins::drones::spawner::WaveState;
use crate::plugins::drones::{Drone, DroneHit};
use crate::plugins::level::{DebugOverlay, RoundCountdown};
use crate::plugins::player::{Aim, LastRound, Player, PlayerHit, Score};

const HALF_W: f32 = 640.0;
const HALF_H: f32 = 360.0;
const HUD_Z: f32 = 50.0;

const HEALTH_BAR_SIZE: Vec2 = Vec2::new(240.0, 14.0);
const HEALTH_BAR_ORIGIN: Vec2 = Vec2::new(-HALF_W + 24.0, -HALF_H + 28.0);

const CROSSHAIR_DISTANCE: f32 = 140.0;
const CROSSHAIR_FLASH: f32 = 0.12;

const RADAR_CENTER: Vec2 = Vec2::new(HALF_W - 90.0, -HALF_H + 90.0);
const RADAR_RADIUS: f32 = 70.0;
/// Radar pixels per world pixel.
const RADAR_SCALE: f32 = 0.12;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct DroneCountText;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct DebugText;

#[derive(Component)]
pub struct HealthBar;

#[derive(Component, Default)]
pub struct Crosshair {
    pub flash: f32,
}

/// Radar blip tracking one drone.
#[derive(Component, Debug)]
pub struct RadarMarker {
    pub drone: Entity,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud)
        .add_systems(round_start(), reset_health_bar)
        .add_systems(
            Update,
            (
                update_score_text,
                update_drone_count,
                update_status_text,
                update_debug_text,
                update_health_bar,
                update_crosshair,
                (spawn_radar_markers, update_radar_markers).chain(),
            ),
        );
}

fn hud_text(text: impl Into<String>, size: f32, color: Color, pos: Vec2) -> impl Bundle {
    (
        Text2d::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Transform::from_translation(pos.extend(HUD_Z)),
    )
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        hud_text("Score 0", 26.0, Color::WHITE, Vec2::new(-HALF_W + 110.0, HALF_H - 28.0)),
    ));
    commands.spawn((
        Name::new("DroneCountText"),
        DroneCountText,
        hud_text(
            "Drones 0",
            22.0,
            Color::srgb(1.0, 0.4, 0.35),
            Vec2::new(HALF_W - 110.0, HALF_H - 28.0),
        ),
    ));
    commands.spawn((
        Name::new("StatusText"),
        StatusText,
        hud_text("", 40.0, Color::srgb(1.0, 0.9, 0.3), Vec2::new(0.0, 120.0)),
    ));
    commands.spawn((
        Name::new("DebugText"),
        DebugText,
        hud_text("", 16.0, Color::srgb(0.5, 1.0, 0.5), Vec2::new(-HALF_W + 150.0, HALF_H - 80.0)),
        Visibility::Hidden,
    ));

    commands.spawn((
        Name::new("HealthBar"),
        HealthBar,
        Sprite {
            color: health_color(1.0),
            custom_size: Some(HEALTH_BAR_SIZE),
            ..default()
        },
        health_bar_transform(1.0),
    ));

    commands.spawn((
        Name::new("Crosshair"),
        Crosshair::default(),
        Sprite {
            color: Color::WHITE,
            custom_size: Some(Vec2::splat(8.0)),
            ..default()
        },
        Transform::from_xyz(0.0, CROSSHAIR_DISTANCE, HUD_Z),
    ));

    commands.spawn((
        Name::new("Radar"),
        Sprite {
            color: Color::srgba(0.1, 0.5, 0.2, 0.35),
            custom_size: Some(Vec2::splat(RADAR_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(RADAR_CENTER.extend(HUD_Z - 1.0)),
    ));
}

// -----------------------------------------------------------------------------
// Pure helpers
// -----------------------------------------------------------------------------

/// Green at full health through yellow to red at zero.
pub fn health_color(fraction: f32) -> Color {
    let f = fraction.clamp(0.0, 1.0);
    Color::srgb((2.0 * (1.0 - f)).min(1.0), (2.0 * f).min(1.0), 0.1)
}

/// The bar shrinks from its right end; its left edge stays put.
pub fn health_bar_transform(fraction: f32) -> Transform {
    let f = fraction.clamp(0.0, 1.0);
    let centre = HEALTH_BAR_ORIGIN + Vec2::new(HEALTH_BAR_SIZE.x * f * 0.5, 0.0);
    Transform::from_translation(centre.extend(HUD_Z)).with_scale(Vec3::new(f, 1.0, 1.0))
}

/// Banner text for the current state.
pub fn status_line(state: GameState, countdown: &RoundCountdown, last: &LastRound) -> String {
    match state {
        GameState::InGame => String::new(),
        GameState::Paused => "PAUSED".to_string(),
        GameState::OutGame => match (countdown.remaining, last.0) {
            (Some(t), _) => format!("{}", t.ceil().max(1.0) as u32),
            (None, Some(score)) => format!(
                "GAME OVER  {} points, {} drones\nPress Space to fly again",
                score.points, score.kills
            ),
            (None, None) => "DRONE ANARCHY\nPress Space to start".to_string(),
        },
    }
}

/// Radar position for a drone at `drone`, seen from `player`.
pub fn radar_position(player: Vec2, drone: Vec2) -> Vec2 {
    let offset = (drone - player) * RADAR_SCALE;
    RADAR_CENTER + offset.clamp_length_max(RADAR_RADIUS)
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn update_score_text(score: Res<Score>, mut q: Query<&mut Text2d, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = format!("Score {}", score.points);
    }
}

fn update_drone_count(
    q_live: Query<(), (With<Drone>, Without<PendingDespawn>)>,
    mut q: Query<&mut Text2d, With<DroneCountText>>,
) {
    let live = q_live.iter().count();
    for mut text in &mut q {
        text.0 = format!("Drones {live}");
    }
}

fn update_status_text(
    state: Res<State<GameState>>,
    countdown: Res<RoundCountdown>,
    last: Res<LastRound>,
    mut q: Query<&mut Text2d, With<StatusText>>,
) {
    let line = status_line(*state.get(), &countdown, &last);
    for mut text in &mut q {
        if text.0 != line {
            text.0.clone_from(&line);
        }
    }
}

fn update_debug_text(
    overlay: Res<DebugOverlay>,
    waves: Res<WaveState>,
    tunables: Res<Tunables>,
    q_live: Query<(), (With<Drone>, Without<PendingDespawn>)>,
    mut q: Query<(&mut Text2d, &mut Visibility), With<DebugText>>,
) {
    for (mut text, mut vis) in &mut q {
        if !overlay.visible {
            *vis = Visibility::Hidden;
            continue;
        }
        *vis = Visibility::Visible;
        let schedule = &tunables.spawn;
        text.0 = format!(
            "phase {:?}\nelapsed {:.1}s\ninterval {:.0}s\nlive {}",
            waves.tracker.phase(schedule),
            waves.tracker.elapsed(),
            waves.tracker.spawn_interval(schedule),
            q_live.iter().count(),
        );
    }
}

pub fn update_health_bar(
    mut hits: MessageReader<PlayerHit>,
    mut q: Query<(&mut Transform, &mut Sprite), With<HealthBar>>,
) {
    let Some(hit) = hits.read().last() else {
        return;
    };
    for (mut tf, mut sprite) in &mut q {
        *tf = health_bar_transform(hit.health_fraction);
        sprite.color = health_color(hit.health_fraction);
    }
}

fn reset_health_bar(mut q: Query<(&mut Transform, &mut Sprite), With<HealthBar>>) {
    for (mut tf, mut sprite) in &mut q {
        *tf = health_bar_transform(1.0);
        sprite.color = health_color(1.0);
    }
}

pub fn update_crosshair(
    time: Res<Time>,
    aim: Res<Aim>,
    mut hits: MessageReader<DroneHit>,
    q_player: Query<&Transform, (With<Player>, Without<Crosshair>)>,
    mut q: Query<(&mut Crosshair, &mut Sprite, &mut Transform), Without<Player>>,
) {
    let hit = hits.read().count() > 0;
    let origin = q_player
        .single()
        .map(|tf| tf.translation.truncate())
        .unwrap_or(Vec2::ZERO);
    let pos = origin + aim.forward() * CROSSHAIR_DISTANCE;

    for (mut cross, mut sprite, mut tf) in &mut q {
        if hit {
            cross.flash = CROSSHAIR_FLASH;
        } else {
            cross.flash = (cross.flash - time.delta_secs()).max(0.0);
        }
        sprite.color = if cross.flash > 0.0 {
            Color::srgb(1.0, 0.2, 0.2)
        } else {
            Color::WHITE
        };
        tf.translation = pos.extend(HUD_Z);
    }
}

pub fn spawn_radar_markers(mut commands: Commands, q_new: Query<Entity, Added<Drone>>) {
    for drone in &q_new {
        commands.spawn((
            Name::new("RadarMarker"),
            RoundScoped,
            RadarMarker { drone },
            Sprite {
                color: Color::srgb(1.0, 0.3, 0.3),
                custom_size: Some(Vec2::splat(5.0)),
                ..default()
            },
            Transform::from_translation(RADAR_CENTER.extend(HUD_Z)),
        ));
    }
}

/// Follow each drone; drop markers whose drone is gone or dying.
pub fn update_radar_markers(
    mut commands: Commands,
    q_player: Query<&Transform, (With<Player>, Without<RadarMarker>)>,
    q_drones: Query<&Transform, (With<Drone>, Without<PendingDespawn>, Without<RadarMarker>)>,
    mut q_markers: Query<(Entity, &RadarMarker, &mut Transform), Without<PendingDespawn>>,
) {
    let player = q_player
        .single()
        .map(|tf| tf.translation.truncate())
        .unwrap_or(Vec2::ZERO);

    for (e, marker, mut tf) in &mut q_markers {
        match q_drones.get(marker.drone) {
            Ok(drone_tf) => {
                let pos = radar_position(player, drone_tf.translation.truncate());
                tf.translation = pos.extend(HUD_Z);
            }
            Err(_) => {
                commands.entity(e).insert(PendingDespawn);
            }
        }
    }
}

#[cfg(test)]
mod tests;
