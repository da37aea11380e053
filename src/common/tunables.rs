//! Tunable gameplay constants.

use bevy::prelude::*;

use crate::plugins::drones::spawner::SpawnSchedule;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,

    pub spawn: SpawnSchedule,
    /// Every drone leaves from this point.
    pub drone_launch_point: Vec2,
    pub drone_radius: f32,
    /// Seconds a drone loiters before it dives at the player.
    pub drone_attack_timeout: f32,
    pub drone_drift_speed: f32,
    pub drone_attack_speed: f32,

    pub bullet_speed: f32,
    pub bullet_time_to_live: f32,
    pub bullet_damage: i32,
    /// Lateral distance of each twin gun from the firing line.
    pub twin_gun_offset: f32,
    pub muzzle_distance: f32,

    pub player_max_health: f32,
    pub player_radius: f32,

    pub explosion_duration: f32,

    /// Radians of turn per pixel of horizontal mouse motion.
    pub mouse_sensitivity: f32,
    /// Radians per second at full easing.
    pub hat_turn_rate: f32,
    pub round_countdown: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,

            spawn: SpawnSchedule::default(),
            drone_launch_point: Vec2::new(0.0, 220.0),
            drone_radius: 16.0,
            drone_attack_timeout: 37.0,
            drone_drift_speed: 12.0,
            drone_attack_speed: 160.0,

            bullet_speed: 900.0,
            bullet_time_to_live: 1.0,
            bullet_damage: 1,
            twin_gun_offset: 12.0,
            muzzle_distance: 24.0,

            player_max_health: 100.0,
            player_radius: 18.0,

            explosion_duration: 0.78,

            mouse_sensitivity: 0.004,
            hat_turn_rate: 2.4,
            round_countdown: 3.0,
        }
    }
}
