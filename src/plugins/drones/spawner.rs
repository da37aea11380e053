//! Difficulty ramp and spawn pacing.
//!
//! Elapsed round time picks one of three phases; each phase has a fixed spawn
//! interval. A separate counter fires a spawn whenever it reaches the current
//! interval while the live drone count is below the cap.

use bevy::prelude::*;

use super::behavior::DroneKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Calm,
    Moderate,
    Critical,
}

impl Phase {
    /// Variants that may appear during this phase.
    pub fn roster(self) -> &'static [DroneKind] {
        match self {
            Phase::Calm => &DroneKind::ALL[..1],
            Phase::Moderate => &DroneKind::ALL[..2],
            Phase::Critical => &DroneKind::ALL,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnSchedule {
    pub moderate_phase_start: f32,
    pub critical_phase_start: f32,
    pub calm_interval: f32,
    pub moderate_interval: f32,
    pub critical_interval: f32,
    pub drone_cap: usize,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            moderate_phase_start: 60.0,
            critical_phase_start: 120.0,
            calm_interval: 5.0,
            moderate_interval: 3.0,
            critical_interval: 1.0,
            drone_cap: 15,
        }
    }
}

impl SpawnSchedule {
    pub fn phase_at(&self, elapsed: f32) -> Phase {
        if elapsed >= self.critical_phase_start {
            Phase::Critical
        } else if elapsed >= self.moderate_phase_start {
            Phase::Moderate
        } else {
            Phase::Calm
        }
    }

    pub fn interval(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Calm => self.calm_interval,
            Phase::Moderate => self.moderate_interval,
            Phase::Critical => self.critical_interval,
        }
    }
}

/// Elapsed in-round time, clamped once the critical phase is reached.
#[derive(Clone, Debug, Default)]
pub struct PhaseTracker {
    elapsed: f32,
}

impl PhaseTracker {
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn advance(&mut self, dt: f32, schedule: &SpawnSchedule) {
        self.elapsed = (self.elapsed + dt).min(schedule.critical_phase_start);
    }

    pub fn phase(&self, schedule: &SpawnSchedule) -> Phase {
        schedule.phase_at(self.elapsed)
    }

    pub fn spawn_interval(&self, schedule: &SpawnSchedule) -> f32 {
        schedule.interval(self.phase(schedule))
    }
}

/// Round-scoped spawn bookkeeping.
#[derive(Resource, Clone, Debug, Default)]
pub struct WaveState {
    pub tracker: PhaseTracker,
    spawn_counter: f32,
}

impl WaveState {
    #[inline]
    pub fn spawn_counter(&self) -> f32 {
        self.spawn_counter
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance one fixed step. Returns `true` when a drone should be spawned now.
    ///
    /// The counter keeps accumulating while the cap is reached, so a freed slot
    /// is refilled on the next tick.
    pub fn tick(&mut self, dt: f32, live: usize, schedule: &SpawnSchedule) -> bool {
        self.tracker.advance(dt, schedule);
        self.spawn_counter += dt;

        if self.spawn_counter >= self.tracker.spawn_interval(schedule) && live < schedule.drone_cap {
            self.spawn_counter = 0.0;
            return true;
        }
        false
    }
}
