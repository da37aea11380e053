//! Player health bookkeeping.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitOutcome {
    /// Health dropped and the player is still standing.
    Damaged { fraction: f32 },
    /// This hit brought health to zero. Reported once per round.
    Destroyed,
    /// The player was already destroyed.
    Ignored,
}

/// Invariant: `0 <= current <= max_health`, and `current` only decreases
/// within a round.
#[derive(Resource, Clone, Debug)]
pub struct PlayerVitals {
    max_health: f32,
    current: f32,
    destroyed: bool,
}

impl PlayerVitals {
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(f32::EPSILON);
        Self {
            max_health,
            current: max_health,
            destroyed: false,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        self.current / self.max_health
    }

    pub fn reset(&mut self) {
        self.current = self.max_health;
        self.destroyed = false;
    }

    pub fn on_hit(&mut self, damage: f32) -> HitOutcome {
        if self.destroyed {
            return HitOutcome::Ignored;
        }

        self.current = (self.current - damage.max(0.0)).max(0.0);

        if self.current <= 0.0 {
            self.destroyed = true;
            HitOutcome::Destroyed
        } else {
            HitOutcome::Damaged { fraction: self.fraction() }
        }
    }
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::new(100.0)
    }
}
