use bevy::prelude::*;

/// Countdown to self-destruction for a bullet that hit nothing.
#[derive(Clone, Copy, Debug)]
pub struct BulletBehavior {
    time_to_live: f32,
    elapsed: f32,
}

impl BulletBehavior {
    pub fn new(time_to_live: f32) -> Self {
        Self {
            time_to_live,
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance one fixed step. Returns `true` once the bullet has expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.time_to_live
    }
}

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub damage: i32,
    pub behavior: BulletBehavior,
}

impl Bullet {
    pub fn new(damage: i32, time_to_live: f32) -> Self {
        Self {
            damage,
            behavior: BulletBehavior::new(time_to_live),
        }
    }
}
