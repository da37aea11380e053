//! Per-drone combat state machine.
//!
//! ```text
//!   Idle ──(attack timer elapses)──> Attacking
//!    │                                  │
//!    └──(health <= 0 / player contact)──┴──> Destroyed (terminal)
//! ```
//!
//! The machine is plain data so the fixed-step systems stay thin and the rules
//! can be tested without a world.

/// Drone variants. Each variant fixes health, score value and contact damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DroneKind {
    Scout,
    Gunship,
    Heavy,
}

impl DroneKind {
    pub const ALL: [DroneKind; 3] = [DroneKind::Scout, DroneKind::Gunship, DroneKind::Heavy];

    pub fn health(self) -> i32 {
        match self {
            DroneKind::Scout => 4,
            DroneKind::Gunship => 5,
            DroneKind::Heavy => 6,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            DroneKind::Scout => 10,
            DroneKind::Gunship => 15,
            DroneKind::Heavy => 20,
        }
    }

    /// Health removed from the player on contact.
    pub fn contact_damage(self) -> f32 {
        match self {
            DroneKind::Scout => 2.0,
            DroneKind::Gunship => 3.0,
            DroneKind::Heavy => 4.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DroneStatus {
    Idle,
    Attacking,
    Destroyed,
}

/// What a tick asks the owning system to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DroneStep {
    Hold,
    BeginAttack,
    Destroyed,
}

#[derive(Clone, Debug)]
pub struct DroneBehavior {
    health: i32,
    attack_timer: f32,
    attack_timeout: f32,
    has_attacked: bool,
    status: DroneStatus,
}

impl DroneBehavior {
    pub fn new(health: i32, attack_timeout: f32) -> Self {
        Self {
            health,
            attack_timer: 0.0,
            attack_timeout,
            has_attacked: false,
            status: DroneStatus::Idle,
        }
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn status(&self) -> DroneStatus {
        self.status
    }

    #[inline]
    pub fn has_attacked(&self) -> bool {
        self.has_attacked
    }

    #[inline]
    pub fn attack_timer(&self) -> f32 {
        self.attack_timer
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.status == DroneStatus::Destroyed
    }

    /// Advance one fixed step.
    ///
    /// Depleted health wins over the attack timer, in either live state.
    pub fn tick(&mut self, dt: f32) -> DroneStep {
        match self.status {
            DroneStatus::Destroyed => DroneStep::Hold,
            _ if self.health <= 0 => {
                self.status = DroneStatus::Destroyed;
                DroneStep::Destroyed
            }
            DroneStatus::Idle => {
                self.attack_timer += dt;
                if self.attack_timer >= self.attack_timeout {
                    self.status = DroneStatus::Attacking;
                    self.has_attacked = true;
                    DroneStep::BeginAttack
                } else {
                    DroneStep::Hold
                }
            }
            DroneStatus::Attacking => DroneStep::Hold,
        }
    }

    /// Apply bullet damage. Returns `false` when the drone is already dead,
    /// including depleted health still waiting for its next tick.
    pub fn on_bullet_hit(&mut self, damage: i32) -> bool {
        if self.is_destroyed() || self.health <= 0 {
            return false;
        }
        self.health -= damage;
        true
    }

    /// Ram the player. Returns `true` only the first time.
    pub fn on_player_contact(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.status = DroneStatus::Destroyed;
        true
    }
}
