//! Global state machine.
//!
//! A round begins only on `OutGame -> InGame`. `Paused -> InGame` resumes the
//! running round without touching any round state.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    /// Title screen, countdown and game-over screen.
    #[default]
    OutGame,
    InGame,
    Paused,
}

/// Schedule label for the moment a fresh round begins.
pub fn round_start() -> OnTransition<GameState> {
    OnTransition {
        exited: GameState::OutGame,
        entered: GameState::InGame,
    }
}
