//! Level one: title countdown, twin-gun firing, turret turning and pause.

use bevy::prelude::*;

use super::controller::{ControllerButton, ControllerMap, StickEasing, UNBOUND};
use super::events::LevelEvent;
use super::manager::LevelRules;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::Aim;
use crate::plugins::weapon::FireWeapon;

/// Seconds left before the round starts; `None` while idle on the title.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct RoundCountdown {
    pub remaining: Option<f32>,
}

#[derive(Debug, Default)]
pub struct LevelOne {
    /// +1 turns counter-clockwise, -1 clockwise.
    turn_dir: f32,
    easing: StickEasing,
}

impl LevelOne {
    pub fn turn_dir(&self) -> f32 {
        self.turn_dir
    }

    fn set_turn(&mut self, dir: f32) {
        if dir != self.turn_dir {
            self.easing.reset();
        }
        self.turn_dir = dir;
    }

    fn on_start_pressed(&mut self, world: &mut World) {
        match current_state(world) {
            Some(GameState::OutGame) => start_countdown(world),
            Some(GameState::InGame | GameState::Paused) => toggle_pause(world),
            None => {}
        }
    }

    fn on_update(&mut self, delta: f32, world: &mut World) {
        match current_state(world) {
            Some(GameState::OutGame) => tick_countdown(delta, world),
            Some(GameState::InGame) if self.turn_dir != 0.0 => {
                let rate = world
                    .get_resource::<Tunables>()
                    .map_or(0.0, |t| t.hat_turn_rate);
                let ease = self.easing.step();
                if let Some(mut aim) = world.get_resource_mut::<Aim>() {
                    aim.turn(self.turn_dir * rate * ease * delta);
                }
            }
            _ => {}
        }
    }
}

impl LevelRules for LevelOne {
    fn name(&self) -> &str {
        "LevelOne"
    }

    fn initialise(&mut self, world: &mut World) {
        world.insert_resource(RoundCountdown::default());
        *self = Self::default();
    }

    fn activate(&mut self, world: &mut World) {
        if let Some(mut time) = world.get_resource_mut::<Time<Virtual>>() {
            time.unpause();
        }
    }

    /// Keeps a held turn direction so the turret resumes turning after a
    /// pause; only the easing ramp restarts.
    fn deactivate(&mut self, world: &mut World) {
        self.easing.reset();
        if let Some(mut time) = world.get_resource_mut::<Time<Virtual>>() {
            time.pause();
        }
    }

    fn handle_event(&mut self, event: &LevelEvent, world: &mut World) {
        let state = current_state(world);
        let in_game = state == Some(GameState::InGame);

        match *event {
            LevelEvent::Update { delta } => self.on_update(delta, world),

            LevelEvent::KeyDown(key) => match key {
                KeyCode::Space if in_game => fire(world),
                KeyCode::Space | KeyCode::Enter if state == Some(GameState::OutGame) => {
                    start_countdown(world)
                }
                KeyCode::KeyP => toggle_pause(world),
                _ => {}
            },

            LevelEvent::MouseMove { delta } if in_game => {
                let sensitivity = world
                    .get_resource::<Tunables>()
                    .map_or(0.0, |t| t.mouse_sensitivity);
                if let Some(mut aim) = world.get_resource_mut::<Aim>() {
                    // Moving right turns clockwise.
                    aim.turn(-delta.x * sensitivity);
                }
            }

            LevelEvent::MouseClick(MouseButton::Left) if in_game => fire(world),

            LevelEvent::JoystickButtonDown { button } => {
                let map = controller_map(world);
                if map.is(ControllerButton::Start, button) {
                    self.on_start_pressed(world);
                } else if map.is(ControllerButton::X, button) && in_game {
                    fire(world);
                } else if map.is(ControllerButton::DpadLeft, button) {
                    self.set_turn(1.0);
                } else if map.is(ControllerButton::DpadRight, button) {
                    self.set_turn(-1.0);
                }
            }

            LevelEvent::JoystickButtonUp { button } => {
                let map = controller_map(world);
                let released_left = map.is(ControllerButton::DpadLeft, button) && self.turn_dir > 0.0;
                let released_right = map.is(ControllerButton::DpadRight, button) && self.turn_dir < 0.0;
                if released_left || released_right {
                    self.set_turn(0.0);
                }
            }

            LevelEvent::JoystickHatMove { position } => {
                let map = controller_map(world);
                // Unbound hats must not cancel D-pad button turning.
                if map.button(ControllerButton::HatLeft) == UNBOUND
                    && map.button(ControllerButton::HatRight) == UNBOUND
                {
                    return;
                }
                let left = map.hat_has(ControllerButton::HatLeft, position);
                let right = map.hat_has(ControllerButton::HatRight, position);
                self.set_turn(f32::from(u8::from(left)) - f32::from(u8::from(right)));
            }

            LevelEvent::JoystickDisconnected => self.set_turn(0.0),

            LevelEvent::SoundFinished { emitter } => {
                debug!("sound finished on {emitter:?}");
            }

            _ => {}
        }
    }
}

fn current_state(world: &World) -> Option<GameState> {
    world.get_resource::<State<GameState>>().map(|s| *s.get())
}

fn set_state(world: &mut World, state: GameState) {
    if let Some(mut next) = world.get_resource_mut::<NextState<GameState>>() {
        next.set(state);
    }
}

fn controller_map(world: &World) -> ControllerMap {
    world
        .get_resource::<ControllerMap>()
        .cloned()
        .unwrap_or_default()
}

fn fire(world: &mut World) {
    world.write_message(FireWeapon);
}

fn toggle_pause(world: &mut World) {
    match current_state(world) {
        Some(GameState::InGame) => set_state(world, GameState::Paused),
        Some(GameState::Paused) => set_state(world, GameState::InGame),
        _ => {}
    }
}

fn start_countdown(world: &mut World) {
    let seconds = world
        .get_resource::<Tunables>()
        .map_or(3.0, |t| t.round_countdown);
    let Some(mut countdown) = world.get_resource_mut::<RoundCountdown>() else {
        return;
    };
    if countdown.remaining.is_none() {
        countdown.remaining = Some(seconds);
        info!("round starts in {seconds}s");
    }
}

fn tick_countdown(delta: f32, world: &mut World) {
    let Some(mut countdown) = world.get_resource_mut::<RoundCountdown>() else {
        return;
    };
    let Some(remaining) = countdown.remaining else {
        return;
    };

    let left = remaining - delta;
    if left > 0.0 {
        countdown.remaining = Some(left);
    } else {
        countdown.remaining = None;
        set_state(world, GameState::InGame);
    }
}
