//! Level plugin: shell input, the level manager and the level one rules.
//!
//! ```text
//!   Update
//!     LevelSystems::Collect   keyboard / mouse / gamepad / frame tick -> LevelEvent
//!                             pad removal -> JoystickDisconnected
//!     LevelSystems::Dispatch  exclusive: drain LevelEvent -> LevelManager -> rules
//!
//!   Startup          load controller settings, initialise + activate LevelOne
//!   OnEnter(Paused)  deactivate
//!   OnExit(Paused)   activate
//! ```
//!
//! Drone explosions raise `SoundFinished` from FixedUpdate; it is dispatched in
//! the same frame's Update.

use std::path::Path;

use bevy::ecs::message::Messages;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::common::state::GameState;

pub mod controller;
pub mod events;
pub mod input;
pub mod manager;
pub mod rules;

pub use controller::{ControllerButton, ControllerMap, UNBOUND};
pub use events::LevelEvent;
pub use input::DebugOverlay;
pub use manager::{LevelManager, LevelRules};
pub use rules::{LevelOne, RoundCountdown};

/// Optional per-user controller layout.
pub const CONTROLLER_SETTINGS: &str = "assets/settings/controller.ron";

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LevelSystems {
    Collect,
    Dispatch,
}

pub fn plugin(app: &mut App) {
    app.add_message::<LevelEvent>()
        .init_resource::<LevelManager>()
        .init_resource::<ControllerMap>()
        .init_resource::<RoundCountdown>()
        .init_resource::<DebugOverlay>()
        .init_resource::<input::HatLatch>()
        .configure_sets(
            Update,
            (LevelSystems::Collect, LevelSystems::Dispatch).chain(),
        )
        .add_systems(Startup, (load_controller_settings, initialise_level).chain())
        .add_systems(
            Update,
            (
                input::collect_update,
                input::collect_keyboard.run_if(resource_exists::<ButtonInput<KeyCode>>),
                input::collect_mouse_motion.run_if(resource_exists::<AccumulatedMouseMotion>),
                input::collect_mouse_buttons
                    .run_if(resource_exists::<ButtonInput<MouseButton>>),
                input::collect_gamepads.run_if(any_with_component::<Gamepad>),
                input::collect_gamepad_disconnects,
            )
                .in_set(LevelSystems::Collect),
        )
        .add_systems(Update, dispatch_level_events.in_set(LevelSystems::Dispatch))
        .add_systems(OnEnter(GameState::Paused), deactivate_level)
        .add_systems(OnExit(GameState::Paused), activate_level);
}

fn load_controller_settings(mut commands: Commands) {
    match ControllerMap::load_user_settings(Path::new(CONTROLLER_SETTINGS)) {
        Ok(Some(map)) => {
            info!("controller layout loaded from {CONTROLLER_SETTINGS}");
            commands.insert_resource(map);
        }
        Ok(None) => {}
        Err(e) => warn!("{e:#}; keeping default controller layout"),
    }
}

pub fn initialise_level(world: &mut World) {
    manager::with_manager(world, |manager, world| {
        manager.initialise_and_activate(Box::new(LevelOne::default()), world);
    });
}

pub fn activate_level(world: &mut World) {
    manager::with_manager(world, |manager, world| manager.activate(world));
}

pub fn deactivate_level(world: &mut World) {
    manager::with_manager(world, |manager, world| manager.deactivate(world));
}

/// Forward every queued event to the manager, in arrival order.
pub fn dispatch_level_events(world: &mut World) {
    let Some(mut queue) = world.get_resource_mut::<Messages<LevelEvent>>() else {
        return;
    };
    let events: Vec<LevelEvent> = queue.drain().collect();
    if events.is_empty() {
        return;
    }

    manager::with_manager(world, |manager, world| {
        for ev in &events {
            manager.handle_event(ev, world);
        }
    });
}
