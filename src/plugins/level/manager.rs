//! Level manager: forwards lifecycle calls and events to the attached rules.
//!
//! With nothing attached every call is a no-op.

use bevy::prelude::*;

use super::events::LevelEvent;

/// Game rules for one level. Each hook gets full world access.
pub trait LevelRules: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn initialise(&mut self, world: &mut World);
    fn activate(&mut self, world: &mut World);
    fn deactivate(&mut self, world: &mut World);
    fn handle_event(&mut self, event: &LevelEvent, world: &mut World);
}

#[derive(Resource, Default)]
pub struct LevelManager {
    rules: Option<Box<dyn LevelRules>>,
}

impl LevelManager {
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.rules.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.rules.as_deref().map(|r| r.name())
    }

    /// Attach and initialise `rules`. A previously attached module is
    /// deactivated first.
    pub fn initialise(&mut self, mut rules: Box<dyn LevelRules>, world: &mut World) {
        if let Some(mut prev) = self.rules.take() {
            prev.deactivate(world);
            debug!("level '{}' replaced", prev.name());
        }
        rules.initialise(world);
        info!("level '{}' initialised", rules.name());
        self.rules = Some(rules);
    }

    pub fn initialise_and_activate(&mut self, rules: Box<dyn LevelRules>, world: &mut World) {
        self.initialise(rules, world);
        self.activate(world);
    }

    pub fn activate(&mut self, world: &mut World) {
        if let Some(rules) = self.rules.as_mut() {
            rules.activate(world);
        }
    }

    pub fn deactivate(&mut self, world: &mut World) {
        if let Some(rules) = self.rules.as_mut() {
            rules.deactivate(world);
        }
    }

    pub fn handle_event(&mut self, event: &LevelEvent, world: &mut World) {
        if let Some(rules) = self.rules.as_mut() {
            rules.handle_event(event, world);
        }
    }

    /// Drop the attached rules without calling any hook.
    pub fn detach(&mut self) -> Option<Box<dyn LevelRules>> {
        self.rules.take()
    }
}

/// Run `f` with the manager taken out of the world, so the rules can borrow
/// the world mutably. Does nothing when the resource is missing.
pub fn with_manager(world: &mut World, f: impl FnOnce(&mut LevelManager, &mut World)) {
    let Some(mut manager) = world.remove_resource::<LevelManager>() else {
        debug!("LevelManager resource missing");
        return;
    };
    f(&mut manager, world);
    world.insert_resource(manager);
}
