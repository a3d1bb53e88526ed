//! The scene: an ordered registry of marker actors and their effect bindings.

use glam::Vec3;

use crate::actor::MarkerActor;
use crate::effects::Effects;
use crate::error::{FxscopeError, Result};
use crate::observer::ObserverId;

/// Actors in draw order, plus the observer id allocator.
///
/// Actors are drawn in insertion order, which matters once effects turn the
/// depth test or blending off.
#[derive(Debug, Default)]
pub struct Scene {
    actors: Vec<MarkerActor>,
    next_observer: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor at the end of the draw order.
    ///
    /// Returns an error if an actor with the same name already exists.
    pub fn add_actor(&mut self, actor: MarkerActor) -> Result<()> {
        if self.contains(actor.name()) {
            return Err(FxscopeError::ActorExists(actor.name().to_string()));
        }
        log::debug!(
            "adding actor '{}' ({} markers)",
            actor.name(),
            actor.num_markers()
        );
        self.actors.push(actor);
        Ok(())
    }

    /// Removes an actor by name.
    pub fn remove_actor(&mut self, name: &str) -> Option<MarkerActor> {
        let index = self.actors.iter().position(|a| a.name() == name)?;
        Some(self.actors.remove(index))
    }

    /// Gets an actor by name.
    pub fn actor(&self, name: &str) -> Option<&MarkerActor> {
        self.actors.iter().find(|a| a.name() == name)
    }

    /// Gets a mutable actor by name.
    pub fn actor_mut(&mut self, name: &str) -> Option<&mut MarkerActor> {
        self.actors.iter_mut().find(|a| a.name() == name)
    }

    /// Checks if an actor with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.actors.iter().any(|a| a.name() == name)
    }

    /// Returns the actors in draw order.
    pub fn actors(&self) -> &[MarkerActor] {
        &self.actors
    }

    /// Returns the number of actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns true if the scene has no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Removes all actors.
    pub fn clear(&mut self) {
        self.actors.clear();
    }

    /// Binds effects to an actor's draw call with priority 0.
    pub fn attach_effects(&mut self, actor: &str, effects: impl Into<Effects>) -> Result<ObserverId> {
        self.attach_effects_with_priority(actor, effects, 0)
    }

    /// Binds effects to an actor's draw call.
    ///
    /// Observers with a higher priority fire first; equal priorities fire in
    /// attachment order. Attaching never replaces an existing binding.
    pub fn attach_effects_with_priority(
        &mut self,
        actor: &str,
        effects: impl Into<Effects>,
        priority: i32,
    ) -> Result<ObserverId> {
        let effects = effects.into();
        let id = ObserverId::new(self.next_observer);
        let target = self
            .actor_mut(actor)
            .ok_or_else(|| FxscopeError::ActorNotFound(actor.to_string()))?;

        log::debug!(
            "attaching observer {id} to '{actor}' (priority {priority}): {:?}",
            effects.names()
        );
        target.observers_mut().add(id, priority, effects);
        self.next_observer += 1;
        Ok(id)
    }

    /// Removes exactly the binding identified by `id` from an actor.
    pub fn detach_effects(&mut self, actor: &str, id: ObserverId) -> Result<()> {
        let target = self
            .actor_mut(actor)
            .ok_or_else(|| FxscopeError::ActorNotFound(actor.to_string()))?;
        if target.observers_mut().remove(id).is_none() {
            return Err(FxscopeError::ObserverNotFound {
                actor: actor.to_string(),
                id: id.raw(),
            });
        }
        log::debug!("detached observer {id} from '{actor}'");
        Ok(())
    }

    /// Removes every binding from an actor.
    pub fn clear_effects(&mut self, actor: &str) -> Result<()> {
        let target = self
            .actor_mut(actor)
            .ok_or_else(|| FxscopeError::ActorNotFound(actor.to_string()))?;
        target.observers_mut().clear();
        Ok(())
    }

    /// Axis-aligned bounding box of all actors, or `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        self.actors
            .iter()
            .filter_map(MarkerActor::bounding_box)
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }
}
