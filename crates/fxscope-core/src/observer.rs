//! Render observers: effect lists bound to an actor's draw call.

use std::fmt;

use crate::effects::Effects;
use crate::gl_state::GlState;

/// Opaque handle returned when effects are attached to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An effect list that fires right before its actor draws.
#[derive(Debug, Clone)]
pub struct RenderObserver {
    id: ObserverId,
    priority: i32,
    effects: Effects,
}

impl RenderObserver {
    /// Returns the observer id.
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Returns the priority. Higher fires first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the bound effects.
    pub fn effects(&self) -> &Effects {
        &self.effects
    }
}

/// The observers bound to one actor, kept in firing order.
#[derive(Debug, Clone, Default)]
pub struct ObserverList {
    observers: Vec<RenderObserver>,
}

impl ObserverList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an observer after every observer of greater or equal priority.
    pub(crate) fn add(&mut self, id: ObserverId, priority: i32, effects: Effects) {
        let index = self
            .observers
            .iter()
            .position(|o| o.priority < priority)
            .unwrap_or(self.observers.len());
        self.observers.insert(
            index,
            RenderObserver {
                id,
                priority,
                effects,
            },
        );
    }

    /// Removes an observer by id.
    pub(crate) fn remove(&mut self, id: ObserverId) -> Option<RenderObserver> {
        let index = self.observers.iter().position(|o| o.id == id)?;
        Some(self.observers.remove(index))
    }

    /// Removes every observer.
    pub(crate) fn clear(&mut self) {
        self.observers.clear();
    }

    /// Applies every observer's effects to the state, in firing order.
    pub fn fire(&self, state: &mut GlState) {
        for observer in &self.observers {
            observer.effects.apply(state);
        }
    }

    /// Returns true if an observer with this id is bound.
    pub fn contains(&self, id: ObserverId) -> bool {
        self.observers.iter().any(|o| o.id == id)
    }

    /// Returns the observer ids in firing order.
    pub fn ids(&self) -> Vec<ObserverId> {
        self.observers.iter().map(RenderObserver::id).collect()
    }

    /// Iterates over the observers in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderObserver> {
        self.observers.iter()
    }

    /// Returns the number of observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if no observer is bound.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
