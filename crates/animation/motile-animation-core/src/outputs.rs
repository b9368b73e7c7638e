//! Output contracts from the animation manager.
//!
//! Outputs carry the values that moved this tick and a short list of
//! semantic events. Damage goes straight to the renderer and is not repeated
//! here.

use serde::{Deserialize, Serialize};

use crate::ids::ValueId;
use crate::value::AnimValue;

/// One value that moved this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    pub id: ValueId,
    pub value: AnimValue,
}

/// Discrete signals emitted during a tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum CoreEvent {
    /// The value reached its goal this tick.
    Finished { id: ValueId },
    /// The owner handle no longer resolves; the value was unregistered.
    OwnerGone { id: ValueId },
}

/// Outputs returned by `AnimationManager::tick()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Whether `id` reached its goal this tick.
    pub fn finished(&self, id: ValueId) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, CoreEvent::Finished { id: f } if *f == id))
    }
}
