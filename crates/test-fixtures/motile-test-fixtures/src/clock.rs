use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use motile_animation_core::Clock;

/// Clock that only moves when told to. Clones share the same time, so a test
/// keeps one copy and hands another to the manager.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Boxed copy for `AnimationManager::new`.
    pub fn boxed(&self) -> Box<dyn Clock> {
        Box::new(self.clone())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
