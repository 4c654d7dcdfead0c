//! Transition debounce guard.
//!
//! While a step animation runs, further step changes are ignored. The guard
//! is released by whichever comes first: the animation-completion event or
//! the clock passing `armed_at + budget`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_ANIMATION_BUDGET: Duration = Duration::from_millis(400);

/// Source of "now" for anything with a deadline.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
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
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone)]
pub struct TransitionGuard {
    budget: Duration,
    armed_at: Option<Instant>,
}

impl TransitionGuard {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            armed_at: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.armed_at = Some(now);
    }

    /// Animation-completion event.
    pub fn complete(&mut self) {
        self.armed_at = None;
    }

    pub fn release(&mut self) {
        self.armed_at = None;
    }

    /// True while armed and the budget has not yet elapsed.
    pub fn is_active(&self, now: Instant) -> bool {
        match self.armed_at {
            Some(armed_at) => now.saturating_duration_since(armed_at) < self.budget,
            None => false,
        }
    }
}

impl Default for TransitionGuard {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_BUDGET)
    }
}
