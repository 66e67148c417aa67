//! Prioritized, guarded transitions between states.

use crate::core::{Guard, State};

/// An immutable rule that moves the machine from `from` to `to` when its
/// guard passes.
///
/// Higher `priority` values are evaluated first. Transitions sharing a
/// priority keep their registration order.
#[derive(Debug)]
pub struct Transition<S: State> {
    from: S,
    to: S,
    guard: Guard,
    priority: i32,
}

impl<S: State> Transition<S> {
    pub fn new<F>(from: S, to: S, guard: F, priority: i32) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::with_guard(from, to, Guard::new(guard), priority)
    }

    pub fn with_guard(from: S, to: S, guard: Guard, priority: i32) -> Self {
        Self {
            from,
            to,
            guard,
            priority,
        }
    }

    /// True when the machine is in `from` and the guard passes.
    ///
    /// The guard is only evaluated when `current` matches `from`.
    pub fn is_triggered(&self, current: S) -> bool {
        current == self.from && self.guard.check()
    }

    pub fn from(&self) -> S {
        self.from
    }

    pub fn to(&self) -> S {
        self.to
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
