//! Bounded record of recent state changes.
//!
//! Only real changes are recorded. Self-loop matches and idle ticks leave
//! the history untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of changes retained by a machine.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Record of a single state change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateChange<S: State> {
    /// The state that was left
    pub from: S,
    /// The state that was entered
    pub to: S,
    /// Wall-clock time of the change
    pub timestamp: DateTime<Utc>,
    /// How long the machine had been in `from`
    pub time_in_previous: Duration,
}

/// Ring buffer of the most recent [`StateChange`]s, oldest first.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use std::time::Duration;
/// use tickstate::core::{StateChange, StateHistory};
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Arm { Stowed, Raised, Scoring }
/// }
///
/// let mut history = StateHistory::with_capacity(2);
/// for (from, to) in [(Arm::Stowed, Arm::Raised), (Arm::Raised, Arm::Scoring)] {
///     history.record(StateChange {
///         from,
///         to,
///         timestamp: Utc::now(),
///         time_in_previous: Duration::ZERO,
///     });
/// }
///
/// assert_eq!(history.path(), vec![Arm::Stowed, Arm::Raised, Arm::Scoring]);
/// ```
#[derive(Clone, Debug)]
pub struct StateHistory<S: State> {
    changes: VecDeque<StateChange<S>>,
    capacity: usize,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history retaining at most `capacity` changes.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            changes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a change, evicting the oldest one when full.
    pub fn record(&mut self, change: StateChange<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.changes.len() == self.capacity {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    pub fn changes(&self) -> impl ExactSizeIterator<Item = &StateChange<S>> + '_ {
        self.changes.iter()
    }

    pub fn last(&self) -> Option<&StateChange<S>> {
        self.changes.back()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// States traversed across the retained changes: the `from` of the
    /// oldest change, then the `to` of each change.
    pub fn path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.front() {
            path.push(first.from);
        }
        path.extend(self.changes.iter().map(|c| c.to));
        path
    }
}
