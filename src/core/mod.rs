//! Core value types shared by the engine.
//!
//! This module contains the small building blocks the state machine is
//! assembled from:
//! - State identity via the `State` trait and per-state `Hooks`
//! - Guard predicates for transition control
//! - Clocks and the time-in-state timer
//! - A bounded history of state changes

mod guard;
mod history;
mod state;
mod timer;

pub use guard::Guard;
pub use history::{StateChange, StateHistory, DEFAULT_HISTORY_CAPACITY};
pub use state::{Hooks, State};
pub use timer::{Clock, ManualClock, MonotonicClock, StateTimer, DEFAULT_TICK_PERIOD};
