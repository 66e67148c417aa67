//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and a macro for creating state
//! machines with minimal boilerplate. Missing required pieces surface as
//! [`BuildError`]s at setup time, never during a tick.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::State;
use crate::engine::Transition;

/// Create an unconditional transition.
///
/// # Example
///
/// ```
/// use tickstate::builder::simple_transition;
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// let transition = simple_transition(MyState::Start, MyState::End, 0);
/// assert!(transition.is_triggered(MyState::Start));
/// ```
pub fn simple_transition<S: State>(from: S, to: S, priority: i32) -> Transition<S> {
    Transition::new(from, to, || true, priority)
}

/// Create a transition gated by `guard`.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::builder::guarded_transition;
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         Middle,
///     }
/// }
///
/// let ready = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&ready);
/// let transition = guarded_transition(MyState::Start, MyState::Middle, 1, move || flag.get());
///
/// assert!(!transition.is_triggered(MyState::Start));
/// ready.set(true);
/// assert!(transition.is_triggered(MyState::Start));
/// ```
pub fn guarded_transition<S, F>(from: S, to: S, priority: i32, guard: F) -> Transition<S>
where
    S: State,
    F: Fn() -> bool + 'static,
{
    Transition::new(from, to, guard, priority)
}
