//! The state machine engine.
//!
//! # Key Concepts
//!
//! - **Transitions**: guarded, prioritized rules between two states
//! - **State Machine**: owns the current state and applies at most one
//!   transition per tick
//! - **Command**: adapter that lets a cooperative scheduler drive a machine
//!
//! The engine is single-threaded. `update()` is meant to be called once per
//! scheduler tick and never re-entrantly.

mod command;
mod machine;
mod transition;

pub use command::{Command, StateMachineCommand};
pub use machine::{StateMachine, Step};
pub use transition::Transition;
