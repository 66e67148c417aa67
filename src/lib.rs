//! Tickstate: a prioritized finite-state machine for tick-driven robots
//!
//! A host scheduler calls [`StateMachine::update`] once per tick. Each tick
//! runs the current state's update hook, evaluates the registered
//! transitions in priority order and applies at most one of them.
//!
//! # Core Concepts
//!
//! - **State**: a fieldless enum implementing the `State` trait, with
//!   optional enter/update/exit `Hooks`
//! - **Transition**: an immutable `(from, to, guard, priority)` rule
//! - **StateMachine**: owns the current state, the ordered transitions and
//!   the time-in-state timer, and publishes telemetry
//! - **StateMachineCommand**: runs a machine forever under a cooperative
//!   command scheduler
//! - **Diagram**: Graphviz export of the transition graph
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tickstate::{state_enum, StateMachine, Transition};
//!
//! state_enum! {
//!     enum Intake {
//!         Idle,
//!         Collecting,
//!         Holding,
//!     }
//! }
//!
//! let button = Rc::new(Cell::new(false));
//! let beam_break = Rc::new(Cell::new(false));
//!
//! let mut machine = StateMachine::new(Intake::Idle, "Intake");
//! let pressed = Rc::clone(&button);
//! machine.add_transition(Transition::new(
//!     Intake::Idle,
//!     Intake::Collecting,
//!     move || pressed.get(),
//!     1,
//! ));
//! let seen = Rc::clone(&beam_break);
//! machine.add_transition(Transition::new(
//!     Intake::Collecting,
//!     Intake::Holding,
//!     move || seen.get(),
//!     1,
//! ));
//!
//! machine.update();
//! assert_eq!(machine.state(), Intake::Idle);
//!
//! button.set(true);
//! machine.update();
//! assert_eq!(machine.state(), Intake::Collecting);
//!
//! beam_break.set(true);
//! machine.update();
//! assert_eq!(machine.state(), Intake::Holding);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod diagram;
pub mod engine;
pub mod telemetry;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use config::{ConfigError, MachineConfig};
pub use crate::core::{Guard, Hooks, State};
pub use diagram::generate_dot;
pub use engine::{Command, StateMachine, StateMachineCommand, Step, Transition};
