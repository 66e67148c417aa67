//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::config::MachineConfig;
use crate::core::{Clock, Hooks, MonotonicClock, State, DEFAULT_HISTORY_CAPACITY};
use crate::engine::{StateMachine, Transition};
use crate::telemetry::{NullSink, TelemetrySink, TracingSink};
use std::collections::HashMap;

/// Builder for constructing state machines with a fluent API.
///
/// ```rust
/// use tickstate::builder::{StateMachineBuilder, TransitionBuilder};
/// use tickstate::core::Hooks;
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Climber { Stowed, Extending }
/// }
///
/// let machine = StateMachineBuilder::new("Climber")
///     .initial(Climber::Stowed)
///     .hooks(Climber::Extending, Hooks::new().on_enter(|| {}))
///     .transition(
///         TransitionBuilder::new()
///             .from(Climber::Stowed)
///             .to(Climber::Extending)
///             .always(),
///     )?
///     .build()?;
///
/// assert_eq!(machine.state(), Climber::Stowed);
/// # Ok::<(), tickstate::builder::BuildError>(())
/// ```
pub struct StateMachineBuilder<S: State> {
    label: String,
    initial: Option<S>,
    hooks: HashMap<S, Hooks>,
    transitions: Vec<Transition<S>>,
    clock: Option<Box<dyn Clock>>,
    sink: Option<Box<dyn TelemetrySink>>,
    history_capacity: usize,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder publishing telemetry under `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            initial: None,
            hooks: HashMap::new(),
            transitions: Vec::new(),
            clock: None,
            sink: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Create a builder from a loaded configuration.
    pub fn from_config(config: &MachineConfig) -> Self {
        Self::new(config.label.clone()).config(config)
    }

    /// Apply label, history and telemetry settings from `config`.
    ///
    /// Disabling telemetry replaces any sink set so far with [`NullSink`].
    pub fn config(mut self, config: &MachineConfig) -> Self {
        self.label = config.label.clone();
        self.history_capacity = config.history_capacity;
        if !config.telemetry {
            self.sink = Some(Box::new(NullSink));
        }
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Attach lifecycle hooks to `state`, replacing any set before.
    pub fn hooks(mut self, state: S, hooks: Hooks) -> Self {
        self.hooks.insert(state, hooks);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn sink(mut self, sink: impl TelemetrySink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Number of state changes retained in the history. Zero disables it.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Build the state machine.
    ///
    /// The initial state is entered and the first telemetry snapshot is
    /// published before transitions are registered.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if self.label.is_empty() {
            return Err(BuildError::EmptyLabel);
        }

        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(MonotonicClock::new()));
        let sink = self.sink.unwrap_or_else(|| Box::new(TracingSink));

        let mut machine = StateMachine::from_parts(
            self.label,
            initial,
            self.hooks,
            clock,
            sink,
            self.history_capacity,
        );
        for transition in self.transitions {
            machine.add_transition(transition);
        }

        Ok(machine)
    }
}
