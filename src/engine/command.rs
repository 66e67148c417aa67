//! Binding a state machine into a cooperative command scheduler.

use crate::core::State;
use crate::engine::machine::StateMachine;

/// A unit of work run by a cooperative, tick-based scheduler.
///
/// The scheduler calls `initialize` once when the command is scheduled,
/// `execute` on every tick, and checks `is_finished` after each tick. When
/// the command finishes or is cancelled, `end` runs once.
pub trait Command {
    fn initialize(&mut self) {}

    fn execute(&mut self);

    fn is_finished(&self) -> bool {
        false
    }

    fn end(&mut self, _interrupted: bool) {}
}

/// Runs a [`StateMachine`] once per scheduler tick, forever.
///
/// The command never reports completion; the host scheduler is responsible
/// for cancelling it.
///
/// ```rust
/// use tickstate::engine::{Command, StateMachine, StateMachineCommand, Transition};
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Hood { Down, Up }
/// }
///
/// let mut machine = StateMachine::new(Hood::Down, "Hood");
/// machine.add_transition(Transition::new(Hood::Down, Hood::Up, || true, 0));
///
/// let mut command = StateMachineCommand::new(machine);
/// command.execute();
/// assert_eq!(command.machine().state(), Hood::Up);
/// assert!(!command.is_finished());
/// ```
#[derive(Debug)]
pub struct StateMachineCommand<S: State> {
    machine: StateMachine<S>,
}

impl<S: State> StateMachineCommand<S> {
    pub fn new(machine: StateMachine<S>) -> Self {
        Self { machine }
    }

    pub fn machine(&self) -> &StateMachine<S> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut StateMachine<S> {
        &mut self.machine
    }

    pub fn into_inner(self) -> StateMachine<S> {
        self.machine
    }
}

impl<S: State> Command for StateMachineCommand<S> {
    fn execute(&mut self) {
        self.machine.update();
    }
}

impl<S: State> From<StateMachine<S>> for StateMachineCommand<S> {
    fn from(machine: StateMachine<S>) -> Self {
        Self::new(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, DEFAULT_TICK_PERIOD};
    use crate::engine::Transition;
    use crate::state_enum;
    use crate::telemetry::{MemorySink, TelemetryValue};
    use std::cell::Cell;
    use std::rc::Rc;

    state_enum! {
        enum Shooter {
            Idle,
            SpinningUp,
            Firing,
        }
    }

    #[test]
    fn execute_updates_the_machine_each_tick() {
        let sink = MemorySink::new();
        let machine = StateMachine::builder("Shooter")
            .initial(Shooter::Idle)
            .sink(sink.clone())
            .build()
            .unwrap();
        let mut command = StateMachineCommand::new(machine);
        sink.clear();

        for _ in 0..5 {
            command.execute();
        }

        assert_eq!(sink.len(), 10);
    }

    #[test]
    fn command_never_finishes() {
        let mut command = StateMachineCommand::from(StateMachine::new(Shooter::Idle, "Shooter"));
        command.initialize();
        for _ in 0..100 {
            command.execute();
            assert!(!command.is_finished());
        }
        command.end(true);
        assert_eq!(command.machine().state(), Shooter::Idle);
    }

    #[test]
    fn guards_see_external_state_between_ticks() {
        let clock = ManualClock::new();
        let at_speed = Rc::new(Cell::new(false));
        let trigger = Rc::new(Cell::new(true));

        let mut machine = StateMachine::builder("Shooter")
            .initial(Shooter::Idle)
            .clock(clock.clone())
            .build()
            .unwrap();
        let t = Rc::clone(&trigger);
        machine.add_transition(Transition::new(
            Shooter::Idle,
            Shooter::SpinningUp,
            move || t.get(),
            0,
        ));
        let s = Rc::clone(&at_speed);
        machine.add_transition(Transition::new(
            Shooter::SpinningUp,
            Shooter::Firing,
            move || s.get(),
            0,
        ));

        let mut command = StateMachineCommand::new(machine);
        command.execute();
        assert_eq!(command.machine().state(), Shooter::SpinningUp);

        for _ in 0..3 {
            clock.advance(DEFAULT_TICK_PERIOD);
            command.execute();
        }
        assert_eq!(command.machine().state(), Shooter::SpinningUp);
        assert_eq!(command.machine().time_in_state(), DEFAULT_TICK_PERIOD * 3);

        at_speed.set(true);
        command.execute();
        assert_eq!(command.into_inner().state(), Shooter::Firing);
    }

    #[test]
    fn machine_mut_allows_late_registration() {
        let sink = MemorySink::new();
        let machine = StateMachine::builder("Shooter")
            .initial(Shooter::Idle)
            .sink(sink.clone())
            .build()
            .unwrap();
        let mut command = StateMachineCommand::new(machine);
        command.execute();

        command
            .machine_mut()
            .add_transition(Transition::new(Shooter::Idle, Shooter::Firing, || true, 0));
        command.execute();

        assert_eq!(
            sink.latest("Shooter/State"),
            Some(TelemetryValue::from("Firing"))
        );
    }
}
