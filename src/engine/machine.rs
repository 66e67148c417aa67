//! The tick-driven state machine.

use crate::builder::StateMachineBuilder;
use crate::core::{
    Clock, Hooks, MonotonicClock, State, StateChange, StateHistory, StateTimer,
    DEFAULT_HISTORY_CAPACITY,
};
use crate::diagram;
use crate::engine::transition::Transition;
use crate::telemetry::{TelemetryKeys, TelemetrySink, TelemetryValue, TracingSink};
use chrono::Utc;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Outcome of a single [`StateMachine::update`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<S: State> {
    /// A transition fired and the current state changed.
    Changed { from: S, to: S },

    /// A self-loop was the first triggered transition. No hooks ran and
    /// the time-in-state timer kept running.
    Held,

    /// No transition was triggered.
    Idle,
}

impl<S: State> Step<S> {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Prioritized finite-state machine driven by a periodic scheduler.
///
/// Constructing the machine enters the initial state: its `on_enter` hook
/// runs and a first telemetry snapshot is published before `new` returns.
///
/// # Example
///
/// ```rust
/// use tickstate::engine::{StateMachine, Transition};
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Light { Red, Green }
/// }
///
/// let mut machine = StateMachine::new(Light::Red, "Light");
/// machine.add_transition(Transition::new(Light::Red, Light::Green, || true, 1));
///
/// machine.update();
/// assert_eq!(machine.state(), Light::Green);
/// ```
pub struct StateMachine<S: State> {
    label: String,
    keys: TelemetryKeys,
    initial: S,
    current: S,
    transitions: Vec<Transition<S>>,
    hooks: HashMap<S, Hooks>,
    timer: StateTimer,
    sink: Box<dyn TelemetrySink>,
    history: StateHistory<S>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine using the monotonic clock and the tracing sink.
    pub fn new(initial: S, label: impl Into<String>) -> Self {
        Self::from_parts(
            label.into(),
            initial,
            HashMap::new(),
            Box::new(MonotonicClock::new()),
            Box::new(TracingSink),
            DEFAULT_HISTORY_CAPACITY,
        )
    }

    /// Start configuring a machine with hooks, a custom clock or sink.
    pub fn builder(label: impl Into<String>) -> StateMachineBuilder<S> {
        StateMachineBuilder::new(label)
    }

    pub(crate) fn from_parts(
        label: String,
        initial: S,
        hooks: HashMap<S, Hooks>,
        clock: Box<dyn Clock>,
        sink: Box<dyn TelemetrySink>,
        history_capacity: usize,
    ) -> Self {
        let mut machine = Self {
            keys: TelemetryKeys::new(&label),
            label,
            initial,
            current: initial,
            transitions: Vec::new(),
            hooks,
            timer: StateTimer::start(clock),
            sink,
            history: StateHistory::with_capacity(history_capacity),
        };

        tracing::debug!(machine = %machine.label, state = initial.name(), "state machine started");
        machine.run_enter(initial);
        machine.publish();
        machine
    }

    /// Register a transition.
    ///
    /// The list is kept ordered by descending priority. The sort is stable,
    /// so equal priorities are evaluated in registration order.
    pub fn add_transition(&mut self, transition: Transition<S>) {
        self.transitions.push(transition);
        self.transitions.sort_by_key(|t| Reverse(t.priority()));
    }

    /// Replace the hooks for `state`.
    ///
    /// Does not run `on_enter`, even when `state` is current.
    pub fn set_hooks(&mut self, state: S, hooks: Hooks) {
        self.hooks.insert(state, hooks);
    }

    /// Advance the machine by one tick.
    ///
    /// Runs the current state's `on_update`, then applies the first
    /// triggered transition in priority order, if any. At most one state
    /// change happens per call. A telemetry snapshot is always published.
    pub fn update(&mut self) -> Step<S> {
        let current = self.current;
        if let Some(hooks) = self.hooks.get_mut(&current) {
            hooks.update();
        }

        let selected = self
            .transitions
            .iter()
            .find(|t| t.is_triggered(current))
            .map(Transition::to);

        let step = match selected {
            None => Step::Idle,
            Some(to) if to == current => Step::Held,
            Some(to) => {
                self.change_state(to);
                Step::Changed { from: current, to }
            }
        };

        self.publish();
        step
    }

    fn change_state(&mut self, to: S) {
        let from = self.current;
        let time_in_previous = self.timer.elapsed();

        if let Some(hooks) = self.hooks.get_mut(&from) {
            hooks.exit();
        }
        self.current = to;
        self.timer.reset();
        self.run_enter(to);

        tracing::debug!(
            machine = %self.label,
            from = from.name(),
            to = to.name(),
            after_secs = time_in_previous.as_secs_f64(),
            "state transition"
        );
        self.history.record(StateChange {
            from,
            to,
            timestamp: Utc::now(),
            time_in_previous,
        });
    }

    fn run_enter(&mut self, state: S) {
        if let Some(hooks) = self.hooks.get_mut(&state) {
            hooks.enter();
        }
    }

    fn publish(&mut self) {
        let name = self.current.name();
        let seconds = self.timer.elapsed().as_secs_f64();
        self.sink.record(&self.keys.state, TelemetryValue::from(name));
        self.sink.record(&self.keys.time_in_state, TelemetryValue::from(seconds));
    }

    pub fn state(&self) -> S {
        self.current
    }

    /// Time since the last real state change, or since construction.
    pub fn time_in_state(&self) -> Duration {
        self.timer.elapsed()
    }

    pub fn initial_state(&self) -> S {
        self.initial
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Registered transitions in evaluation order.
    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Render the registered transitions as a Graphviz digraph.
    pub fn to_dot(&self, name: &str) -> String {
        diagram::generate_dot(name, self.initial, &self.transitions)
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("label", &self.label)
            .field("current", &self.current)
            .field("time_in_state", &self.timer.elapsed())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, DEFAULT_TICK_PERIOD};
    use crate::state_enum;
    use crate::telemetry::MemorySink;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    state_enum! {
        enum TestState {
            A,
            B,
            C,
        }
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn logging_hooks(log: &Log, state: &'static str) -> Hooks {
        let (enter, update, exit) = (Rc::clone(log), Rc::clone(log), Rc::clone(log));
        Hooks::new()
            .on_enter(move || enter.borrow_mut().push(format!("{state}.enter")))
            .on_update(move || update.borrow_mut().push(format!("{state}.update")))
            .on_exit(move || exit.borrow_mut().push(format!("{state}.exit")))
    }

    struct Fixture {
        machine: StateMachine<TestState>,
        clock: ManualClock,
        sink: MemorySink,
        log: Log,
    }

    fn fixture() -> Fixture {
        let clock = ManualClock::new();
        let sink = MemorySink::new();
        let log: Log = Rc::default();
        let machine = StateMachine::builder("Test/SM")
            .initial(TestState::A)
            .hooks(TestState::A, logging_hooks(&log, "A"))
            .hooks(TestState::B, logging_hooks(&log, "B"))
            .clock(clock.clone())
            .sink(sink.clone())
            .build()
            .unwrap();
        Fixture {
            machine,
            clock,
            sink,
            log,
        }
    }

    #[test]
    fn construction_enters_initial_state_and_publishes() {
        let f = fixture();

        assert_eq!(f.machine.state(), TestState::A);
        assert_eq!(f.machine.time_in_state(), Duration::ZERO);
        assert_eq!(*f.log.borrow(), vec!["A.enter"]);
        assert_eq!(
            f.sink.records(),
            vec![
                ("Test/SM/State".to_string(), TelemetryValue::from("A")),
                ("Test/SM/TimeInState".to_string(), TelemetryValue::from(0.0)),
            ]
        );
    }

    #[test]
    fn transition_runs_exit_then_enter() {
        let mut f = fixture();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 1));
        f.log.borrow_mut().clear();

        let step = f.machine.update();

        assert_eq!(
            step,
            Step::Changed {
                from: TestState::A,
                to: TestState::B
            }
        );
        assert_eq!(f.machine.state(), TestState::B);
        assert_eq!(*f.log.borrow(), vec!["A.update", "A.exit", "B.enter"]);
    }

    #[test]
    fn higher_priority_wins() {
        let mut f = fixture();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 1));
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::C, || true, 5));

        f.machine.update();

        assert_eq!(f.machine.state(), TestState::C);
    }

    #[test]
    fn equal_priorities_fire_in_registration_order() {
        let mut f = fixture();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::C, || true, 2));
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 2));

        f.machine.update();

        assert_eq!(f.machine.state(), TestState::C);
    }

    #[test]
    fn transitions_are_kept_sorted_after_each_registration() {
        let mut f = fixture();
        for (to, priority) in [
            (TestState::B, 1),
            (TestState::C, 3),
            (TestState::A, 2),
            (TestState::B, 3),
        ] {
            f.machine
                .add_transition(Transition::new(TestState::A, to, || false, priority));
        }

        let order: Vec<_> = f
            .machine
            .transitions()
            .iter()
            .map(|t| (t.to(), t.priority()))
            .collect();
        assert_eq!(
            order,
            vec![
                (TestState::C, 3),
                (TestState::B, 3),
                (TestState::A, 2),
                (TestState::B, 1),
            ]
        );
    }

    #[test]
    fn self_loop_suppresses_hooks_and_keeps_timer() {
        let mut f = fixture();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 1));
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::A, || true, 100));
        f.clock.advance(Duration::from_millis(500));
        f.log.borrow_mut().clear();

        let step = f.machine.update();

        assert_eq!(step, Step::Held);
        assert_eq!(f.machine.state(), TestState::A);
        assert_eq!(f.machine.time_in_state(), Duration::from_millis(500));
        assert_eq!(*f.log.borrow(), vec!["A.update"]);
        assert!(f.machine.history().is_empty());
    }

    #[test]
    fn first_match_stops_the_scan() {
        let mut f = fixture();
        let low_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&low_calls);
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 10));
        f.machine.add_transition(Transition::new(
            TestState::A,
            TestState::C,
            move || {
                counter.set(counter.get() + 1);
                true
            },
            1,
        ));

        f.machine.update();

        assert_eq!(low_calls.get(), 0);
    }

    #[test]
    fn at_most_one_change_per_update() {
        let mut f = fixture();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 1));
        f.machine
            .add_transition(Transition::new(TestState::B, TestState::C, || true, 1));

        f.machine.update();
        assert_eq!(f.machine.state(), TestState::B);
        f.machine.update();
        assert_eq!(f.machine.state(), TestState::C);
    }

    #[test]
    fn no_transitions_means_idle_and_growing_timer() {
        let mut f = fixture();

        for tick in 1..=3u32 {
            f.clock.advance(DEFAULT_TICK_PERIOD);
            assert_eq!(f.machine.update(), Step::Idle);
            assert_eq!(f.machine.state(), TestState::A);
            assert_eq!(f.machine.time_in_state(), DEFAULT_TICK_PERIOD * tick);
        }
    }

    #[test]
    fn timer_resets_on_change() {
        let mut f = fixture();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 1));
        f.clock.advance(Duration::from_secs(2));

        f.machine.update();

        assert_eq!(f.machine.time_in_state(), Duration::ZERO);
        let change = f.machine.history().last().unwrap();
        assert_eq!(change.time_in_previous, Duration::from_secs(2));
    }

    #[test]
    fn every_update_publishes_one_snapshot() {
        let mut f = fixture();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 1));
        f.sink.clear();
        f.clock.advance(Duration::from_millis(250));

        f.machine.update();
        f.clock.advance(Duration::from_millis(250));
        f.machine.update();

        let records = f.sink.records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].1, TelemetryValue::from("B"));
        assert_eq!(records[1].1, TelemetryValue::from(0.0));
        assert_eq!(records[3].1, TelemetryValue::from(0.25));
    }

    #[test]
    fn transitions_can_be_added_after_updates_began() {
        let mut f = fixture();
        f.machine.update();
        f.machine.update();
        f.machine
            .add_transition(Transition::new(TestState::A, TestState::B, || true, 0));

        f.machine.update();

        assert_eq!(f.machine.state(), TestState::B);
    }

    #[test]
    fn set_hooks_does_not_reenter_current_state() {
        let mut f = fixture();
        let entered = Rc::new(Cell::new(false));
        let flag = Rc::clone(&entered);
        f.machine
            .set_hooks(TestState::A, Hooks::new().on_enter(move || flag.set(true)));

        f.machine.update();

        assert!(!entered.get());
    }

    #[test]
    #[should_panic(expected = "sensor fault")]
    fn guard_panics_propagate_to_caller() {
        let mut f = fixture();
        f.machine.add_transition(Transition::new(
            TestState::A,
            TestState::B,
            || panic!("sensor fault"),
            1,
        ));

        f.machine.update();
    }

    #[test]
    fn new_uses_default_clock_and_sink() {
        let machine = StateMachine::new(TestState::C, "Plain");
        assert_eq!(machine.state(), TestState::C);
        assert_eq!(machine.initial_state(), TestState::C);
        assert_eq!(machine.label(), "Plain");
        assert!(machine.transitions().is_empty());
    }
}
