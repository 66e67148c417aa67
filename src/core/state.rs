//! State identity and lifecycle hooks.
//!
//! A state is a plain identifier drawn from a closed enumeration. The
//! behaviour attached to a state lives in a separate [`Hooks`] record that
//! the machine owns, so state values stay `Copy` and comparable.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for state machine states.
///
/// Implementors are usually fieldless enums; see [`state_enum!`](crate::state_enum)
/// for a macro that derives everything needed.
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Intake {
///     Idle,
///     Collecting,
/// }
///
/// impl State for Intake {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Collecting => "Collecting",
///         }
///     }
/// }
///
/// assert_eq!(Intake::Collecting.name(), "Collecting");
/// ```
pub trait State: Copy + Eq + Hash + Debug + 'static {
    /// Stable identifier used for telemetry values and diagram nodes.
    fn name(&self) -> &'static str;
}

type Callback = Box<dyn FnMut()>;

/// Lifecycle callbacks for a single state.
///
/// Every callback is optional; a missing one is a no-op. Callbacks must not
/// block, since they run inside a scheduler tick.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::core::Hooks;
///
/// let entered = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&entered);
/// let mut hooks = Hooks::new().on_enter(move || counter.set(counter.get() + 1));
///
/// hooks.enter();
/// hooks.exit();
/// assert_eq!(entered.get(), 1);
/// ```
#[derive(Default)]
pub struct Hooks {
    on_enter: Option<Callback>,
    on_update: Option<Callback>,
    on_exit: Option<Callback>,
}

impl Hooks {
    /// Create a record with all three hooks unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once when the state becomes active.
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_enter = Some(Box::new(f));
        self
    }

    /// Called on every tick while the state is active.
    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Called once when the state is left.
    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_exit = Some(Box::new(f));
        self
    }

    pub fn enter(&mut self) {
        if let Some(f) = self.on_enter.as_mut() {
            f();
        }
    }

    pub fn update(&mut self) {
        if let Some(f) = self.on_update.as_mut() {
            f();
        }
    }

    pub fn exit(&mut self) {
        if let Some(f) = self.on_exit.as_mut() {
            f();
        }
    }
}

impl Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}
