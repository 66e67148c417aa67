//! Guard predicates for controlling state transitions.
//!
//! Guards close over whatever sensor or input state they need and are
//! re-evaluated on every check. The engine never caches a result.

use std::fmt;

/// Zero-argument predicate that gates a transition.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::core::Guard;
///
/// let beam_broken = Rc::new(Cell::new(false));
/// let sensor = Rc::clone(&beam_broken);
/// let has_piece = Guard::new(move || sensor.get());
///
/// assert!(!has_piece.check());
/// beam_broken.set(true);
/// assert!(has_piece.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool>,
}

impl Guard {
    /// Create a guard from a predicate.
    ///
    /// The predicate should be cheap and free of side effects: it may be
    /// called once per tick for as long as its source state is active.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Guard::new(|| true)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
