//! Graphviz export of a transition graph.

use crate::core::State;
use crate::engine::Transition;
use std::fmt::Write;

/// Render `transitions` as a Graphviz `digraph`.
///
/// A point-shaped `__start` node points at `initial`; every transition
/// becomes one edge labelled with its priority, in iteration order. The
/// output depends only on the inputs.
///
/// ```rust
/// use tickstate::diagram::generate_dot;
/// use tickstate::engine::Transition;
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Gate { A, B }
/// }
///
/// let dot = generate_dot("Gate", Gate::A, &[Transition::new(Gate::A, Gate::B, || true, 2)]);
/// assert!(dot.contains("  __start -> A;\n"));
/// assert!(dot.contains("  A -> B [label=\"p=2\"];\n"));
/// ```
pub fn generate_dot<'a, S, I>(name: &str, initial: S, transitions: I) -> String
where
    S: State,
    I: IntoIterator<Item = &'a Transition<S>>,
{
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "digraph {name} {{");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=circle];\n\n");

    out.push_str("  __start [shape=point];\n");
    let _ = writeln!(out, "  __start -> {};\n", initial.name());

    for t in transitions {
        let _ = writeln!(
            out,
            "  {} -> {} [label=\"p={}\"];",
            t.from().name(),
            t.to().name(),
            t.priority()
        );
    }

    out.push_str("}\n");
    out
}
