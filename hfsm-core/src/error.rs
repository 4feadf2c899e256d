//! Structural errors detected at assembly time (spec.md §7).

use thiserror::Error;

/// Failures in flattening a machine graph into one transition/state table.
/// All three variants are construction-time failures: a machine that fails
/// to assemble never produces a runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// A transition's destination named a `(machine, state)` pair that
    /// never appears anywhere else in the assembled graph.
    #[error("transition in {machine} targets unknown state {state:?}")]
    UnknownDestination { machine: &'static str, state: String },

    /// The `Enter` relation formed a cycle (`Enter M -> ... -> Enter M`).
    #[error("cyclic Enter relation involving {machine}")]
    CyclicEnter { machine: &'static str },

    /// A submachine was referenced but never supplied to the runtime.
    ///
    /// Structurally unreachable in this crate: submachines are discovered
    /// automatically by walking the `Enter` relation from the root type, so
    /// there is no separate "supply the submachine" step that could be
    /// skipped. Retained so this type still documents every structural
    /// failure spec.md §7 names.
    #[error("submachine {machine} referenced but not supplied")]
    MissingSubmachine { machine: &'static str },
}
