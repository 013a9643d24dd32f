#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Automaton-to-regular-expression synthesis.
//!
//! Treats a graph of entity types as a finite automaton and solves its
//! defining equations into closed-form regular expressions:
//! - `automaton` - states, labeled edges, incoming-edge index
//! - `equation` - right-linear defining equation per state
//! - `solve` - Arden's-lemma elimination
//!
//! Cyclic graphs are the normal case: self-referencing and mutually
//! referencing associations produce `Star` terms rather than being
//! truncated by a traversal bound.

use propath_core::TypeId;

pub mod automaton;
pub mod equation;
pub mod solve;

#[cfg(test)]
pub mod test_utils;

pub use automaton::{Edge, Graph, State};
pub use equation::{Equation, equations_for};
pub use solve::solve;

/// Graph configuration errors, surfaced before any elimination runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// `solve` was called with no finish state selected.
    #[error("no finish state selected before solving")]
    NoFinishState,

    /// The graph has no start state.
    #[error("no start state selected before solving")]
    NoStartState,

    /// An edge with an empty label was inserted.
    #[error("edge {from:?} -> {to:?} has an empty label")]
    EmptyLabel { from: TypeId, to: TypeId },
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;
