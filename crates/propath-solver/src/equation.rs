//! Defining equations for automaton states.
//!
//! The language of words reaching state `s` from the start satisfies
//!
//! ```text
//! Eq(s) = ⋃ Ref(p)·label  over incoming edges p --label--> s
//!         ∪ ε              if s is the start state
//! ```
//!
//! Equations are kept in right-linear form: one closed coefficient per
//! referenced state plus a state-free part. State references exist only as
//! keys of the coefficient map, so they can never leak into a closed
//! `Expr`.

use indexmap::IndexMap;
use propath_core::{Expr, TypeId};

use crate::automaton::Graph;

/// Right-hand side of one state's defining equation:
/// `⋃ Ref(p)·terms[p] ∪ free`.
#[derive(Debug, Clone)]
pub struct Equation {
    /// Coefficient per referenced predecessor state, in first-reference
    /// order.
    terms: IndexMap<TypeId, Expr>,
    /// State-free part of the union.
    free: Expr,
}

impl Default for Equation {
    fn default() -> Self {
        Self {
            terms: IndexMap::new(),
            free: Expr::Empty,
        }
    }
}

impl Equation {
    /// The equation of an unreachable non-start state: `∅`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a `Ref(state)·coefficient` term, merging by union if the state
    /// is already referenced.
    pub fn add_term(&mut self, state: TypeId, coefficient: Expr) {
        match self.terms.get_mut(&state) {
            Some(existing) => {
                let merged = std::mem::replace(existing, Expr::Empty).or(coefficient);
                *existing = merged;
            }
            None => {
                self.terms.insert(state, coefficient);
            }
        }
    }

    /// Union an expression into the state-free part.
    pub fn add_free(&mut self, expr: Expr) {
        self.free = std::mem::replace(&mut self.free, Expr::Empty).or(expr);
    }

    /// Referenced states with their coefficients.
    pub fn terms(&self) -> impl Iterator<Item = (TypeId, &Expr)> {
        self.terms.iter().map(|(&state, coef)| (state, coef))
    }

    /// The state-free part.
    pub fn free(&self) -> &Expr {
        &self.free
    }

    /// Whether no state references remain.
    pub fn is_closed(&self) -> bool {
        self.terms.is_empty()
    }

    /// Arden step: `R = R·A ∪ B  ⇒  R = B·A*`.
    ///
    /// Removes the self-referential term of `own` (if any) and multiplies
    /// every remaining coefficient and the free part by `A*` on the right.
    /// Without a self-loop this is a no-op (`A = ∅`, `A* = ε`).
    pub fn arden(&mut self, own: TypeId) {
        let Some(self_coefficient) = self.terms.shift_remove(&own) else {
            return;
        };
        let closure = Expr::star(self_coefficient);
        for coefficient in self.terms.values_mut() {
            *coefficient =
                std::mem::replace(coefficient, Expr::Empty).then(closure.clone());
        }
        self.free = std::mem::replace(&mut self.free, Expr::Empty).then(closure);
    }

    /// Substitute an eliminated state's closed equation into this one.
    ///
    /// `eliminated` must already be Arden-closed (no self-reference), so
    /// `Ref(state)·c` expands to `⋃ Ref(p)·(coef_p·c) ∪ free·c` with
    /// distribution handled term by term. Normalization happens inside the
    /// `Expr` constructors on every merge.
    pub fn substitute(&mut self, state: TypeId, eliminated: &Equation) {
        let Some(coefficient) = self.terms.shift_remove(&state) else {
            return;
        };
        for (p, coef) in eliminated.terms() {
            self.add_term(p, coef.clone().then(coefficient.clone()));
        }
        self.add_free(eliminated.free.clone().then(coefficient));
    }

    /// Unwrap the closed expression.
    ///
    /// # Panics
    /// Panics if state references remain: elimination failed to terminate
    /// cleanly, which signals a defect in the substitution logic. Returning
    /// a partial expression here would corrupt every consumer downstream.
    pub fn into_expr(self) -> Expr {
        assert!(
            self.terms.is_empty(),
            "residual state references after elimination: {:?}",
            self.terms.keys().collect::<Vec<_>>()
        );
        self.free
    }
}

/// Build the defining equation of every state, in state insertion order.
///
/// Self-loop terms stay as `Ref(s)·label` here; removing the
/// self-reference is the solver's Arden step, not the builder's job.
pub fn equations_for(graph: &Graph) -> IndexMap<TypeId, Equation> {
    let mut equations = IndexMap::new();
    for state in graph.states() {
        let mut equation = Equation::empty();
        if state.is_start() {
            equation.add_free(Expr::Epsilon);
        }
        for (label, source) in graph.incoming_edges(state.ty()) {
            equation.add_term(*source, Expr::symbol(label.clone()));
        }
        equations.insert(state.ty(), equation);
    }
    equations
}
