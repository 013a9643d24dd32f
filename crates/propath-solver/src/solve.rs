//! Arden's-lemma elimination solver.
//!
//! Eliminates non-finish states one at a time: Arden-close the state's own
//! equation, substitute it into every remaining equation, repeat. The
//! equation map is owned by the call, so concurrent solves over the same
//! logical graph cannot interfere — nothing survives between invocations.
//!
//! Normalization is continuous (inside the `Expr` constructors on every
//! merge), which is what bounds expression growth across substitutions.

use propath_core::Expr;

use crate::SolveError;
use crate::automaton::Graph;
use crate::equation::equations_for;

/// Solve the graph for its currently selected finish state.
///
/// Fails fast if no finish or no start state is configured. An unreachable
/// finish state yields `Expr::Empty`, not an error. Elimination follows
/// state insertion order, so a fixed graph always produces an identical
/// expression; graphs with a state of in-degree ≥ 2 may produce different
/// but language-equivalent expressions under other orders, which is
/// accepted.
pub fn solve(graph: &Graph) -> crate::Result<Expr> {
    let finish = graph.finish().ok_or(SolveError::NoFinishState)?;
    graph.start().ok_or(SolveError::NoStartState)?;

    let mut equations = equations_for(graph);

    let order: Vec<_> = equations
        .keys()
        .copied()
        .filter(|&ty| ty != finish)
        .collect();

    for ty in order {
        let mut eliminated = equations
            .shift_remove(&ty)
            .expect("eliminated state has an equation");
        eliminated.arden(ty);
        for remaining in equations.values_mut() {
            remaining.substitute(ty, &eliminated);
        }
    }

    let mut finish_equation = equations
        .shift_remove(&finish)
        .expect("finish state has an equation");
    finish_equation.arden(finish);
    Ok(finish_equation.into_expr())
}
