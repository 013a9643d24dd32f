//! The automaton model: states identified with entity types, labeled edges.
//!
//! Every index here iterates in insertion order, so a fixed graph always
//! solves to byte-identical output.

use indexmap::{IndexMap, IndexSet};
use propath_core::TypeId;

use crate::SolveError;

/// A graph vertex, identified with an entity type.
///
/// Equality and hashing delegate to the wrapped type identity; the
/// start/finish flags are per-solve configuration, not identity. The finish
/// flag is toggled between solves of the same graph — results of earlier
/// solves are snapshots and stay valid.
#[derive(Debug, Clone, Copy)]
pub struct State {
    ty: TypeId,
    is_start: bool,
    is_finish: bool,
}

impl State {
    fn new(ty: TypeId) -> Self {
        Self {
            ty,
            is_start: false,
            is_finish: false,
        }
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_finish(&self) -> bool {
        self.is_finish
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for State {}

impl std::hash::Hash for State {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
    }
}

/// A directed, labeled transition between two states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub label: String,
    pub source: TypeId,
    pub target: TypeId,
}

/// Edge set plus derived indices.
///
/// A state with no incoming edges that is not the start state is
/// unreachable; solving for it yields the empty language, not an error.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: IndexSet<Edge>,
    states: IndexMap<TypeId, State>,
    /// target -> [(label, source)] in edge insertion order.
    incoming: IndexMap<TypeId, Vec<(String, TypeId)>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a labeled edge, registering both endpoint states.
    ///
    /// Inserting an identical edge twice is a no-op. Self-loops are legal
    /// and become `Star` terms during solving. Empty labels are rejected.
    pub fn add_edge(
        &mut self,
        label: impl Into<String>,
        source: TypeId,
        target: TypeId,
    ) -> crate::Result<()> {
        let label = label.into();
        if label.is_empty() {
            return Err(SolveError::EmptyLabel {
                from: source,
                to: target,
            });
        }

        let edge = Edge {
            label,
            source,
            target,
        };
        if !self.edges.insert(edge.clone()) {
            return Ok(());
        }

        self.touch(source);
        self.touch(target);
        self.incoming
            .entry(target)
            .or_default()
            .push((edge.label, edge.source));
        Ok(())
    }

    fn touch(&mut self, ty: TypeId) {
        self.states.entry(ty).or_insert_with(|| State::new(ty));
    }

    /// Mark `ty` as the start state, registering it if needed.
    pub fn set_start(&mut self, ty: TypeId) {
        self.touch(ty);
        self.states[&ty].is_start = true;
    }

    /// Toggle the finish flag of `ty`, registering it if needed.
    ///
    /// Mutates only the flag; expressions computed under earlier finish
    /// selections are unaffected.
    pub fn set_finish(&mut self, ty: TypeId, finish: bool) {
        self.touch(ty);
        self.states[&ty].is_finish = finish;
    }

    /// All `(label, predecessor)` pairs with an edge into `ty`, in
    /// insertion order.
    pub fn incoming_edges(&self, ty: TypeId) -> &[(String, TypeId)] {
        self.incoming
            .get(&ty)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// States in first-seen order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn state(&self, ty: TypeId) -> Option<&State> {
        self.states.get(&ty)
    }

    /// The start state, if one was selected.
    pub fn start(&self) -> Option<TypeId> {
        self.states
            .values()
            .find(|s| s.is_start)
            .map(|s| s.ty)
    }

    /// The currently selected finish state, if any.
    pub fn finish(&self) -> Option<TypeId> {
        self.states
            .values()
            .find(|s| s.is_finish)
            .map(|s| s.ty)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(raw: u32) -> TypeId {
        TypeId::from_raw(raw)
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let mut graph = Graph::new();
        graph.add_edge("a", ty(0), ty(1)).unwrap();
        graph.add_edge("a", ty(0), ty(1)).unwrap();

        assert_eq!(graph.edges().count(), 1);
        assert_eq!(graph.incoming_edges(ty(1)).len(), 1);
    }

    #[test]
    fn incoming_edges_keep_insertion_order() {
        let mut graph = Graph::new();
        graph.add_edge("b", ty(0), ty(2)).unwrap();
        graph.add_edge("a", ty(1), ty(2)).unwrap();

        let incoming = graph.incoming_edges(ty(2));
        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming[0], ("b".to_owned(), ty(0)));
        assert_eq!(incoming[1], ("a".to_owned(), ty(1)));
    }

    #[test]
    fn empty_label_is_rejected() {
        let mut graph = Graph::new();
        let err = graph.add_edge("", ty(0), ty(1)).unwrap_err();
        assert_eq!(
            err,
            SolveError::EmptyLabel {
                from: ty(0),
                to: ty(1)
            }
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn self_loops_are_legal() {
        let mut graph = Graph::new();
        graph.add_edge("loop", ty(0), ty(0)).unwrap();

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.incoming_edges(ty(0)), &[("loop".to_owned(), ty(0))]);
    }

    #[test]
    fn state_identity_ignores_flags() {
        let mut graph = Graph::new();
        graph.add_edge("a", ty(0), ty(1)).unwrap();
        let before = *graph.state(ty(1)).unwrap();

        graph.set_finish(ty(1), true);
        let after = *graph.state(ty(1)).unwrap();

        assert_eq!(before, after);
        assert!(!before.is_finish());
        assert!(after.is_finish());
    }

    #[test]
    fn finish_flag_toggles() {
        let mut graph = Graph::new();
        graph.add_edge("a", ty(0), ty(1)).unwrap();

        assert_eq!(graph.finish(), None);
        graph.set_finish(ty(1), true);
        assert_eq!(graph.finish(), Some(ty(1)));
        graph.set_finish(ty(1), false);
        assert_eq!(graph.finish(), None);
    }

    #[test]
    fn set_start_registers_isolated_state() {
        let mut graph = Graph::new();
        graph.set_start(ty(5));

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.start(), Some(ty(5)));
        assert!(graph.incoming_edges(ty(5)).is_empty());
    }

    #[test]
    fn states_iterate_in_first_seen_order() {
        let mut graph = Graph::new();
        graph.add_edge("x", ty(2), ty(0)).unwrap();
        graph.add_edge("y", ty(1), ty(2)).unwrap();

        let order: Vec<_> = graph.states().map(|s| s.ty()).collect();
        assert_eq!(order, vec![ty(2), ty(0), ty(1)]);
    }
}
