//! Path enumeration driver.
//!
//! Two modes per root type:
//! - **base**: the association closure of the root is acyclic, so a direct
//!   traversal yields the finite set of property-path strings
//! - **regex**: the closure contains a cycle, so it is treated as a finite
//!   automaton and solved once per reachable type with Arden elimination
//!
//! The enumerator is the only place external type metadata is consumed;
//! below this layer everything is opaque ids and label strings.

use indexmap::{IndexMap, IndexSet};
use propath_core::{EntityTypes, TypeId, render};
use propath_solver::{Graph, solve};

use crate::{Error, Result};

/// Result of enumerating one root type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathReport {
    /// Finite path set of an acyclic root, in traversal order.
    Finite(Vec<String>),
    /// Rendered path expression per reachable type, in reachability order.
    Regex(IndexMap<TypeId, String>),
}

/// Per-root path enumeration over an entity metadata provider.
pub struct PathEnumerator<'a, T: EntityTypes> {
    types: &'a T,
}

impl<'a, T: EntityTypes> PathEnumerator<'a, T> {
    pub fn new(types: &'a T) -> Self {
        Self { types }
    }

    /// Enumerate paths from `root`, dispatching on cycle reachability.
    pub fn enumerate(&self, root: TypeId) -> Result<PathReport> {
        if !self.types.contains(root) {
            return Err(Error::UnknownRoot(root));
        }
        if self.has_cycle(root) {
            Ok(PathReport::Regex(self.enumerate_regex(root)?))
        } else {
            Ok(PathReport::Finite(self.enumerate_base(root)))
        }
    }

    /// Finite property paths of an acyclic root: every attribute of every
    /// type reachable through associations, prefixed by the labels walked
    /// to get there.
    ///
    /// Associations closing a cycle are never traversed here; callers that
    /// need cyclic roots get exact results from `enumerate_regex`.
    pub fn enumerate_base(&self, root: TypeId) -> Vec<String> {
        let mut paths = Vec::new();
        let mut on_path = Vec::new();
        self.collect_paths(root, "", &mut on_path, &mut paths);
        paths
    }

    fn collect_paths(
        &self,
        ty: TypeId,
        prefix: &str,
        on_path: &mut Vec<TypeId>,
        out: &mut Vec<String>,
    ) {
        for attribute in self.types.attributes(ty) {
            out.push(format!("{prefix}{attribute}"));
        }
        on_path.push(ty);
        for association in self.types.associations(ty) {
            if on_path.contains(&association.target) {
                continue;
            }
            let nested = format!("{prefix}{}", association.label);
            self.collect_paths(association.target, &nested, on_path, out);
        }
        on_path.pop();
    }

    /// Build the association automaton of `root` and solve it once per
    /// reachable type.
    ///
    /// The finish flag is toggled per target on one shared graph; each
    /// solve builds and discards its own equation context, so the results
    /// are independent snapshots.
    pub fn enumerate_regex(&self, root: TypeId) -> Result<IndexMap<TypeId, String>> {
        let mut graph = self.build_graph(root)?;
        graph.set_start(root);

        let targets: Vec<_> = graph.states().map(|s| s.ty()).collect();
        let mut report = IndexMap::new();
        for target in targets {
            graph.set_finish(target, true);
            let expr = solve(&graph)?;
            graph.set_finish(target, false);
            report.insert(target, render(&expr));
        }
        Ok(report)
    }

    /// Association closure of `root` as an automaton, root first.
    fn build_graph(&self, root: TypeId) -> Result<Graph> {
        let mut graph = Graph::new();
        graph.set_start(root);

        let mut worklist = vec![root];
        let mut seen = IndexSet::from([root]);
        while let Some(ty) = worklist.pop() {
            for association in self.types.associations(ty) {
                graph.add_edge(association.label.clone(), ty, association.target)?;
                if seen.insert(association.target) {
                    worklist.push(association.target);
                }
            }
        }
        Ok(graph)
    }

    /// Whether any cycle is reachable from `root` through associations.
    pub fn has_cycle(&self, root: TypeId) -> bool {
        let mut on_stack = IndexSet::new();
        let mut done = IndexSet::new();
        self.visit(root, &mut on_stack, &mut done)
    }

    fn visit(
        &self,
        ty: TypeId,
        on_stack: &mut IndexSet<TypeId>,
        done: &mut IndexSet<TypeId>,
    ) -> bool {
        if done.contains(&ty) {
            return false;
        }
        if !on_stack.insert(ty) {
            return true;
        }
        for association in self.types.associations(ty) {
            if self.visit(association.target, on_stack, done) {
                return true;
            }
        }
        on_stack.shift_remove(&ty);
        done.insert(ty);
        false
    }
}
