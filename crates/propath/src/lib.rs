#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Propath: closed-form property-path regular expressions for entity type
//! graphs.
//!
//! Entity schemas routinely contain cycles (parent/child trees, audit
//! chains, mutual references), so the set of property-access paths from a
//! root type is usually infinite. Propath represents that set exactly: the
//! association graph is treated as a finite automaton and solved with
//! Arden's lemma into regular expressions such as `"taskChildren.*quote."`
//! (any number of `taskChildren.` hops, then `quote.`).
//!
//! # Example
//!
//! ```
//! use propath::{DynamicEntityTypes, PathEnumerator, PathReport, TypeInterner};
//!
//! let schema = r#"[
//!     {
//!         "type": "Task",
//!         "attributes": ["name"],
//!         "associations": [
//!             {"name": "taskChildren", "target": "Task"},
//!             {"name": "quote", "target": "Quote"}
//!         ]
//!     },
//!     {"type": "Quote", "attributes": ["price"]}
//! ]"#;
//!
//! let mut interner = TypeInterner::new();
//! let types = DynamicEntityTypes::from_json(schema, &mut interner).unwrap();
//! let task = interner.get("Task").unwrap();
//! let quote = interner.get("Quote").unwrap();
//!
//! let report = PathEnumerator::new(&types).enumerate(task).unwrap();
//! let PathReport::Regex(paths) = report else {
//!     panic!("Task reaches a cycle");
//! };
//! assert_eq!(paths[&task], "taskChildren.*");
//! assert_eq!(paths[&quote], "taskChildren.*quote.");
//! ```

pub mod enumerate;

pub use enumerate::{PathEnumerator, PathReport};
pub use propath_core::{
    Association, DynamicEntityTypes, EntityInfo, EntityTypes, Expr, NO_PATH, RawAssociation,
    RawEntity, SchemaError, TypeId, TypeInterner, parse_entity_types, render,
};
pub use propath_solver::{Edge, Graph, SolveError, State, solve};

/// Errors surfaced by path enumeration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("entity schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("graph configuration error: {0}")]
    Solve(#[from] SolveError),

    /// The requested root type is absent from the metadata provider.
    #[error("unknown root type {0:?}")]
    UnknownRoot(TypeId),
}

/// Result type for enumeration operations.
pub type Result<T> = std::result::Result<T, Error>;
