#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Propath entity type metadata.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to an `entity-types.json` document
//! - **Analysis layer**: ID-indexed association/attribute lookups behind the
//!   `EntityTypes` trait
//!
//! Plus the regex expression algebra (`expr`) and its string renderer
//! (`render`), shared by the solver and the enumeration facade.

use indexmap::IndexMap;
use std::collections::HashMap;

pub mod expr;
mod interner;
pub mod render;

pub use expr::Expr;
pub use interner::{TypeId, TypeInterner};
pub use render::{NO_PATH, render};

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw entity definition from an `entity-types.json` document.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub type_name: String,
    /// Scalar property names.
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Association properties to other entity types.
    #[serde(default)]
    pub associations: Vec<RawAssociation>,
}

/// Raw association property from the schema document.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawAssociation {
    pub name: String,
    pub target: String,
}

/// Parse `entity-types.json` content into raw entities.
pub fn parse_entity_types(json: &str) -> Result<Vec<RawEntity>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Errors from the raw schema layer.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The document is not valid entity-schema JSON.
    #[error("malformed entity schema: {0}")]
    Parse(#[from] serde_json::Error),

    /// An association points at a type the document never declares.
    #[error("association `{label}` on `{entity}` targets undeclared type `{target}`")]
    UnknownType {
        entity: String,
        label: String,
        target: String,
    },
}

// ============================================================================
// Common Types
// ============================================================================

/// Separator between path segments in rendered output.
///
/// Baked into association labels at build time, so the automaton alphabet
/// and the rendered punctuation stay in lockstep.
pub const PATH_SEPARATOR: char = '.';

/// Association property: a labeled edge from one entity type to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// Edge label as used in rendered paths, separator included
    /// (e.g. `"quote."`).
    pub label: String,
    /// Target entity type.
    pub target: TypeId,
}

// ============================================================================
// EntityTypes Trait
// ============================================================================

/// Trait for entity type metadata lookups.
///
/// The automaton and enumeration layers see entity types only through this
/// seam: opaque ids, labeled association edges, and scalar attribute names.
pub trait EntityTypes {
    fn contains(&self, ty: TypeId) -> bool;

    /// Association properties of `ty`, in declaration order.
    fn associations(&self, ty: TypeId) -> &[Association];

    /// Scalar property names of `ty`, in declaration order.
    fn attributes(&self, ty: TypeId) -> &[String];
}

impl<T: EntityTypes + ?Sized> EntityTypes for &T {
    fn contains(&self, ty: TypeId) -> bool {
        (*self).contains(ty)
    }
    fn associations(&self, ty: TypeId) -> &[Association] {
        (*self).associations(ty)
    }
    fn attributes(&self, ty: TypeId) -> &[String] {
        (*self).attributes(ty)
    }
}

// ============================================================================
// Analysis Layer (runtime construction)
// ============================================================================

/// Complete metadata for one entity type.
#[derive(Debug, Clone)]
pub struct EntityInfo {
    pub name: String,
    pub attributes: Vec<String>,
    pub associations: Vec<Association>,
}

/// Entity type metadata built at runtime from raw schema entities.
///
/// Iteration follows declaration order so downstream output is reproducible
/// for a fixed schema document.
#[derive(Debug, Clone, Default)]
pub struct DynamicEntityTypes {
    entities: IndexMap<TypeId, EntityInfo>,
}

impl DynamicEntityTypes {
    /// Build from raw entities, interning every declared type name.
    ///
    /// Association labels get the path separator appended here; the rest of
    /// the pipeline treats the labeled alphabet as opaque.
    pub fn build(raw: &[RawEntity], interner: &mut TypeInterner) -> Result<Self, SchemaError> {
        let mut declared: HashMap<&str, TypeId> = HashMap::new();
        for entity in raw {
            let id = interner.intern(&entity.type_name);
            declared.insert(entity.type_name.as_str(), id);
        }

        let mut entities = IndexMap::new();
        for entity in raw {
            let associations = entity
                .associations
                .iter()
                .map(|assoc| {
                    let target = declared.get(assoc.target.as_str()).copied().ok_or_else(|| {
                        SchemaError::UnknownType {
                            entity: entity.type_name.clone(),
                            label: assoc.name.clone(),
                            target: assoc.target.clone(),
                        }
                    })?;
                    Ok(Association {
                        label: format!("{}{}", assoc.name, PATH_SEPARATOR),
                        target,
                    })
                })
                .collect::<Result<Vec<_>, SchemaError>>()?;

            entities.insert(
                declared[entity.type_name.as_str()],
                EntityInfo {
                    name: entity.type_name.clone(),
                    attributes: entity.attributes.clone(),
                    associations,
                },
            );
        }

        Ok(Self { entities })
    }

    /// Parse and build in one step.
    pub fn from_json(json: &str, interner: &mut TypeInterner) -> Result<Self, SchemaError> {
        let raw = parse_entity_types(json)?;
        Self::build(&raw, interner)
    }

    pub fn get(&self, ty: TypeId) -> Option<&EntityInfo> {
        self.entities.get(&ty)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate entities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &EntityInfo)> {
        self.entities.iter().map(|(&id, info)| (id, info))
    }
}

impl EntityTypes for DynamicEntityTypes {
    fn contains(&self, ty: TypeId) -> bool {
        self.entities.contains_key(&ty)
    }

    fn associations(&self, ty: TypeId) -> &[Association] {
        self.get(ty)
            .map(|info| info.associations.as_slice())
            .unwrap_or(&[])
    }

    fn attributes(&self, ty: TypeId) -> &[String] {
        self.get(ty)
            .map(|info| info.attributes.as_slice())
            .unwrap_or(&[])
    }
}
