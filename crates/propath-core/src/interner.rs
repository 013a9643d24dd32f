//! Entity type identity.
//!
//! Schema type names are interned once into `TypeId` handles. Everything
//! downstream (graphs, equations, reports) keys on the handle alone; only
//! the interner that issued an id can map it back to a name.

use std::collections::HashMap;

/// Opaque handle for one interned entity type name.
///
/// Ids compare and order by interning order, which for a schema document
/// is declaration order. Name ordering goes through
/// `TypeInterner::resolve`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    /// The underlying index.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Handle built straight from an index, for fixtures that never touch
    /// an interner.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl PartialOrd for TypeId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Bidirectional store of entity type names.
///
/// Interning the same name twice hands back the same id; ids index into
/// the name table.
#[derive(Debug, Clone, Default)]
pub struct TypeInterner {
    /// Name to id, for idempotent interning.
    map: HashMap<String, TypeId>,
    /// Id-indexed name table.
    names: Vec<String>,
}

impl TypeInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `name`, interning it on first sight.
    pub fn intern(&mut self, name: &str) -> TypeId {
        if let Some(&id) = self.map.get(name) {
            return id;
        }

        let id = TypeId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.map.insert(name.to_owned(), id);
        id
    }

    /// Id for `name`, or `None` if it was never interned.
    #[inline]
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.map.get(name).copied()
    }

    /// Name behind `id`.
    ///
    /// # Panics
    /// Panics if `id` came from a different interner.
    #[inline]
    pub fn resolve(&self, id: TypeId) -> &str {
        &self.names[id.0 as usize]
    }

    /// Name behind `id`, or `None` for a foreign id.
    #[inline]
    pub fn try_resolve(&self, id: TypeId) -> Option<&str> {
        self.names.get(id.0 as usize).map(|s| s.as_str())
    }

    /// Number of interned names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All interned names with their ids, in interning order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, s)| (TypeId(i as u32), s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_deduplicates() {
        let mut interner = TypeInterner::new();
        let a = interner.intern("Task");
        let b = interner.intern("Quote");
        let c = interner.intern("Task");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn resolve_round_trip() {
        let mut interner = TypeInterner::new();
        let id = interner.intern("Task");

        assert_eq!(interner.resolve(id), "Task");
        assert_eq!(interner.get("Task"), Some(id));
        assert_eq!(interner.get("Quote"), None);
        assert_eq!(interner.try_resolve(TypeId::from_raw(7)), None);
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut interner = TypeInterner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");

        assert!(a < b);
        let names: Vec<_> = interner.iter().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
