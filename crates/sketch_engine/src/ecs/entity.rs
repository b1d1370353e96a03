//! Entities and id allocation
//!
//! An entity is a numeric id, a display name, a signature bitset, and a
//! list of render-resource handles. Entities are created only through
//! [`Scene::create_entity`](super::Scene::create_entity) so id assignment
//! and scene registration happen together.

use crate::render::MaterialId;

use super::Signature;

/// Entity identifier
///
/// Ids are reused: destroying an entity returns its id to the scene's
/// free list, and the most recently freed id is handed out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw numeric id
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// LIFO free-list id allocator
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    next: u32,
    freed: Vec<u32>,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        if let Some(id) = self.freed.pop() {
            return EntityId(id);
        }
        let id = self.next;
        self.next += 1;
        EntityId(id)
    }

    pub fn free(&mut self, id: EntityId) {
        self.freed.push(id.0);
    }
}

/// A live object owning zero or more components
pub struct Entity {
    id: EntityId,
    name: String,
    pub(crate) signature: Signature,
    /// Render-resource handles owned by this entity
    ///
    /// Rendering systems use `materials[0]` and skip the entity with a
    /// warning when the list is empty.
    pub materials: Vec<MaterialId>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            signature: Signature::new(),
            materials: Vec::new(),
        }
    }

    /// The entity's id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entity's current component signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}
